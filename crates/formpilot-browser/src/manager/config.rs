use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::cdp::CdpError;

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("No Chrome, Chromium or Edge executable found")]
    ChromeNotFound,

    #[error("Failed to launch {}: {reason}", .path.display())]
    LaunchFailed { path: PathBuf, reason: String },

    #[error("Chrome did not open debug port {0} within {1:?}")]
    StartTimeout(u16, Duration),

    #[error("Nothing listens on debug port {0} and launching is disabled")]
    NotRunning(u16),

    #[error(transparent)]
    Cdp(#[from] CdpError),
}

#[derive(Debug, Clone)]
pub struct BrowserManagerConfig {
    pub debug_port: u16,
    /// Window size passed to a launched Chrome.
    pub viewport_width: u32,
    pub viewport_height: u32,
    /// Profile for a launched Chrome; defaults under the home directory.
    pub profile_dir: Option<PathBuf>,
    pub headless: bool,
    /// Launch Chrome when nothing listens on the debug port.
    pub launch: bool,
}

impl Default for BrowserManagerConfig {
    fn default() -> Self {
        Self {
            debug_port: 9222,
            viewport_width: 1280,
            viewport_height: 900,
            profile_dir: None,
            headless: false,
            launch: true,
        }
    }
}

impl BrowserManagerConfig {
    pub fn endpoint(&self) -> String {
        format!("http://localhost:{}", self.debug_port)
    }

    pub fn resolved_profile_dir(&self) -> PathBuf {
        self.profile_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".formpilot")
                .join("browser-profile")
        })
    }

    /// Command line for a launched Chrome.
    pub fn launch_args(&self) -> Vec<String> {
        let mut args = vec![
            format!("--remote-debugging-port={}", self.debug_port),
            format!("--user-data-dir={}", self.resolved_profile_dir().display()),
            format!("--window-size={},{}", self.viewport_width, self.viewport_height),
            "--no-first-run".to_string(),
            "--no-default-browser-check".to_string(),
            "--disable-popup-blocking".to_string(),
        ];
        if self.headless {
            args.push("--headless=new".to_string());
        }
        args
    }
}
