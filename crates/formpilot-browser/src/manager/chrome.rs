//! Locating, launching and probing a local Chrome.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::{Child, Command};
use tokio::time::error::Elapsed;
use tracing::{info, warn};

use super::config::{BrowserError, BrowserManagerConfig};

const POLL_INTERVAL: Duration = Duration::from_millis(200);

#[cfg(target_os = "macos")]
const CANDIDATES: &[&str] = &[
    "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
    "/Applications/Chromium.app/Contents/MacOS/Chromium",
    "/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge",
];

#[cfg(target_os = "windows")]
const CANDIDATES: &[&str] = &[
    r"C:\Program Files\Google\Chrome\Application\chrome.exe",
    r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
    r"C:\Program Files (x86)\Microsoft\Edge\Application\msedge.exe",
];

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const CANDIDATES: &[&str] = &[
    "/usr/bin/google-chrome",
    "/usr/bin/google-chrome-stable",
    "/usr/bin/chromium",
    "/usr/bin/chromium-browser",
    "/snap/bin/chromium",
];

pub(super) fn find_chrome() -> Option<PathBuf> {
    CANDIDATES.iter().map(PathBuf::from).find(|p| p.exists())
}

pub(super) async fn is_listening(endpoint: &str) -> bool {
    reqwest::get(format!("{}/json/version", endpoint)).await.is_ok()
}

pub(super) async fn wait_until_listening(endpoint: &str, limit: Duration) -> Result<(), Elapsed> {
    tokio::time::timeout(limit, async {
        while !is_listening(endpoint).await {
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    })
    .await
}

pub(super) fn launch(config: &BrowserManagerConfig) -> Result<Child, BrowserError> {
    let path = find_chrome().ok_or(BrowserError::ChromeNotFound)?;
    let profile = config.resolved_profile_dir();
    if let Err(e) = std::fs::create_dir_all(&profile) {
        warn!("Failed to create profile directory {}: {}", profile.display(), e);
    }

    let child = Command::new(&path)
        .args(config.launch_args())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| BrowserError::LaunchFailed {
            path: path.clone(),
            reason: e.to_string(),
        })?;

    info!(pid = ?child.id(), profile = %profile.display(), "Launched {}", path.display());
    Ok(child)
}
