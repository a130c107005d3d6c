//! Screenshot artifacts.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::scope::FormPage;

/// Where screenshots go.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }

    /// `error_<task>.png`, with characters unsafe in file names replaced.
    pub fn failure_path(&self, task_name: &str) -> PathBuf {
        self.path_for(&format!("error_{}.png", sanitize_file_stem(task_name)))
    }

    /// Capture a full-page screenshot. Failures are logged, never raised.
    pub async fn capture(&self, page: &dyn FormPage, file_name: &str) -> Option<PathBuf> {
        self.capture_to(page, self.path_for(file_name)).await
    }

    pub async fn capture_failure(&self, page: &dyn FormPage, task_name: &str) -> Option<PathBuf> {
        self.capture_to(page, self.failure_path(task_name)).await
    }

    async fn capture_to(&self, page: &dyn FormPage, path: PathBuf) -> Option<PathBuf> {
        if let Err(e) = tokio::fs::create_dir_all(&self.dir).await {
            warn!(dir = %self.dir.display(), error = %e, "Cannot create artifact directory");
            return None;
        }
        match page.screenshot(&path).await {
            Ok(()) => {
                info!(path = %path.display(), "Screenshot saved");
                Some(path)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Screenshot failed");
                None
            }
        }
    }
}

fn sanitize_file_stem(name: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| if c.is_alphanumeric() || "-_.()".contains(c) { c } else { '_' })
        .collect();
    if stem.is_empty() { "task".to_string() } else { stem }
}
