use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("unsupported platform '{token}' (supported: {allowed})")]
    UnsupportedPlatform { token: String, allowed: String },

    #[error("at least one platform is required")]
    NoPlatforms,

    #[error("project name cannot be empty")]
    EmptyProjectName,

    #[error("required tool not available: {0}")]
    MissingTool(String),

    #[error("failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' exited with status {status}: {stderr}")]
    CommandFailed {
        program: String,
        status: i32,
        stderr: String,
    },

    #[error("git operation failed in {}: {message}", dir.display())]
    Git { dir: PathBuf, message: String },

    #[error("home directory not found: set HOME environment variable")]
    HomeNotFound,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl SetupError {
    /// Validation-class errors map to exit code 2 at the CLI boundary;
    /// everything else maps to 1.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            SetupError::UnsupportedPlatform { .. }
                | SetupError::NoPlatforms
                | SetupError::EmptyProjectName
                | SetupError::MissingTool(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, SetupError>;
