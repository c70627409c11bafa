use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Low-level pseudo-terminal failures.
#[derive(Debug, thiserror::Error)]
pub enum PtyError {
    #[error("failed to open pty: {0}")]
    Open(String),

    #[error("failed to spawn '{program}': {reason}")]
    Spawn { program: String, reason: String },

    #[error("pty write failed: {0}")]
    Write(String),

    #[error("pty resize failed: {0}")]
    Resize(String),
}

/// Errors that end a session-level operation.
///
/// None of these are retried. `Restoration` is dropped silently by the caller;
/// the rest are shown to the user.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("{0}")]
    MissingArgument(String),

    #[error("could not start '{program}' ({primary}) and fallback shell '{shell}' failed too ({fallback})")]
    Spawn {
        program: String,
        primary: String,
        shell: String,
        fallback: String,
    },

    #[error("could not create panel: {0}")]
    Surface(String),

    #[error("restoration record has no working directory")]
    Restoration,
}

#[derive(Debug, thiserror::Error)]
pub enum LazypaneError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Pty(#[from] PtyError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("webview error: {0}")]
    WebView(String),

    #[error("{0}")]
    Other(String),
}
