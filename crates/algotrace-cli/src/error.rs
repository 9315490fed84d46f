//! CLI errors and their exit codes.

use thiserror::Error;

use algotrace_core::RecordError;

#[derive(Debug, Error)]
pub enum CliError {
    /// Missing or malformed command-line input.
    #[error("{0}")]
    Usage(String),

    /// An input file could not be read or parsed.
    #[error("cannot read {path}: {reason}")]
    InputFile { path: String, reason: String },

    /// The recorder rejected the input.
    #[error(transparent)]
    Record(#[from] RecordError),

    /// Writing output failed.
    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn usage(msg: impl Into<String>) -> Self {
        CliError::Usage(msg.into())
    }

    /// 0 = success, 1 = invalid input, 2 = bad arguments or unreadable
    /// input file, 3 = I/O error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Record(_) => 1,
            CliError::Usage(_) | CliError::InputFile { .. } => 2,
            CliError::Io(_) => 3,
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Io(err.into())
    }
}
