use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HclError {
    #[error("Syntax error at {line}:{column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("unknown configuration key \"{0}\"")]
    UnknownKey(String),

    #[error("invalid HCL in {origin}: {reason}")]
    Decode { origin: String, reason: String },

    #[error("Unsupported value of type {kind} at '{key}'")]
    UnsupportedValue { key: String, kind: &'static str },

    #[error("Failed to read {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
}
