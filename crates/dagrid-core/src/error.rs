use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum DagridError {
    #[error("failed to decode page content: {0}")]
    Decode(String),

    #[error("failed to load gazetteer from {path}: {reason}")]
    GazetteerLoad { path: PathBuf, reason: String },

    #[error("invalid gazetteer record on line {line}: '{record}' (expected two comma-separated fields)")]
    GazetteerRecord { line: usize, record: String },

    #[error("failed to load options from {path}: {reason}")]
    OptionsLoad { path: PathBuf, reason: String },

    #[error("invalid options: {0}")]
    OptionsInvalid(String),

    #[error("record store rejected '{application_number}': {reason}")]
    Store {
        application_number: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
