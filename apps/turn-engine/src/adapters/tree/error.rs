use thiserror::Error;

/// Failures reported by a `TreeStore` implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no value at {path}")]
    NotFound { path: String },

    #[error("store unavailable: {detail}")]
    Unavailable { detail: String },

    #[error("write to {path} failed: {detail}")]
    WriteFailed { path: String, detail: String },

    #[error("value at {path} has unexpected shape: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("value for {path} could not be encoded: {source}")]
    Encode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub fn write_failed(path: impl ToString, detail: impl Into<String>) -> Self {
        Self::WriteFailed {
            path: path.to_string(),
            detail: detail.into(),
        }
    }

    pub fn unavailable(detail: impl Into<String>) -> Self {
        Self::Unavailable {
            detail: detail.into(),
        }
    }
}
