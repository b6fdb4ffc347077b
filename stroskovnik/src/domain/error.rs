use std::{path::PathBuf, time::Duration};

use thiserror::Error;

/// The page holds no usable timesheet table. A normal negative outcome, not a fault.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("no timesheet table found")]
    NoTableFound,
    #[error("no day columns could be resolved from the table header")]
    NoDayColumnsResolved,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(String),
    #[error("failed to serialize settings: {0}")]
    Serialize(String),
    #[error("invalid setting: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("renderer unavailable: {0}")]
    Unavailable(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Backend(String),
}

impl RenderError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

/// Errors that abort one generation attempt.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    NoData(#[from] ExtractError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("document renderer not ready after {waited:?}: {reason}")]
    RendererUnavailable { waited: Duration, reason: String },
    #[error("failed to render {}: {}", .path.display(), .source)]
    Render {
        path: PathBuf,
        #[source]
        source: RenderError,
    },
}

impl GenerationError {
    /// True when the page simply had nothing to generate from.
    pub fn is_no_data(&self) -> bool {
        matches!(self, GenerationError::NoData(_))
    }
}
