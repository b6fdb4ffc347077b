use std::path::Path;

use async_trait::async_trait;

use crate::{
    domain::{RenderError, Settings, SettingsError},
    TimesheetDocument,
};

#[cfg(test)]
pub(crate) mod mock;

/// Where user preferences live.
///
/// Implementations must return the currently stored values on every call; generation relies on
/// reading a fresh snapshot each time.
#[async_trait]
pub trait SettingsStore: Send + Sync + 'static {
    async fn load(&self) -> Result<Settings, SettingsError>;

    async fn save(&self, settings: &Settings) -> Result<(), SettingsError>;
}

/// Lays out a [`TimesheetDocument`] and writes it to disk.
#[async_trait]
pub trait DocumentRenderer: Send + Sync + 'static {
    /// Resolves once the renderer can accept documents.
    async fn ready(&self) -> Result<(), RenderError>;

    async fn render(&self, document: &TimesheetDocument, path: &Path) -> Result<(), RenderError>;
}
