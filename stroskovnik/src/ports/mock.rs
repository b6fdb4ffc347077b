//! In-memory port implementations for testing.

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;

use crate::{
    domain::{RenderError, Settings, SettingsError},
    DocumentRenderer, SettingsStore, TimesheetDocument,
};

#[derive(Clone, Default)]
pub struct MockSettingsStore {
    settings: Arc<Mutex<Settings>>,
    loads: Arc<Mutex<usize>>,
}

impl MockSettingsStore {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: Arc::new(Mutex::new(settings)),
            loads: Arc::default(),
        }
    }

    pub fn set(&self, settings: Settings) {
        *self.settings.lock().unwrap() = settings;
    }

    pub fn loads(&self) -> usize {
        *self.loads.lock().unwrap()
    }
}

#[async_trait]
impl SettingsStore for MockSettingsStore {
    async fn load(&self) -> Result<Settings, SettingsError> {
        *self.loads.lock().unwrap() += 1;
        Ok(self.settings.lock().unwrap().clone())
    }

    async fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        self.set(settings.clone());
        Ok(())
    }
}

/// Records rendered documents instead of writing them.
#[derive(Clone, Default)]
pub struct MockRenderer {
    rendered: Arc<Mutex<Vec<(PathBuf, TimesheetDocument)>>>,
    startup_delay: Option<Duration>,
}

impl MockRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A renderer that takes `delay` to become ready.
    pub fn slow(delay: Duration) -> Self {
        Self {
            startup_delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn rendered(&self) -> Vec<(PathBuf, TimesheetDocument)> {
        self.rendered.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentRenderer for MockRenderer {
    async fn ready(&self) -> Result<(), RenderError> {
        if let Some(delay) = self.startup_delay {
            tokio::time::sleep(delay).await;
        }
        Ok(())
    }

    async fn render(&self, document: &TimesheetDocument, path: &Path) -> Result<(), RenderError> {
        self.rendered
            .lock()
            .unwrap()
            .push((path.to_path_buf(), document.clone()));
        Ok(())
    }
}
