use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use stroskovnik::{
    domain::{Settings, SettingsError},
    SettingsStore,
};

use crate::cli::OverrideArgs;

/// Settings persisted as TOML. A missing file reads as the defaults.
#[derive(Debug, Clone)]
pub struct TomlSettingsStore {
    path: PathBuf,
}

impl TomlSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn default_path() -> anyhow::Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Cannot determine config directory")?
            .join("stroskovnik")
            .join("settings.toml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the defaults if no file exists yet. Returns whether a file was created.
    pub async fn ensure_exists(&self) -> Result<bool, SettingsError> {
        if tokio::fs::try_exists(&self.path).await? {
            return Ok(false);
        }
        self.save(&Settings::default()).await?;
        Ok(true)
    }
}

#[async_trait]
impl SettingsStore for TomlSettingsStore {
    async fn load(&self) -> Result<Settings, SettingsError> {
        if !tokio::fs::try_exists(&self.path).await? {
            tracing::debug!("no settings at {}, using defaults", self.path.display());
            return Ok(Settings::default());
        }
        let raw = tokio::fs::read_to_string(&self.path).await?;
        toml::from_str(&raw)
            .map_err(|e| SettingsError::Parse(format!("{}: {}", self.path.display(), e)))
    }

    async fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let raw =
            toml::to_string_pretty(settings).map_err(|e| SettingsError::Serialize(e.to_string()))?;
        tokio::fs::write(&self.path, raw).await?;
        tracing::debug!("saved settings to {}", self.path.display());
        Ok(())
    }
}

/// Command line values that take precedence over the stored settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsOverrides {
    pub arrival_time: Option<time::Time>,
    pub scattering_minutes: Option<u32>,
    pub enable_secondary: Option<bool>,
    pub secondary_name: Option<String>,
    pub secondary_percent: Option<f64>,
    pub secondary_include_breaks: Option<bool>,
}

impl From<&OverrideArgs> for SettingsOverrides {
    fn from(args: &OverrideArgs) -> Self {
        Self {
            arrival_time: args.arrival_time,
            scattering_minutes: args.scattering,
            enable_secondary: args.secondary.then_some(true),
            secondary_name: args.secondary_name.clone(),
            secondary_percent: args.secondary_percent,
            secondary_include_breaks: args.secondary_no_breaks.then_some(false),
        }
    }
}

impl SettingsOverrides {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(&self, settings: &mut Settings) {
        if let Some(arrival_time) = self.arrival_time {
            settings.arrival_time = arrival_time;
        }
        if let Some(scattering) = self.scattering_minutes {
            settings.scattering_minutes = scattering;
        }
        if let Some(enabled) = self.enable_secondary {
            settings.enable_secondary = enabled;
        }
        if let Some(name) = &self.secondary_name {
            settings.secondary_name = name.clone();
        }
        if let Some(percent) = self.secondary_percent {
            settings.secondary_percent = percent;
        }
        if let Some(include_breaks) = self.secondary_include_breaks {
            settings.secondary_include_breaks = include_breaks;
        }
    }
}

/// A store whose every load has the overrides applied on top.
pub struct OverriddenStore<S> {
    inner: S,
    overrides: SettingsOverrides,
}

impl<S: SettingsStore> OverriddenStore<S> {
    pub fn new(inner: S, overrides: SettingsOverrides) -> Self {
        Self { inner, overrides }
    }

    /// Write the overridden values back to the underlying store.
    pub async fn persist(&self) -> Result<(), SettingsError> {
        let settings = self.load().await?;
        settings.validate()?;
        self.inner.save(&settings).await
    }
}

#[async_trait]
impl<S: SettingsStore> SettingsStore for OverriddenStore<S> {
    async fn load(&self) -> Result<Settings, SettingsError> {
        let mut settings = self.inner.load().await?;
        self.overrides.apply(&mut settings);
        Ok(settings)
    }

    async fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        self.inner.save(settings).await
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;
    use time::macros::time;

    use super::*;

    #[tokio::test]
    async fn missing_file_reads_as_defaults() {
        let dir = tempdir().unwrap();
        let store = TomlSettingsStore::new(dir.path().join("settings.toml"));
        assert_eq!(store.load().await.unwrap(), Settings::default());
    }

    #[tokio::test]
    async fn save_then_load() {
        let dir = tempdir().unwrap();
        let store = TomlSettingsStore::new(dir.path().join("nested").join("settings.toml"));
        let settings = Settings {
            arrival_time: time!(07:30),
            enable_secondary: true,
            secondary_name: "Tutor Job".into(),
            secondary_percent: 20.0,
            ..Settings::default()
        };

        store.save(&settings).await.unwrap();
        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains(r#"arrival_time = "07:30""#));
        assert_eq!(store.load().await.unwrap(), settings);
    }

    #[tokio::test]
    async fn partial_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "arrival_time = \"08:15\"\nscattering_minutes = 0\n").unwrap();

        let settings = TomlSettingsStore::new(&path).load().await.unwrap();
        assert_eq!(settings.arrival_time, time!(08:15));
        assert_eq!(settings.scattering_minutes, 0);
        assert_eq!(settings.output_dir, PathBuf::from("output"));
        assert!(settings.secondary_include_breaks);
    }

    #[tokio::test]
    async fn malformed_file_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "arrival_time = \"nine\"\n").unwrap();

        let err = TomlSettingsStore::new(&path).load().await.unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[tokio::test]
    async fn ensure_exists_creates_once() {
        let dir = tempdir().unwrap();
        let store = TomlSettingsStore::new(dir.path().join("settings.toml"));
        assert!(store.ensure_exists().await.unwrap());
        assert!(!store.ensure_exists().await.unwrap());
    }

    #[tokio::test]
    async fn overrides_apply_on_load_and_persist_on_request() {
        let dir = tempdir().unwrap();
        let inner = TomlSettingsStore::new(dir.path().join("settings.toml"));
        let overrides = SettingsOverrides {
            scattering_minutes: Some(3),
            enable_secondary: Some(true),
            secondary_percent: Some(50.0),
            secondary_include_breaks: Some(false),
            ..SettingsOverrides::default()
        };
        let store = OverriddenStore::new(inner.clone(), overrides);

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.scattering_minutes, 3);
        assert!(loaded.enable_secondary);
        assert!(!loaded.secondary_include_breaks);
        assert_eq!(inner.load().await.unwrap(), Settings::default());

        store.persist().await.unwrap();
        assert_eq!(inner.load().await.unwrap(), loaded);
    }

    #[test]
    fn flags_map_to_overrides() {
        let args = OverrideArgs {
            secondary_no_breaks: true,
            ..OverrideArgs::default()
        };
        let overrides = SettingsOverrides::from(&args);
        assert_eq!(overrides.secondary_include_breaks, Some(false));
        assert_eq!(overrides.enable_secondary, None);
        assert!(SettingsOverrides::from(&OverrideArgs::default()).is_empty());
    }
}
