use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use serde::Serialize;

use crate::{
    domain::{GenerationError, Period, ScheduleBatch, Settings},
    extract::Anomaly,
    heading::{parse_heading, Heading},
    schedule::{compute_all, derive_secondary_batch, RandomScatter, ScatterSource},
    source::TimesheetPage,
    DocumentRenderer, SettingsStore, TimesheetDocument,
};

/// How long a generation waits for the renderer before giving up.
pub const RENDERER_WAIT: Duration = Duration::from_millis(500);

/// The schedules of one generation, before anything is rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationPlan {
    pub primary: ScheduleBatch,
    pub secondary: Option<ScheduleBatch>,
    pub anomalies: Vec<Anomaly>,
}

impl GenerationPlan {
    pub fn batches(&self) -> impl Iterator<Item = &ScheduleBatch> {
        std::iter::once(&self.primary).chain(self.secondary.as_ref())
    }

    pub fn period(&self) -> Period {
        self.primary.period
    }
}

/// Build the schedules for a page with an explicit settings snapshot.
pub fn plan(
    page: &TimesheetPage,
    settings: &Settings,
    scatter: &mut impl ScatterSource,
) -> Result<GenerationPlan, GenerationError> {
    let extraction = page.extract()?;

    let heading = page.heading().and_then(parse_heading).unwrap_or_else(|| {
        let period = Period::current();
        tracing::warn!(
            heading = page.heading().unwrap_or_default(),
            "could not read employee and period from heading, using {}",
            period.label()
        );
        Heading {
            employee_name: String::new(),
            period,
        }
    });

    let days = compute_all(&extraction.days, settings, scatter);
    let primary = ScheduleBatch::primary(heading.employee_name, heading.period, days);
    let secondary = derive_secondary_batch(&primary, settings);

    Ok(GenerationPlan {
        primary,
        secondary,
        anomalies: extraction.anomalies,
    })
}

/// Runs extract → schedule → secondary → render for one page at a time.
pub struct GenerationService<S, R> {
    settings: Arc<S>,
    renderer: Arc<R>,
    renderer_wait: Duration,
}

impl<S: SettingsStore, R: DocumentRenderer> GenerationService<S, R> {
    pub fn new(settings: Arc<S>, renderer: Arc<R>) -> Self {
        Self {
            settings,
            renderer,
            renderer_wait: RENDERER_WAIT,
        }
    }

    pub fn with_renderer_wait(mut self, wait: Duration) -> Self {
        self.renderer_wait = wait;
        self
    }

    /// The current settings snapshot.
    pub async fn settings(&self) -> Result<Settings, GenerationError> {
        let settings = self.settings.load().await?;
        settings.validate()?;
        Ok(settings)
    }

    /// Schedule a page with freshly loaded settings and unseeded scattering.
    pub async fn plan(&self, page: &TimesheetPage) -> Result<GenerationPlan, GenerationError> {
        let settings = self.settings().await?;
        plan(page, &settings, &mut RandomScatter::from_entropy())
    }

    /// Generate and write all documents for a page into `output_dir`, or the configured
    /// directory when `None`.
    pub async fn generate(
        &self,
        page: &TimesheetPage,
        output_dir: Option<&Path>,
    ) -> Result<Vec<PathBuf>, GenerationError> {
        let settings = self.settings().await?;
        let plan = plan(page, &settings, &mut RandomScatter::from_entropy())?;
        let dir = output_dir.unwrap_or(&settings.output_dir);
        self.render(&plan, dir).await
    }

    /// Render every batch of a plan. Nothing is written when the renderer is not ready in time.
    pub async fn render(
        &self,
        plan: &GenerationPlan,
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>, GenerationError> {
        self.wait_for_renderer().await?;

        let mut written = Vec::new();
        for batch in plan.batches() {
            let document = TimesheetDocument::from_batch(batch);
            let path = output_dir.join(&document.file_name);
            self.renderer
                .render(&document, &path)
                .await
                .map_err(|source| GenerationError::Render {
                    path: path.clone(),
                    source,
                })?;
            tracing::info!("generated {}", path.display());
            written.push(path);
        }
        Ok(written)
    }

    async fn wait_for_renderer(&self) -> Result<(), GenerationError> {
        let unavailable = |reason: String| GenerationError::RendererUnavailable {
            waited: self.renderer_wait,
            reason,
        };
        match tokio::time::timeout(self.renderer_wait, self.renderer.ready()).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(unavailable(e.to_string())),
            Err(_) => Err(unavailable("timed out".to_string())),
        }
    }
}
