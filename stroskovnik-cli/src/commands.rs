use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{bail, Context, Result};
use serde::Serialize;
use stroskovnik::{
    domain::Settings,
    extract::Extraction,
    parse_heading, period_folder_name, plan,
    schedule::RandomScatter,
    source::TimesheetPage,
    DocumentRenderer, GenerationPlan, GenerationService, SettingsStore, TimesheetDocument,
};

use crate::{
    cli::{GenerateArgs, InspectArgs},
    pdf::PdfRenderer,
    settings_file::{OverriddenStore, SettingsOverrides, TomlSettingsStore},
};

const PAGE_EXTENSIONS: [&str; 2] = ["html", "htm"];

pub async fn generate(store: TomlSettingsStore, args: GenerateArgs) -> Result<()> {
    let overrides = SettingsOverrides::from(&args.overrides);
    let store = Arc::new(OverriddenStore::new(store, overrides.clone()));

    if args.save && !overrides.is_empty() {
        store.persist().await.context("Failed to save settings")?;
        tracing::info!("saved command line settings");
    }

    let settings = store.load().await.context("Failed to load settings")?;
    let output = args.output.unwrap_or_else(|| settings.output_dir.clone());
    let renderer = Arc::new(PdfRenderer::new(settings.font_path));
    let service = GenerationService::new(store, renderer);

    let written = generate_pages(&service, &args.input, &output).await?;
    for path in &written {
        println!("{}", path.display());
    }
    Ok(())
}

/// Generate documents for one page, or for every page of a folder. Folder output is grouped
/// into one subfolder per month.
pub async fn generate_pages<S, R>(
    service: &GenerationService<S, R>,
    input: &Path,
    output: &Path,
) -> Result<Vec<PathBuf>>
where
    S: SettingsStore,
    R: DocumentRenderer,
{
    if !tokio::fs::metadata(input)
        .await
        .with_context(|| format!("Cannot read {}", input.display()))?
        .is_dir()
    {
        let page = read_page(input).await?;
        let plan = service
            .plan(&page)
            .await
            .with_context(|| format!("Failed to process {}", input.display()))?;
        return service
            .render(&plan, output)
            .await
            .with_context(|| format!("Failed to render {}", input.display()));
    }

    let files = page_files(input).await?;
    if files.is_empty() {
        bail!("No .html pages in {}", input.display());
    }

    let mut written = Vec::new();
    let mut generated = 0;
    for file in files {
        let page = read_page(&file).await?;
        let plan = match service.plan(&page).await {
            Ok(plan) => plan,
            Err(e) if e.is_no_data() => {
                tracing::warn!("{}: {}, skipped", file.display(), e);
                continue;
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to process {}", file.display()))
            }
        };

        let dir = output.join(period_folder_name(&plan.period()));
        let paths = service
            .render(&plan, &dir)
            .await
            .with_context(|| format!("Failed to render {}", file.display()))?;
        written.extend(paths);
        generated += 1;
    }

    if generated == 0 {
        bail!("No timesheet data found in {}", input.display());
    }
    tracing::info!("processed {} pages", generated);
    Ok(written)
}

pub async fn inspect(store: TomlSettingsStore, args: InspectArgs) -> Result<()> {
    let settings = store.load().await.context("Failed to load settings")?;
    settings.validate()?;

    let files = if tokio::fs::metadata(&args.input)
        .await
        .with_context(|| format!("Cannot read {}", args.input.display()))?
        .is_dir()
    {
        page_files(&args.input).await?
    } else {
        vec![args.input.clone()]
    };

    for file in files {
        let page = read_page(&file).await?;
        if args.json {
            print_json(&file, &page, &settings)?;
        } else {
            print_report(&file, &page, &settings);
        }
    }
    Ok(())
}

pub async fn config_path(store: &TomlSettingsStore) -> Result<()> {
    let created = store
        .ensure_exists()
        .await
        .with_context(|| format!("Failed to create {}", store.path().display()))?;
    println!("{}", store.path().display());
    if created {
        eprintln!("Created default settings");
    }
    Ok(())
}

async fn read_page(path: &Path) -> Result<TimesheetPage> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(TimesheetPage::parse(&String::from_utf8_lossy(&bytes)))
}

/// `.html` and `.htm` files directly inside `dir`, sorted by name.
async fn page_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .with_context(|| format!("Failed to list {}", dir.display()))?;

    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let is_page = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| PAGE_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)));
        if is_page && entry.file_type().await?.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InspectReport<'a> {
    file: &'a Path,
    heading: Option<&'a str>,
    extraction: Option<Extraction>,
    plan: Option<GenerationPlan>,
    error: Option<String>,
}

fn print_json(file: &Path, page: &TimesheetPage, settings: &Settings) -> Result<()> {
    let mut report = InspectReport {
        file,
        heading: page.heading(),
        extraction: None,
        plan: None,
        error: None,
    };
    match page.extract() {
        Ok(extraction) => {
            report.extraction = Some(extraction);
            report.plan = Some(plan(page, settings, &mut RandomScatter::from_entropy())?);
        }
        Err(e) => report.error = Some(e.to_string()),
    }
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn print_report(file: &Path, page: &TimesheetPage, settings: &Settings) {
    println!("== {}", file.display());
    println!("Heading:   {}", page.heading().unwrap_or("(none)"));
    match page.heading().and_then(parse_heading) {
        Some(heading) => {
            println!("Employee:  {}", heading.employee_name);
            println!("Period:    {}", heading.period.label());
        }
        None => println!("Employee:  (not recognised)"),
    }

    let extraction = match page.extract() {
        Ok(extraction) => extraction,
        Err(e) => {
            println!("No data: {}", e);
            println!();
            return;
        }
    };

    let columns: Vec<String> = extraction
        .day_columns
        .iter()
        .map(|c| format!("{}@{}", c.day, c.column))
        .collect();
    println!("Day columns: {}", columns.join(" "));

    println!("Days:");
    for day in &extraction.days {
        println!(
            "  {:>2}  regular {:>5.2}  trip {:>5.2}",
            day.day, day.hours_regular, day.hours_trip
        );
    }

    if !extraction.anomalies.is_empty() {
        println!("Anomalies:");
        for anomaly in &extraction.anomalies {
            println!("  {}", anomaly);
        }
    }

    let plan = match plan(page, settings, &mut RandomScatter::from_entropy()) {
        Ok(plan) => plan,
        Err(e) => {
            println!("Cannot schedule: {}", e);
            return;
        }
    };
    for batch in plan.batches() {
        let document = TimesheetDocument::from_batch(batch);
        println!("{} ({})", document.file_name, document.subtitle);
        for row in document.rows.iter().chain(std::iter::once(&document.totals)) {
            println!("  {}", row.cells().join(" | "));
        }
    }
    println!();
}
