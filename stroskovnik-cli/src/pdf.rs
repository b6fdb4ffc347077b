//! A4 PDF output for [`TimesheetDocument`]s.

use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
    Point,
};
use stroskovnik::{domain::RenderError, DocumentRenderer, TimesheetDocument};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 20.0;
const ROW_HEIGHT: f32 = 6.5;
/// Left edge of each of the five columns.
const COLUMN_X: [f32; 5] = [MARGIN, 52.0, 82.0, 112.0, 150.0];
const LAYER: &str = "Layer 1";

/// TrueType fonts with č, š and ž, tried in order when no font is configured.
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    r"C:\Windows\Fonts\arial.ttf",
];

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl Fonts {
    fn load(doc: &PdfDocumentReference, font_path: Option<&Path>) -> Result<Self, RenderError> {
        match font_path {
            Some(path) => {
                let file = File::open(path)?;
                let font = doc
                    .add_external_font(file)
                    .map_err(|e| RenderError::backend(e.to_string()))?;
                Ok(Self {
                    regular: font.clone(),
                    bold: font,
                })
            }
            None => Ok(Self {
                regular: doc
                    .add_builtin_font(BuiltinFont::Helvetica)
                    .map_err(|e| RenderError::backend(e.to_string()))?,
                bold: doc
                    .add_builtin_font(BuiltinFont::HelveticaBold)
                    .map_err(|e| RenderError::backend(e.to_string()))?,
            }),
        }
    }
}

/// Writes each document as an A4 PDF, continuing the table on new pages as needed.
#[derive(Debug, Clone, Default)]
pub struct PdfRenderer {
    font_path: Option<PathBuf>,
}

impl PdfRenderer {
    /// Use `font_path`, or the first installed system font when none is configured.
    pub fn new(font_path: Option<PathBuf>) -> Self {
        let font_path = font_path.or_else(|| {
            let found = find_font(SYSTEM_FONTS);
            match &found {
                Some(path) => tracing::debug!("using system font {}", path.display()),
                None => tracing::warn!(
                    "no TrueType font configured or installed, letters like č, š and ž will not render; set font_path in the settings"
                ),
            }
            found
        });
        Self { font_path }
    }
}

fn find_font<P: AsRef<Path>>(candidates: &[P]) -> Option<PathBuf> {
    candidates
        .iter()
        .map(AsRef::<Path>::as_ref)
        .find(|path| path.is_file())
        .map(Path::to_path_buf)
}

#[async_trait]
impl DocumentRenderer for PdfRenderer {
    async fn ready(&self) -> Result<(), RenderError> {
        if let Some(path) = &self.font_path {
            tokio::fs::metadata(path)
                .await
                .map_err(|e| RenderError::Unavailable(format!("font {}: {}", path.display(), e)))?;
        }
        Ok(())
    }

    async fn render(&self, document: &TimesheetDocument, path: &Path) -> Result<(), RenderError> {
        let document = document.clone();
        let path = path.to_path_buf();
        let font_path = self.font_path.clone();

        tokio::task::spawn_blocking(move || write_pdf(&document, &path, font_path.as_deref()))
            .await
            .map_err(|e| RenderError::backend(e.to_string()))?
    }
}

fn line(layer: &PdfLayerReference, from: (f32, f32), to: (f32, f32)) {
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(from.0), Mm(from.1)), false),
            (Point::new(Mm(to.0), Mm(to.1)), false),
        ],
        is_closed: false,
    });
}

fn row(layer: &PdfLayerReference, cells: [&str; 5], y: f32, size: f32, font: &IndirectFontRef) {
    for (text, x) in cells.iter().zip(COLUMN_X) {
        if !text.is_empty() {
            layer.use_text(*text, size, Mm(x), Mm(y), font);
        }
    }
}

fn table_header(layer: &PdfLayerReference, document: &TimesheetDocument, y: f32, fonts: &Fonts) {
    row(layer, document.columns, y, 8.0, &fonts.bold);
    line(layer, (MARGIN, y - 2.0), (PAGE_WIDTH - MARGIN, y - 2.0));
}

fn write_pdf(
    document: &TimesheetDocument,
    path: &Path,
    font_path: Option<&Path>,
) -> Result<(), RenderError> {
    let (doc, page, layer) = PdfDocument::new(
        document.title.as_str(),
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        LAYER,
    );
    let fonts = Fonts::load(&doc, font_path)?;

    let mut layer = doc.get_page(page).get_layer(layer);
    let mut y = PAGE_HEIGHT - MARGIN;
    layer.use_text(document.title.as_str(), 16.0, Mm(MARGIN), Mm(y), &fonts.bold);
    y -= 8.0;
    layer.use_text(document.subtitle.as_str(), 11.0, Mm(MARGIN), Mm(y), &fonts.regular);
    y -= 12.0;
    table_header(&layer, document, y, &fonts);
    y -= ROW_HEIGHT + 1.0;

    for entry in &document.rows {
        if y < MARGIN + ROW_HEIGHT * 2.0 {
            let (page, next) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER);
            layer = doc.get_page(page).get_layer(next);
            y = PAGE_HEIGHT - MARGIN;
            table_header(&layer, document, y, &fonts);
            y -= ROW_HEIGHT + 1.0;
        }
        row(&layer, entry.cells(), y, 9.0, &fonts.regular);
        y -= ROW_HEIGHT;
    }

    let rule = y + ROW_HEIGHT - 2.0;
    line(&layer, (MARGIN, rule), (PAGE_WIDTH - MARGIN, rule));
    y -= 1.0;
    row(&layer, document.totals.cells(), y, 9.0, &fonts.bold);

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    doc.save(&mut writer).map_err(|e| RenderError::backend(e.to_string()))?;
    Ok(())
}
