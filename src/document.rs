//! Document – the top-level aggregate of the assembly pipeline.
//!
//! A [`Document`] owns an ordered sequence of style entries and an ordered
//! sequence of content fragments, both append-only. Fragments enter the
//! sequence through the content loader ([`crate::content`]) or through the
//! fragment producers defined here; styles through [`Document::add_style`].
//! Rendering ([`Document::render_html`], [`Document::render_pdf`]) reads the
//! current state without mutating it, so a document can be extended and
//! re-rendered.

use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD as BASE64_STD, Engine as _};

use crate::assemble::assemble;
use crate::engine::{BarcodeEncoder, PdfEngine, Symbology};
use crate::error::{DocumentError, Result};
use crate::files::{Filesystem, OsFilesystem};
use crate::pipeline::{EntityTable, Orientation, PageSize};
use crate::response::{Disposition, PdfResponse};

/// The bundled base stylesheet, seeded as the first style entry of every
/// new document. Defines `.page-break` among other defaults.
pub const DEFAULT_STYLE: &str = include_str!("../resource/base.css");

/// Narrow-bar module width passed to the barcode encoder.
const BARCODE_BAR_WIDTH: u32 = 1;
/// Bar height passed to the barcode encoder.
const BARCODE_HEIGHT: u32 = 40;

/// One CSS source in the style sequence.
///
/// Entries concatenate in insertion order, each followed by a newline, with
/// no deduplication. File-backed entries are read at assembly time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleEntry {
    /// Inline CSS text.
    Inline(String),
    /// A stylesheet file, resolved through the filesystem when the document
    /// is assembled.
    File(PathBuf),
}

/// The document aggregate: title, page geometry, styles, and content
/// fragments, plus the injected external collaborators.
pub struct Document {
    title: Option<String>,
    page_size: PageSize,
    orientation: Orientation,
    styles: Vec<StyleEntry>,
    fragments: Vec<String>,
    entities: EntityTable,
    fs: Box<dyn Filesystem>,
    barcodes: Option<Box<dyn BarcodeEncoder>>,
}

impl Document {
    /// Create an empty document backed by the real filesystem, with the
    /// bundled base stylesheet pre-seeded as the first style entry.
    pub fn new() -> Self {
        Self::with_filesystem(Box::new(OsFilesystem))
    }

    /// Create a document with an injected filesystem collaborator.
    pub fn with_filesystem(fs: Box<dyn Filesystem>) -> Self {
        Self {
            title: None,
            page_size: PageSize::default(),
            orientation: Orientation::default(),
            styles: vec![StyleEntry::Inline(DEFAULT_STYLE.to_string())],
            fragments: Vec::new(),
            entities: EntityTable::new(),
            fs,
            barcodes: None,
        }
    }

    /// Install the barcode encoder used by [`Document::barcode`] and the
    /// `{% barcode %}` template directive.
    pub fn set_barcode_encoder(&mut self, encoder: Box<dyn BarcodeEncoder>) {
        self.barcodes = Some(encoder);
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.page_size = page_size;
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The style sequence in insertion order, default entry first.
    pub fn styles(&self) -> &[StyleEntry] {
        &self.styles
    }

    /// The content fragments in insertion order.
    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    /// Mutable entity table applied before rendering (empty by default).
    pub fn entities_mut(&mut self) -> &mut EntityTable {
        &mut self.entities
    }

    pub(crate) fn filesystem(&self) -> &dyn Filesystem {
        self.fs.as_ref()
    }

    pub(crate) fn push_fragment(&mut self, fragment: String) {
        log::debug!("appending fragment ({} bytes)", fragment.len());
        self.fragments.push(fragment);
    }

    // ── Styles ────────────────────────────────────────────────────────────

    /// Append one style entry. An argument naming an existing file becomes a
    /// file-backed entry; anything else is taken as inline CSS. No
    /// validation, no deduplication.
    pub fn add_style(&mut self, style: impl AsRef<str>) {
        let style = style.as_ref();
        let path = Path::new(style);
        let entry = if self.fs.is_file(path) {
            StyleEntry::File(path.to_path_buf())
        } else {
            StyleEntry::Inline(style.to_string())
        };
        self.styles.push(entry);
    }

    /// Append several style entries, preserving iteration order.
    pub fn add_styles<I, S>(&mut self, styles: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for style in styles {
            self.add_style(style);
        }
    }

    // ── Fragment producers ────────────────────────────────────────────────

    /// Append a page-break marker fragment.
    pub fn new_page(&mut self) {
        self.push_fragment(r#"<div class="page-break"></div>"#.to_string());
    }

    /// Append a dashed horizontal rule with `size_px / 2` of space above and
    /// below, so the whole block occupies `size_px` vertically. The value is
    /// passed through verbatim; range checking is the caller's business.
    pub fn dashed_rule(&mut self, size_px: f64) {
        let half = fmt_px(size_px / 2.0);
        let div = format!(
            "<div>\
             <div style=\"height: {half}px\"></div>\
             <div style=\"border-bottom: dashed 1px #000\"></div>\
             <div style=\"height: {half}px\"></div>\
             </div>"
        );
        self.push_fragment(div);
    }

    /// Append a single empty block of the given height.
    pub fn vertical_space(&mut self, size_px: f64) {
        let height = fmt_px(size_px);
        self.push_fragment(format!("<div style=\"height: {height}px\"></div>"));
    }

    /// Encode `value` as a barcode image and return it as a
    /// `data:image/png;base64,...` URI.
    ///
    /// This produces a value for the caller to place into a fragment (via a
    /// literal `add_content` or template interpolation); it does not mutate
    /// the content sequence.
    pub fn barcode(&self, value: &str, symbology: Symbology) -> Result<String> {
        let encoder = self.barcodes.as_ref().ok_or_else(|| {
            DocumentError::RenderEngine("no barcode encoder configured".to_string())
        })?;
        let png = encoder.encode(value, symbology, BARCODE_BAR_WIDTH, BARCODE_HEIGHT)?;
        if png.is_empty() {
            return Err(DocumentError::RenderEngine(
                "barcode encoder produced no output".to_string(),
            ));
        }
        Ok(format!("data:image/png;base64,{}", BASE64_STD.encode(png)))
    }

    /// Read the image at `path` and return it as a
    /// `data:image/<ext>;base64,...` URI.
    ///
    /// The MIME suffix is the file extension lower-cased verbatim; the bytes
    /// are not sniffed. Fails with [`DocumentError::ResourceNotFound`] when
    /// the path does not resolve to an existing file. Non-mutating, like
    /// [`Document::barcode`].
    pub fn image(&self, path: impl AsRef<Path>) -> Result<String> {
        let path = path.as_ref();
        if !self.fs.exists(path) {
            return Err(DocumentError::ResourceNotFound(path.to_path_buf()));
        }
        let ext = self
            .fs
            .extension(path)
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        let bytes = self.fs.read(path)?;
        Ok(format!(
            "data:image/{ext};base64,{}",
            BASE64_STD.encode(bytes)
        ))
    }

    // ── Rendering ─────────────────────────────────────────────────────────

    /// Assemble the full HTML document from the current style and content
    /// sequences. Deterministic for a given state; no caching.
    pub fn render_html(&self) -> Result<String> {
        assemble(
            self.title.as_deref().unwrap_or(""),
            &self.styles,
            &self.fragments,
            self.fs.as_ref(),
        )
    }

    /// Assemble, run the entity pass, and hand the result to `engine`.
    ///
    /// `entities` overrides the document's own table when given. An engine
    /// returning no bytes is treated as a failure; no partial PDF is ever
    /// returned.
    pub fn render_pdf(
        &self,
        engine: &dyn PdfEngine,
        entities: Option<&EntityTable>,
    ) -> Result<Vec<u8>> {
        let html = self.render_html()?;
        let html = entities.unwrap_or(&self.entities).apply(&html);
        log::debug!(
            "rendering {} bytes of HTML as {} {}",
            html.len(),
            self.page_size,
            self.orientation
        );
        let pdf = engine.render(&html, self.page_size, self.orientation)?;
        if pdf.is_empty() {
            return Err(DocumentError::RenderEngine(
                "PDF engine produced no output".to_string(),
            ));
        }
        Ok(pdf)
    }

    /// Render and package the PDF bytes for HTTP delivery.
    pub fn pdf(
        &self,
        engine: &dyn PdfEngine,
        filename: &str,
        disposition: Disposition,
        entities: Option<&EntityTable>,
    ) -> Result<PdfResponse> {
        let body = self.render_pdf(engine, entities)?;
        Ok(PdfResponse::new(body, filename, disposition))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a pixel value, dropping the fraction when it is whole so that
/// `40.0` renders as `40px` rather than `40px`-with-decimals.
fn fmt_px(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
