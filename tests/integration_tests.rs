//! Integration tests for the docpress assembly pipeline.
//!
//! These tests validate:
//! - Style and content ordering through assembly
//! - Content classification (literal / raw file / script template)
//! - Fragment producer markup
//! - Rendering determinism
//! - The PDF engine seam and HTTP delivery headers

use std::fs;
use std::io::Write;

use sha2::{Digest, Sha256};
use tempfile::TempDir;

use docpress::{
    Disposition, Document, DocumentError, EntityTable, Orientation, PageSize, PdfEngine,
    Symbology, Vars,
};

// =====================================================================
// Helpers
// =====================================================================

/// An engine that embeds its inputs into a recognizable payload.
struct EchoEngine;

impl PdfEngine for EchoEngine {
    fn render(
        &self,
        html: &str,
        page_size: PageSize,
        orientation: Orientation,
    ) -> docpress::Result<Vec<u8>> {
        Ok(format!("%PDF-echo {page_size} {orientation}\n{html}").into_bytes())
    }
}

/// An engine that returns no bytes at all.
struct EmptyEngine;

impl PdfEngine for EmptyEngine {
    fn render(&self, _: &str, _: PageSize, _: Orientation) -> docpress::Result<Vec<u8>> {
        Ok(Vec::new())
    }
}

/// An encoder that checks the fixed geometry and returns stand-in bytes.
struct StubEncoder;

impl docpress::BarcodeEncoder for StubEncoder {
    fn encode(
        &self,
        value: &str,
        _symbology: Symbology,
        bar_width: u32,
        height: u32,
    ) -> docpress::Result<Vec<u8>> {
        assert_eq!(bar_width, 1, "narrow-bar width is fixed at 1");
        assert_eq!(height, 40, "bar height is fixed at 40");
        Ok(value.as_bytes().to_vec())
    }
}

fn no_vars() -> Vars {
    Vars::new()
}

/// The text between `<style>` and `</style>` in an assembled document.
fn style_blob(html: &str) -> &str {
    let start = html.find("<style>\n").expect("style open") + "<style>\n".len();
    let end = html.find("</style>").expect("style close");
    &html[start..end]
}

/// The text between `<body>` and `</body>` in an assembled document.
fn body_blob(html: &str) -> &str {
    let start = html.find("<body>\n").expect("body open") + "<body>\n".len();
    let end = html.find("</body>").expect("body close");
    &html[start..end]
}

// =====================================================================
// Style sequence
// =====================================================================

#[test]
fn style_blob_preserves_call_order_with_default_first() {
    let mut doc = Document::new();
    doc.add_style("h1 { color: red }");
    doc.add_style("h2 { color: blue }");

    let html = doc.render_html().unwrap();
    let blob = style_blob(&html);

    let default_pos = blob.find(".page-break").expect("default style present");
    let first = blob.find("h1 { color: red }").unwrap();
    let second = blob.find("h2 { color: blue }").unwrap();
    assert!(default_pos < first && first < second);
    assert_eq!(blob, format!("{}\nh1 {{ color: red }}\nh2 {{ color: blue }}\n", docpress::DEFAULT_STYLE));
}

#[test]
fn duplicate_styles_are_repeated_not_deduplicated() {
    let mut doc = Document::new();
    doc.add_style("p { margin: 0 }");
    doc.add_style("p { margin: 0 }");

    let html = doc.render_html().unwrap();
    assert_eq!(style_blob(&html).matches("p { margin: 0 }").count(), 2);
}

#[test]
fn file_backed_style_is_read_at_assembly_time() {
    let dir = TempDir::new().unwrap();
    let css_path = dir.path().join("extra.css");
    fs::write(&css_path, "em { font-style: italic }").unwrap();

    let mut doc = Document::new();
    doc.add_style(css_path.to_str().unwrap());

    let html = doc.render_html().unwrap();
    assert!(style_blob(&html).contains("em { font-style: italic }"));
}

// =====================================================================
// Content sequence
// =====================================================================

#[test]
fn body_blob_is_newline_join_of_fragments_in_call_order() {
    let mut doc = Document::new();
    doc.add_content("<p>one</p>", &no_vars()).unwrap();
    doc.add_content("<p>two</p>", &no_vars()).unwrap();
    doc.add_content("<p>three</p>", &no_vars()).unwrap();

    let html = doc.render_html().unwrap();
    assert_eq!(body_blob(&html), "<p>one</p>\n<p>two</p>\n<p>three</p>\n");
}

#[test]
fn list_inputs_expand_in_place_between_sibling_calls() {
    let mut doc = Document::new();
    doc.add_content("<p>before</p>", &no_vars()).unwrap();
    doc.add_contents(["<p>a</p>", "<p>b</p>"], &no_vars()).unwrap();
    doc.add_content("<p>after</p>", &no_vars()).unwrap();

    assert_eq!(
        doc.fragments(),
        ["<p>before</p>", "<p>a</p>", "<p>b</p>", "<p>after</p>"]
    );
}

#[test]
fn raw_file_content_is_included_verbatim() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("partial.html");
    fs::write(&path, "<section>from disk</section>").unwrap();

    let mut doc = Document::new();
    doc.add_content(path.to_str().unwrap(), &no_vars()).unwrap();

    assert_eq!(doc.fragments(), ["<section>from disk</section>"]);
}

#[test]
fn template_file_is_evaluated_with_variables() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("greeting.tpl");
    fs::write(&path, "<p>Hello {{ name }}!</p>").unwrap();

    let mut doc = Document::new();
    let mut vars = Vars::new();
    vars.insert("name".to_string(), serde_json::json!("World"));
    doc.add_content(path.to_str().unwrap(), &vars).unwrap();

    assert_eq!(doc.fragments(), ["<p>Hello World!</p>"]);
}

#[test]
fn template_extension_is_matched_case_insensitively() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("upper.TPL");
    fs::write(&path, "<p>{{ x }}</p>").unwrap();

    let mut doc = Document::new();
    let mut vars = Vars::new();
    vars.insert("x".to_string(), serde_json::json!(7));
    doc.add_content(path.to_str().unwrap(), &vars).unwrap();

    assert_eq!(doc.fragments(), ["<p>7</p>"]);
}

#[test]
fn failed_template_appends_no_fragment() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.tpl");
    fs::write(&path, "<p>start</p>{{ missing }}").unwrap();

    let mut doc = Document::new();
    let err = doc.add_content(path.to_str().unwrap(), &no_vars()).unwrap_err();
    assert!(matches!(err, DocumentError::TemplateEvaluation { .. }));
    assert!(doc.fragments().is_empty(), "no partial fragment on failure");
}

#[test]
fn producer_directives_land_before_the_captured_template_fragment() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("spaced.tpl");
    fs::write(&path, "<p>body</p>{% space 8 %}").unwrap();

    let mut doc = Document::new();
    doc.add_content("<p>first</p>", &no_vars()).unwrap();
    doc.add_content(path.to_str().unwrap(), &no_vars()).unwrap();
    doc.add_content("<p>last</p>", &no_vars()).unwrap();

    assert_eq!(
        doc.fragments(),
        [
            "<p>first</p>",
            "<div style=\"height: 8px\"></div>",
            "<p>body</p>",
            "<p>last</p>",
        ]
    );
}

#[test]
fn mixed_inputs_resolve_in_call_order() {
    let dir = TempDir::new().unwrap();
    let raw = dir.path().join("middle.html");
    fs::write(&raw, "<p>file</p>").unwrap();

    let mut doc = Document::new();
    doc.add_contents(
        ["<p>literal</p>".to_string(), raw.to_str().unwrap().to_string()],
        &no_vars(),
    )
    .unwrap();

    let html = doc.render_html().unwrap();
    assert_eq!(body_blob(&html), "<p>literal</p>\n<p>file</p>\n");
}

#[test]
fn injected_filesystem_backs_content_resolution() {
    use std::collections::HashMap;
    use std::io;
    use std::path::Path;

    /// In-memory filesystem fake.
    struct MemFs(HashMap<&'static str, &'static str>);

    impl docpress::files::Filesystem for MemFs {
        fn exists(&self, path: &Path) -> bool {
            self.0.contains_key(path.to_str().unwrap_or_default())
        }
        fn is_file(&self, path: &Path) -> bool {
            self.exists(path)
        }
        fn extension(&self, path: &Path) -> Option<String> {
            path.extension().and_then(|e| e.to_str()).map(String::from)
        }
        fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
            self.0
                .get(path.to_str().unwrap_or_default())
                .map(|s| s.as_bytes().to_vec())
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "gone"))
        }
    }

    let mut store = HashMap::new();
    store.insert("virtual/hello.tpl", "<p>Hi {{ who }}</p>");
    store.insert("virtual/footer.html", "<footer>end</footer>");

    let mut doc = Document::with_filesystem(Box::new(MemFs(store)));
    let mut vars = Vars::new();
    vars.insert("who".to_string(), serde_json::json!("there"));
    doc.add_content("virtual/hello.tpl", &vars).unwrap();
    doc.add_content("virtual/footer.html", &no_vars()).unwrap();

    assert_eq!(doc.fragments(), ["<p>Hi there</p>", "<footer>end</footer>"]);
}

// =====================================================================
// Fragment producers
// =====================================================================

#[test]
fn dashed_rule_spacers_are_half_the_input() {
    let mut doc = Document::new();
    doc.dashed_rule(40.0);
    let frag = &doc.fragments()[0];
    assert_eq!(frag.matches("height: 20px").count(), 2);
}

#[test]
fn new_page_marker_sits_between_its_neighbours() {
    let mut doc = Document::new();
    doc.add_content("<p>page 1</p>", &no_vars()).unwrap();
    doc.new_page();
    doc.add_content("<p>page 2</p>", &no_vars()).unwrap();

    let html = doc.render_html().unwrap();
    let body = body_blob(&html);
    assert_eq!(body.matches(r#"<div class="page-break"></div>"#).count(), 1);
    assert_eq!(
        body,
        "<p>page 1</p>\n<div class=\"page-break\"></div>\n<p>page 2</p>\n"
    );
}

#[test]
fn image_uses_lowercased_extension_verbatim() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("photo.JPG");
    let mut file = fs::File::create(&path).unwrap();
    file.write_all(&[0xFF, 0xD8, 0xFF, 0xE0]).unwrap();

    let doc = Document::new();
    let uri = doc.image(&path).unwrap();
    assert!(uri.starts_with("data:image/jpg;base64,"));
}

#[test]
fn image_missing_file_fails_without_mutation() {
    let mut doc = Document::new();
    doc.add_content("<p>kept</p>", &no_vars()).unwrap();

    let before = doc.fragments().len();
    let err = doc.image("/nowhere/logo.png").unwrap_err();
    assert!(matches!(err, DocumentError::ResourceNotFound(_)));
    assert_eq!(doc.fragments().len(), before);
}

#[test]
fn barcode_returns_png_data_uri_without_appending() {
    let mut doc = Document::new();
    doc.set_barcode_encoder(Box::new(StubEncoder));

    let uri = doc.barcode("0123456789", Symbology::Code128).unwrap();
    assert!(uri.starts_with("data:image/png;base64,"));
    assert!(doc.fragments().is_empty());

    // The caller places the value into a fragment.
    doc.add_content(format!("<img src=\"{uri}\">"), &no_vars()).unwrap();
    assert_eq!(doc.fragments().len(), 1);
}

// =====================================================================
// Assembly
// =====================================================================

#[test]
fn render_html_is_deterministic() {
    let mut doc = Document::new();
    doc.set_title("Stability");
    doc.add_style("p { margin: 2px }");
    doc.add_content("<p>same</p>", &no_vars()).unwrap();

    let first = doc.render_html().unwrap();
    let second = doc.render_html().unwrap();
    assert_eq!(first, second);

    let digest_a = Sha256::digest(first.as_bytes());
    let digest_b = Sha256::digest(second.as_bytes());
    assert_eq!(digest_a, digest_b);
}

#[test]
fn render_reflects_mutation_between_calls() {
    let mut doc = Document::new();
    doc.add_content("<p>one</p>", &no_vars()).unwrap();
    let first = doc.render_html().unwrap();

    doc.add_content("<p>two</p>", &no_vars()).unwrap();
    let second = doc.render_html().unwrap();

    assert!(!first.contains("<p>two</p>"));
    assert!(second.contains("<p>two</p>"));
}

#[test]
fn title_and_content_round_trip() {
    let mut doc = Document::new();
    doc.set_title("Invoice");
    doc.add_content("<p>Hello</p>", &no_vars()).unwrap();

    let html = doc.render_html().unwrap();
    assert_eq!(html.matches("<title>Invoice</title>").count(), 1);
    assert_eq!(html.matches("<p>Hello</p>").count(), 1);

    let head_end = html.find("</head>").unwrap();
    assert!(html.find("<p>Hello</p>").unwrap() > head_end);
}

// =====================================================================
// Render pipeline and delivery
// =====================================================================

#[test]
fn engine_receives_page_geometry() {
    let mut doc = Document::new();
    doc.set_page_size(PageSize::Letter);
    doc.set_orientation(Orientation::Landscape);
    doc.add_content("<p>geo</p>", &no_vars()).unwrap();

    let bytes = doc.render_pdf(&EchoEngine, None).unwrap();
    let payload = String::from_utf8(bytes).unwrap();
    assert!(payload.starts_with("%PDF-echo letter landscape\n"));
    assert!(payload.contains("<p>geo</p>"));
}

#[test]
fn empty_engine_output_is_a_render_error() {
    let doc = Document::new();
    let err = doc.render_pdf(&EmptyEngine, None).unwrap_err();
    assert!(matches!(err, DocumentError::RenderEngine(_)));
}

#[test]
fn entity_override_rewrites_characters_before_rendering() {
    let mut doc = Document::new();
    doc.add_content("<p>€100</p>", &no_vars()).unwrap();

    let mut table = EntityTable::new();
    table.insert('€', "&#0128;");

    let bytes = doc.render_pdf(&EchoEngine, Some(&table)).unwrap();
    let payload = String::from_utf8(bytes).unwrap();
    assert!(payload.contains("&#0128;100"));
    assert!(!payload.contains('€'));
}

#[test]
fn document_owned_entity_table_applies_without_override() {
    let mut doc = Document::new();
    doc.add_content("<p>•</p>", &no_vars()).unwrap();
    doc.entities_mut().insert('•', "&bull;");

    let bytes = doc.render_pdf(&EchoEngine, None).unwrap();
    let payload = String::from_utf8(bytes).unwrap();
    assert!(payload.contains("<p>&bull;</p>"));
}

#[test]
fn pdf_response_carries_the_four_delivery_headers() {
    let mut doc = Document::new();
    doc.add_content("<p>deliver</p>", &no_vars()).unwrap();

    let response = doc
        .pdf(&EchoEngine, "report.pdf", Disposition::Inline, None)
        .unwrap();

    assert_eq!(response.content_type(), "application/pdf");
    assert_eq!(response.content_length(), response.body().len());
    assert_eq!(response.content_disposition(), "inline; filename=\"report.pdf\"");
    assert_eq!(response.cache_control(), "private, max-age=0, must-revalidate");
}
