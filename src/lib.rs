//! # docpress – fragment-based HTML document assembly
//!
//! This crate builds an HTML document from ordered style entries and content
//! fragments, then hands it to a pluggable engine for PDF rendering. The
//! pipeline stages are:
//!
//! 1. **Collect** – append styles and content fragments ([`document`])
//! 2. **Load** – classify content inputs as literal markup, raw files, or
//!    script templates, and resolve them ([`content`], [`template`])
//! 3. **Assemble** – concatenate everything into the fixed head + body
//!    skeleton ([`assemble`])
//! 4. **Render** – entity pass, then the external PDF engine ([`pipeline`],
//!    [`engine`])
//! 5. **Deliver** – package the bytes with HTTP headers ([`response`])
//!
//! The PDF engine, barcode encoder, and filesystem are collaborator traits;
//! the crate never lays out or paginates HTML itself.

pub mod assemble;
pub mod content;
pub mod document;
pub mod engine;
pub mod error;
pub mod files;
pub mod pipeline;
pub mod response;
pub mod samples;
pub mod template;

// Re-exports for convenience
pub use document::{Document, StyleEntry, DEFAULT_STYLE};
pub use engine::{BarcodeEncoder, PdfEngine, Symbology};
pub use error::{DocumentError, Result};
pub use pipeline::{EntityTable, Orientation, PageSize};
pub use response::{Disposition, PdfResponse};
pub use template::Vars;
