//! Error taxonomy for the assembly pipeline.
//!
//! Every failure surfaces to the immediate caller of the operation that
//! detected it; there are no retries and no fallbacks. A failed operation
//! never leaves a partial fragment in the document.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that the crate can generate.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// A referenced resource (image or content file) does not exist.
    #[error("resource not found: {}", .0.display())]
    ResourceNotFound(PathBuf),

    /// A script template raised during evaluation (missing variable,
    /// malformed tag, unknown directive).
    #[error("template evaluation failed in {}: {message}", .path.display())]
    TemplateEvaluation { path: PathBuf, message: String },

    /// The external PDF or barcode engine failed or produced no output.
    #[error("render engine error: {0}")]
    RenderEngine(String),

    /// A file existed at check time but could not be read.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DocumentError>;
