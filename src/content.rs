//! Content loader – resolves caller input into content fragments.
//!
//! Each input is classified exactly once into one of three variants and
//! then dispatched through a closed match:
//!
//! - [`ContentClass::ScriptTemplate`] – an existing file with the template
//!   extension; evaluated against the variable context ([`crate::template`]).
//! - [`ContentClass::RawFile`] – any other existing file; its bytes are
//!   appended verbatim.
//! - [`ContentClass::Literal`] – everything else; the string itself is the
//!   fragment.

use std::path::{Path, PathBuf};

use crate::document::Document;
use crate::error::{DocumentError, Result};
use crate::files::Filesystem;
use crate::template::{evaluate, Vars};

/// File extension marking a script template (matched case-insensitively).
pub const TEMPLATE_EXTENSION: &str = "tpl";

/// How a single content input is to be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentClass {
    /// The input string is the fragment.
    Literal(String),
    /// An existing non-template file whose bytes are used verbatim.
    RawFile(PathBuf),
    /// An existing file with the template extension.
    ScriptTemplate(PathBuf),
}

/// Classify `input` against the filesystem. Decided once per input; the
/// extension comparison happens nowhere else.
pub fn classify(input: &str, fs: &dyn Filesystem) -> ContentClass {
    let path = Path::new(input);
    if fs.is_file(path) {
        let is_template = fs
            .extension(path)
            .map(|e| e.eq_ignore_ascii_case(TEMPLATE_EXTENSION))
            .unwrap_or(false);
        if is_template {
            ContentClass::ScriptTemplate(path.to_path_buf())
        } else {
            ContentClass::RawFile(path.to_path_buf())
        }
    } else {
        ContentClass::Literal(input.to_string())
    }
}

impl Document {
    /// Resolve `input` into one fragment and append it.
    ///
    /// Script templates are evaluated with `vars` bound into their scope and
    /// a handle back to this document for the producer directives. On a
    /// template failure the partially captured output is discarded and
    /// nothing is appended. Identical repeated calls append independent
    /// fragments.
    pub fn add_content(&mut self, input: impl AsRef<str>, vars: &Vars) -> Result<()> {
        let input = input.as_ref();
        match classify(input, self.filesystem()) {
            ContentClass::Literal(markup) => {
                self.push_fragment(markup);
            }
            ContentClass::RawFile(path) => {
                let bytes = self.filesystem().read(&path)?;
                self.push_fragment(String::from_utf8_lossy(&bytes).into_owned());
            }
            ContentClass::ScriptTemplate(path) => {
                let bytes = self.filesystem().read(&path)?;
                let source = String::from_utf8(bytes).map_err(|_| {
                    DocumentError::TemplateEvaluation {
                        path: path.clone(),
                        message: "template is not valid UTF-8".to_string(),
                    }
                })?;
                log::debug!("evaluating template {}", path.display());
                let fragment = evaluate(&source, &path, vars, self)?;
                self.push_fragment(fragment);
            }
        }
        Ok(())
    }

    /// Resolve several inputs with the same variable context, preserving
    /// iteration order. Stops at the first failure.
    pub fn add_contents<I, S>(&mut self, inputs: I, vars: &Vars) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for input in inputs {
            self.add_content(input, vars)?;
        }
        Ok(())
    }
}
