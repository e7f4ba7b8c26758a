//! HTTP delivery wrapper for rendered PDF bytes.
//!
//! Pure boundary glue: a byte payload plus the four transport headers. The
//! core never translates errors into HTTP responses; that stays with the
//! caller.

use std::fmt;

/// Content-Disposition type for the delivery headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Disposition {
    /// Display in the browser (default).
    #[default]
    Inline,
    /// Force a download.
    Attachment,
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Disposition::Inline => f.write_str("inline"),
            Disposition::Attachment => f.write_str("attachment"),
        }
    }
}

/// A rendered PDF packaged as a binary HTTP response.
///
/// The filename is interpolated into the Content-Disposition header
/// verbatim; a filename containing `"` produces a malformed header value.
#[derive(Debug, Clone)]
pub struct PdfResponse {
    body: Vec<u8>,
    content_disposition: String,
}

impl PdfResponse {
    pub fn new(body: Vec<u8>, filename: &str, disposition: Disposition) -> Self {
        let content_disposition = format!("{disposition}; filename=\"{filename}\"");
        Self {
            body,
            content_disposition,
        }
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn into_body(self) -> Vec<u8> {
        self.body
    }

    pub fn content_type(&self) -> &'static str {
        "application/pdf"
    }

    pub fn content_length(&self) -> usize {
        self.body.len()
    }

    pub fn content_disposition(&self) -> &str {
        &self.content_disposition
    }

    pub fn cache_control(&self) -> &'static str {
        "private, max-age=0, must-revalidate"
    }

    /// The four transport headers in a form any HTTP layer can consume.
    pub fn headers(&self) -> [(&'static str, String); 4] {
        [
            ("Content-Type", self.content_type().to_string()),
            ("Content-Length", self.content_length().to_string()),
            ("Content-Disposition", self.content_disposition.clone()),
            ("Cache-Control", self.cache_control().to_string()),
        ]
    }
}
