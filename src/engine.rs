//! External conversion engines.
//!
//! The pipeline treats both the HTML → PDF renderer and the barcode encoder
//! as opaque conversion functions behind traits. A failure in either
//! surfaces directly; there is no retry or backoff.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::pipeline::{Orientation, PageSize};

/// An external HTML → PDF renderer.
///
/// Implementations receive the fully assembled HTML document together with
/// the page geometry and return the finished PDF bytes.
pub trait PdfEngine {
    fn render(&self, html: &str, page_size: PageSize, orientation: Orientation) -> Result<Vec<u8>>;
}

/// Barcode symbologies understood by the encoder seam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Symbology {
    /// Code 128 (default, matches the classic invoice/label use case).
    #[default]
    Code128,
    Code39,
    Ean13,
    QrCode,
}

impl Symbology {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "code128" => Some(Symbology::Code128),
            "code39" => Some(Symbology::Code39),
            "ean13" => Some(Symbology::Ean13),
            "qrcode" | "qr" => Some(Symbology::QrCode),
            _ => None,
        }
    }
}

/// An external barcode encoder producing PNG bytes.
///
/// `bar_width` is the narrow-bar module width and `height` the bar height,
/// both in encoder units.
pub trait BarcodeEncoder {
    fn encode(
        &self,
        value: &str,
        symbology: Symbology,
        bar_width: u32,
        height: u32,
    ) -> Result<Vec<u8>>;
}
