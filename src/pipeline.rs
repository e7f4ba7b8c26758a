//! Page geometry and the pre-render character pass.
//!
//! [`PageSize`] and [`Orientation`] are handed verbatim to the external
//! renderer; the assembly pipeline itself never lays anything out.
//! [`EntityTable`] is the configurable raw-character → markup-entity
//! substitution applied to the assembled HTML just before rendering.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Paper format names understood by the external renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PageSize {
    #[default]
    A4,
    A3,
    A5,
    Letter,
    Legal,
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PageSize::A4 => "A4",
            PageSize::A3 => "A3",
            PageSize::A5 => "A5",
            PageSize::Letter => "letter",
            PageSize::Legal => "legal",
        };
        f.write_str(name)
    }
}

impl FromStr for PageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "a4" => Ok(PageSize::A4),
            "a3" => Ok(PageSize::A3),
            "a5" => Ok(PageSize::A5),
            "letter" => Ok(PageSize::Letter),
            "legal" => Ok(PageSize::Legal),
            other => Err(format!("unknown page size: {other}")),
        }
    }
}

/// Page orientation for the generated PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    /// Portrait mode: height > width (default).
    #[default]
    Portrait,
    /// Landscape mode: width > height.
    Landscape,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Portrait => f.write_str("portrait"),
            Orientation::Landscape => f.write_str("landscape"),
        }
    }
}

/// Raw-character → markup-entity replacements applied to the assembled HTML
/// before it reaches the renderer.
///
/// The table starts empty; it exists so callers can normalize characters a
/// particular engine mishandles without touching the assembly stage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityTable {
    entries: BTreeMap<char, String>,
}

impl EntityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a replacement. Later inserts for the same character win.
    pub fn insert(&mut self, raw: char, entity: impl Into<String>) -> &mut Self {
        self.entries.insert(raw, entity.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Apply every registered replacement to `html`.
    pub fn apply(&self, html: &str) -> String {
        if self.entries.is_empty() {
            return html.to_string();
        }
        let mut out = String::with_capacity(html.len());
        for c in html.chars() {
            match self.entries.get(&c) {
                Some(entity) => out.push_str(entity),
                None => out.push(c),
            }
        }
        out
    }
}
