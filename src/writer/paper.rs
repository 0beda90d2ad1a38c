//! Paper sizes and page orientation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::Rect;

/// Named paper size in points (1 inch = 72 points).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPaperSize")]
pub struct PaperSize {
    name: String,
    width: f64,
    height: f64,
}

impl PaperSize {
    /// Create a paper size. Both dimensions must be positive and finite.
    pub fn new(name: impl Into<String>, width: f64, height: f64) -> Result<Self> {
        let name = name.into();
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(Error::InvalidPaperSize(format!(
                "{} must have positive dimensions, got {} x {}",
                name, width, height
            )));
        }
        Ok(Self {
            name,
            width,
            height,
        })
    }

    fn known(name: &str, width: f64, height: f64) -> Self {
        Self {
            name: name.to_string(),
            width,
            height,
        }
    }

    /// US Letter (8.5" x 11").
    pub fn letter() -> Self {
        Self::known("Letter", 612.0, 792.0)
    }

    /// US Legal (8.5" x 14").
    pub fn legal() -> Self {
        Self::known("Legal", 612.0, 1008.0)
    }

    /// A3 (297mm x 420mm).
    pub fn a3() -> Self {
        Self::known("A3", 841.89, 1190.55)
    }

    /// A4 (210mm x 297mm).
    pub fn a4() -> Self {
        Self::known("A4", 595.28, 841.89)
    }

    /// A5 (148mm x 210mm).
    pub fn a5() -> Self {
        Self::known("A5", 420.94, 595.28)
    }

    /// Look up a standard size by name, case-insensitively.
    pub fn standard(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "letter" => Some(Self::letter()),
            "legal" => Some(Self::legal()),
            "a3" => Some(Self::a3()),
            "a4" => Some(Self::a4()),
            "a5" => Some(Self::a5()),
            _ => None,
        }
    }

    /// Paper name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Width in points.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Height in points.
    pub fn height(&self) -> f64 {
        self.height
    }
}

#[derive(Deserialize)]
struct RawPaperSize {
    name: String,
    width: f64,
    height: f64,
}

impl TryFrom<RawPaperSize> for PaperSize {
    type Error = Error;

    fn try_from(raw: RawPaperSize) -> Result<Self> {
        PaperSize::new(raw.name, raw.width, raw.height)
    }
}

/// Page orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Long side vertical
    #[default]
    Portrait,
    /// Long side horizontal
    Landscape,
}

impl Orientation {
    /// Page box for `paper` in this orientation.
    ///
    /// Portrait puts the shorter side horizontally, landscape the longer one.
    pub fn page_box(&self, paper: &PaperSize) -> Rect {
        let short = paper.width().min(paper.height());
        let long = paper.width().max(paper.height());
        match self {
            Orientation::Portrait => Rect::from_size(short, long),
            Orientation::Landscape => Rect::from_size(long, short),
        }
    }
}

impl FromStr for Orientation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "p" | "portrait" => Ok(Orientation::Portrait),
            "l" | "landscape" => Ok(Orientation::Landscape),
            _ => Err(Error::InvalidOrientation(s.to_string())),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Portrait => write!(f, "portrait"),
            Orientation::Landscape => write!(f, "landscape"),
        }
    }
}
