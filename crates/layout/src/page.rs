use serde::{Deserialize, Deserializer, Serialize, de};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown page size '{0}', expected A4 or Letter")]
pub struct UnknownPageSize(pub String);

/// Paper sizes the document can be printed on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum PageSize {
    #[default]
    A4,
    Letter,
}

impl PageSize {
    /// Width and height in points.
    pub fn dimensions_pt(&self) -> (f32, f32) {
        match self {
            PageSize::A4 => (595.28, 841.89),
            PageSize::Letter => (612.0, 792.0),
        }
    }
}

impl FromStr for PageSize {
    type Err = UnknownPageSize;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "a4" => Ok(PageSize::A4),
            "letter" => Ok(PageSize::Letter),
            _ => Err(UnknownPageSize(s.to_string())),
        }
    }
}

/// Accepts the same spellings as [`FromStr`], so config files, environment
/// overrides and CLI flags agree.
impl<'de> Deserialize<'de> for PageSize {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageSize::A4 => f.write_str("A4"),
            PageSize::Letter => f.write_str("Letter"),
        }
    }
}

/// Page size plus margins, all in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageGeometry {
    pub size: PageSize,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub margin_right: f32,
}

impl PageGeometry {
    pub fn new(size: PageSize) -> Self {
        Self { size, margin_top: 36.0, margin_bottom: 36.0, margin_left: 40.0, margin_right: 40.0 }
    }

    pub fn width(&self) -> f32 {
        self.size.dimensions_pt().0
    }

    pub fn height(&self) -> f32 {
        self.size.dimensions_pt().1
    }

    pub fn content_width(&self) -> f32 {
        self.width() - self.margin_left - self.margin_right
    }

    pub fn content_height(&self) -> f32 {
        self.height() - self.margin_top - self.margin_bottom
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::new(PageSize::A4)
    }
}
