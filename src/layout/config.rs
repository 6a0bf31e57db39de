//! # Page Configuration
//!
//! Page geometry and composer settings.
//!
//! ## Page geometry
//!
//! ```text
//! y=0     ┌──────────────── 800 ────────────────┐
//!         │ page 1: header block (0..450)        │
//!         │ page 2+: top margin (0..100)         │
//! y=450/100 ├─ content window ───────────────────┤
//!         │                                      │
//! y=1000  ├──────────────────────────────────────┤
//! y=1030  │   footer / disclaimer (700×40)       │
//! y=1100  └──────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```
//! use folio::layout::PageBoundary;
//!
//! let page = PageBoundary::LETTER_PORTRAIT;
//! assert_eq!(page.content_start_y(1), 450.0);
//! assert_eq!(page.content_start_y(2), 100.0);
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::document::canvas::default_disclaimer;
use crate::error::{FolioError, Result};
use crate::geometry::{Point, Size};

/// Vertical content window and footer slot of a fixed-size page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageBoundary {
    /// Page width in document units.
    pub page_width: f32,
    /// Page height in document units.
    pub page_height: f32,
    /// Content start on page 1 (below the property header block).
    pub first_page_content_start: f32,
    /// Content start on every later page.
    pub content_start: f32,
    /// Content must end above this line to leave room for the footer.
    pub content_end: f32,
    pub footer_x: f32,
    pub footer_y: f32,
    pub footer_width: f32,
    pub footer_height: f32,
}

impl PageBoundary {
    /// # 800×1100 portrait page
    ///
    /// | Property | Value |
    /// |----------|-------|
    /// | Page | 800 × 1100 |
    /// | Content, page 1 | 450 .. 1000 |
    /// | Content, page 2+ | 100 .. 1000 |
    /// | Footer | (50, 1030), 700 × 40 |
    pub const LETTER_PORTRAIT: Self = Self {
        page_width: 800.0,
        page_height: 1100.0,
        first_page_content_start: 450.0,
        content_start: 100.0,
        content_end: 1000.0,
        footer_x: 50.0,
        footer_y: 1030.0,
        footer_width: 700.0,
        footer_height: 40.0,
    };

    /// Where content starts on `page` (1-based).
    pub fn content_start_y(&self, page: u32) -> f32 {
        if page <= 1 {
            self.first_page_content_start
        } else {
            self.content_start
        }
    }

    pub fn page_size(&self) -> Size {
        Size::new(self.page_width, self.page_height)
    }

    pub fn footer_position(&self) -> Point {
        Point::new(self.footer_x, self.footer_y)
    }

    pub fn footer_size(&self) -> Size {
        Size::new(self.footer_width, self.footer_height)
    }

    /// Reject geometry the layout engine cannot make progress on.
    pub fn validate(&self) -> Result<()> {
        if self.page_width <= 0.0 || self.page_height <= 0.0 {
            return Err(FolioError::Config("page size must be positive".to_string()));
        }
        let starts = [self.first_page_content_start, self.content_start];
        if starts.iter().any(|&start| start < 0.0 || start >= self.content_end) {
            return Err(FolioError::Config(format!(
                "content window is empty: starts {:?}, end {}",
                starts, self.content_end
            )));
        }
        if self.content_end > self.page_height {
            return Err(FolioError::Config(format!(
                "content end {} is below the page bottom {}",
                self.content_end, self.page_height
            )));
        }
        Ok(())
    }
}

impl Default for PageBoundary {
    fn default() -> Self {
        Self::LETTER_PORTRAIT
    }
}

fn default_heading() -> String {
    "Explore Every Room in Detail".to_string()
}

/// Composer settings, loadable from a JSON file.
///
/// Every field is optional in the file:
///
/// ```
/// use folio::layout::ComposerConfig;
///
/// let config: ComposerConfig = serde_json::from_str(r#"{"page": {"content_end": 980}}"#).unwrap();
/// assert_eq!(config.page.content_end, 980.0);
/// assert_eq!(config.page.footer_y, 1030.0);
/// assert_eq!(config.heading, "Explore Every Room in Detail");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposerConfig {
    pub page: PageBoundary,
    /// Heading placed above the first room.
    pub heading: String,
    /// Footer text used when the canvas has no shared disclaimer to copy.
    pub disclaimer: String,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            page: PageBoundary::default(),
            heading: default_heading(),
            disclaimer: default_disclaimer(),
        }
    }
}

impl ComposerConfig {
    /// Load and validate a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)
            .map_err(|e| FolioError::Config(format!("{}: {}", path.display(), e)))?;
        config.page.validate()?;
        Ok(config)
    }
}
