//! Layout types
//!
//! Page geometry, the rows handed to the paginator, and the draw
//! instructions it produces. All lengths are millimetres measured from the
//! top-left corner of the page; text positions are baselines.

use serde::{Deserialize, Serialize};

/// Convert a font size in points to millimetres
pub fn pt_to_mm(pt: f64) -> f64 {
    pt * 25.4 / 72.0
}

// ============================================================================
// Layout Configuration
// ============================================================================

/// Page geometry and spacing constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub page_width: f64,
    pub page_height: f64,
    pub margin_left: f64,
    pub margin_right: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
    /// Baseline of the "Page N" header
    pub header_baseline: f64,
    pub header_font_size: f64,
    pub title_font_size: f64,
    pub name_font_size: f64,
    pub body_font_size: f64,
    pub attachment_font_size: f64,
    /// Space above and below the text inside a block
    pub block_padding: f64,
    /// Horizontal distance between the block border and its text
    pub text_inset: f64,
    pub name_body_gap: f64,
    /// Vertical space between consecutive blocks
    pub row_spacing: f64,
    /// Space between the preamble and the first block
    pub preamble_gap: f64,
    pub line_height_factor: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_width: 210.0,
            page_height: 297.0,
            margin_left: 10.0,
            margin_right: 10.0,
            margin_top: 20.0,
            margin_bottom: 20.0,
            header_baseline: 10.0,
            header_font_size: 12.0,
            title_font_size: 12.0,
            name_font_size: 12.0,
            body_font_size: 10.0,
            attachment_font_size: 8.0,
            block_padding: 4.0,
            text_inset: 3.0,
            name_body_gap: 2.0,
            row_spacing: 6.0,
            preamble_gap: 6.0,
            line_height_factor: 1.15,
        }
    }
}

impl LayoutConfig {
    /// Width between the left and right margins
    pub fn content_width(&self) -> f64 {
        self.page_width - self.margin_left - self.margin_right
    }

    /// Width available to text inside a message block
    pub fn block_text_width(&self) -> f64 {
        self.content_width() - 2.0 * self.text_inset
    }

    /// Lowest offset content may reach on a page
    pub fn content_limit(&self) -> f64 {
        self.page_height - self.margin_bottom
    }

    /// Height of one line of text at `size_pt`
    pub fn line_height(&self, size_pt: f64) -> f64 {
        pt_to_mm(size_pt) * self.line_height_factor
    }
}

// ============================================================================
// Inputs
// ============================================================================

/// One message as it appears in the document
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MessageRow {
    pub sender_id: String,
    pub sender_name: String,
    pub sender_email: String,
    /// Already formatted for display
    pub timestamp: String,
    pub body: String,
    pub has_attachment: bool,
}

/// Content printed once at the top of the first page
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentPreamble {
    /// Channel display name
    pub title: String,
    /// Formatted generation time
    pub generated_at: String,
}

// ============================================================================
// Draw Instructions
// ============================================================================

/// Font face used for a run of text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
}

/// Colour role of a draw instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Black text
    Normal,
    /// Grey secondary text
    Muted,
    /// Light grey block border
    Border,
}

/// A single positioned drawing instruction
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Text with its left edge at `x` and its baseline at `y`
    Text {
        text: String,
        x: f64,
        y: f64,
        font: FontStyle,
        size_pt: f64,
        tone: Tone,
    },
    /// Stroked rectangle with its top-left corner at (`x`, `y`)
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        tone: Tone,
    },
}

impl DrawOp {
    /// Text content, if this is a text instruction
    pub fn text(&self) -> Option<&str> {
        match self {
            DrawOp::Text { text, .. } => Some(text),
            DrawOp::Rect { .. } => None,
        }
    }
}

/// One output page and everything drawn on it
#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutPage {
    /// 1-based page number
    pub number: u32,
    pub ops: Vec<DrawOp>,
}

impl LaidOutPage {
    pub(crate) fn new(number: u32) -> Self {
        Self {
            number,
            ops: Vec::new(),
        }
    }

    /// Text of every text instruction on this page, in draw order
    pub fn texts(&self) -> Vec<&str> {
        self.ops.iter().filter_map(DrawOp::text).collect()
    }
}

/// Where a message block ended up
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedBlock {
    /// Index of the row in the input sequence
    pub row: usize,
    pub page: u32,
    /// Offset of the block's top edge
    pub top: f64,
    pub height: f64,
}

impl PlacedBlock {
    /// Offset of the block's bottom edge
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Result of laying out a document
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LaidOutDocument {
    pub pages: Vec<LaidOutPage>,
    pub blocks: Vec<PlacedBlock>,
}

impl LaidOutDocument {
    /// Number of pages
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}
