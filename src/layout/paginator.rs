//! Document paginator
//!
//! Places variable-height message blocks onto fixed-size pages. Blocks are
//! never split: a block that would cross the bottom margin moves to the top
//! of the next page.

use super::metrics::{HelveticaMetrics, TextMetrics};
use super::types::{
    pt_to_mm, DocumentPreamble, DrawOp, FontStyle, LaidOutDocument, LaidOutPage, LayoutConfig,
    MessageRow, PlacedBlock, Tone,
};
use std::collections::HashSet;
use tracing::debug;

/// Text drawn when there is nothing to export
pub const EMPTY_DOCUMENT_TEXT: &str = "No messages found";

/// Label drawn in the bottom padding of blocks with an attachment
pub const ATTACHMENT_LABEL: &str = "Attachment included";

const ELLIPSIS: &str = "...";

/// Position of the next block
struct PageCursor {
    page: u32,
    offset: f64,
    /// Nothing has been placed below the header yet
    fresh: bool,
}

impl PageCursor {
    fn first(config: &LayoutConfig) -> Self {
        Self {
            page: 1,
            offset: config.margin_top,
            fresh: true,
        }
    }

    fn advance_page(&mut self, config: &LayoutConfig) {
        self.page += 1;
        self.offset = config.margin_top;
        self.fresh = true;
    }
}

/// Wrapped text and measured height of one block
struct MeasuredBlock {
    name: Vec<String>,
    body: Vec<String>,
    name_height: f64,
    height: f64,
}

/// Lays message rows out across pages
#[derive(Debug, Clone)]
pub struct DocumentPaginator<M = HelveticaMetrics> {
    config: LayoutConfig,
    metrics: M,
}

impl DocumentPaginator<HelveticaMetrics> {
    /// Create a paginator measuring text with the Helvetica faces
    pub fn new(config: LayoutConfig) -> Self {
        Self::with_metrics(config, HelveticaMetrics)
    }
}

impl<M: TextMetrics> DocumentPaginator<M> {
    /// Create a paginator with custom text metrics
    pub fn with_metrics(config: LayoutConfig, metrics: M) -> Self {
        Self { config, metrics }
    }

    /// Layout configuration in use
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Text metrics in use
    pub fn metrics(&self) -> &M {
        &self.metrics
    }

    /// Measured height of the block for `row`
    pub fn block_height(&self, row: &MessageRow) -> f64 {
        self.measure(row).height
    }

    /// Lay out a whole document
    pub fn layout(&self, preamble: &DocumentPreamble, rows: &[MessageRow]) -> LaidOutDocument {
        let config = &self.config;
        let mut document = LaidOutDocument::default();

        if rows.is_empty() {
            let mut page = LaidOutPage::new(1);
            page.ops.push(DrawOp::Text {
                text: EMPTY_DOCUMENT_TEXT.to_string(),
                x: config.margin_left,
                y: config.margin_top,
                font: FontStyle::Regular,
                size_pt: config.body_font_size,
                tone: Tone::Normal,
            });
            document.pages.push(page);
            return document;
        }

        let mut cursor = PageCursor::first(config);
        let mut page = self.start_page(cursor.page);
        self.place_preamble(&mut page, &mut cursor, preamble, rows);

        for (index, row) in rows.iter().enumerate() {
            let block = self.measure(row);

            if !cursor.fresh && cursor.offset + block.height > config.content_limit() {
                cursor.advance_page(config);
                let finished = std::mem::replace(&mut page, self.start_page(cursor.page));
                document.pages.push(finished);
            }

            let top = cursor.offset;
            self.place_block(&mut page, top, row, &block);
            document.blocks.push(PlacedBlock {
                row: index,
                page: cursor.page,
                top,
                height: block.height,
            });

            cursor.offset = top + block.height + config.row_spacing;
            cursor.fresh = false;
        }

        document.pages.push(page);
        debug!(
            "Laid out {} messages on {} pages",
            rows.len(),
            document.page_count()
        );
        document
    }

    // ========================================================================
    // Pages and preamble
    // ========================================================================

    fn start_page(&self, number: u32) -> LaidOutPage {
        let mut page = LaidOutPage::new(number);
        page.ops.push(DrawOp::Text {
            text: format!("Page {number}"),
            x: self.config.margin_left,
            y: self.config.header_baseline,
            font: FontStyle::Bold,
            size_pt: self.config.header_font_size,
            tone: Tone::Normal,
        });
        page
    }

    fn place_preamble(
        &self,
        page: &mut LaidOutPage,
        cursor: &mut PageCursor,
        preamble: &DocumentPreamble,
        rows: &[MessageRow],
    ) {
        let config = &self.config;
        let width = config.content_width();
        let x = config.margin_left;

        let title = self
            .metrics
            .wrap(&preamble.title, FontStyle::Bold, config.title_font_size, width);
        cursor.offset += self.write_lines(
            page,
            &title,
            x,
            cursor.offset,
            (FontStyle::Bold, config.title_font_size),
            Tone::Normal,
        );

        let generated = format!("Print copy generated on {}", preamble.generated_at);
        let participants = participants_line(rows);
        for text in [generated, participants] {
            let lines = self
                .metrics
                .wrap(&text, FontStyle::Regular, config.body_font_size, width);
            cursor.offset += self.write_lines(
                page,
                &lines,
                x,
                cursor.offset,
                (FontStyle::Regular, config.body_font_size),
                Tone::Normal,
            );
        }

        cursor.offset += config.preamble_gap;
        cursor.fresh = false;
    }

    // ========================================================================
    // Message blocks
    // ========================================================================

    fn measure(&self, row: &MessageRow) -> MeasuredBlock {
        let config = &self.config;
        let width = config.block_text_width();

        let name_width = (width - self.timestamp_reserve(row)).max(width / 2.0);
        let name = self.metrics.wrap(
            &row.sender_name,
            FontStyle::Bold,
            config.name_font_size,
            name_width,
        );
        let body = self
            .metrics
            .wrap(&row.body, FontStyle::Regular, config.body_font_size, width);

        let name_height = name.len() as f64 * config.line_height(config.name_font_size);
        let body_height = body.len() as f64 * config.line_height(config.body_font_size);
        let height = config.block_padding
            + name_height
            + config.name_body_gap
            + body_height
            + config.block_padding;

        MeasuredBlock {
            name,
            body,
            name_height,
            height,
        }
    }

    fn place_block(&self, page: &mut LaidOutPage, top: f64, row: &MessageRow, block: &MeasuredBlock) {
        let config = &self.config;
        let left = config.margin_left + config.text_inset;
        let right = config.margin_left + config.content_width() - config.text_inset;
        let name_top = top + config.block_padding;
        let first_baseline = name_top + pt_to_mm(config.name_font_size);

        page.ops.push(DrawOp::Rect {
            x: config.margin_left,
            y: top,
            width: config.content_width(),
            height: block.height,
            tone: Tone::Border,
        });

        self.write_lines(
            page,
            &block.name,
            left,
            name_top,
            (FontStyle::Bold, config.name_font_size),
            Tone::Normal,
        );

        if !row.sender_email.is_empty() {
            let name_width = block.name.first().map_or(0.0, |line| {
                self.metrics
                    .text_width(line, FontStyle::Bold, config.name_font_size)
                    + self.space_width()
            });
            let x = left + name_width;
            let available = right - self.timestamp_reserve(row) - x;
            let email = self.clip_to_width(
                &row.sender_email,
                FontStyle::Regular,
                config.body_font_size,
                available,
            );
            if let Some(text) = email {
                page.ops.push(DrawOp::Text {
                    text,
                    x,
                    y: first_baseline,
                    font: FontStyle::Regular,
                    size_pt: config.body_font_size,
                    tone: Tone::Muted,
                });
            }
        }

        if !row.timestamp.is_empty() {
            self.push_right_aligned(
                page,
                &row.timestamp,
                right,
                first_baseline,
                config.body_font_size,
                Tone::Muted,
            );
        }

        let body_top = name_top + block.name_height + config.name_body_gap;
        self.write_lines(
            page,
            &block.body,
            left,
            body_top,
            (FontStyle::Regular, config.body_font_size),
            Tone::Normal,
        );

        if row.has_attachment {
            let label_height = pt_to_mm(config.attachment_font_size);
            let baseline = top + block.height - (config.block_padding - label_height) / 2.0;
            self.push_right_aligned(
                page,
                ATTACHMENT_LABEL,
                right,
                baseline,
                config.attachment_font_size,
                Tone::Muted,
            );
        }
    }

    // ========================================================================
    // Text helpers
    // ========================================================================

    fn space_width(&self) -> f64 {
        self.metrics
            .text_width(" ", FontStyle::Regular, self.config.body_font_size)
    }

    /// Width kept free for the right-aligned timestamp on the first line
    fn timestamp_reserve(&self, row: &MessageRow) -> f64 {
        if row.timestamp.is_empty() {
            return 0.0;
        }
        self.metrics
            .text_width(&row.timestamp, FontStyle::Regular, self.config.body_font_size)
            + self.space_width()
    }

    /// `text` cut down to `max_width` with a trailing ellipsis, `None` if
    /// not even the ellipsis fits
    fn clip_to_width(
        &self,
        text: &str,
        font: FontStyle,
        size_pt: f64,
        max_width: f64,
    ) -> Option<String> {
        if self.metrics.text_width(text, font, size_pt) <= max_width {
            return Some(text.to_string());
        }

        let mut clipped = text.to_string();
        while clipped.pop().is_some() {
            let candidate = format!("{clipped}{ELLIPSIS}");
            if self.metrics.text_width(&candidate, font, size_pt) <= max_width {
                return Some(candidate);
            }
        }
        let ellipsis_fits = self.metrics.text_width(ELLIPSIS, font, size_pt) <= max_width;
        ellipsis_fits.then(|| ELLIPSIS.to_string())
    }

    /// Draw wrapped lines starting at `top`, returning the height used
    fn write_lines(
        &self,
        page: &mut LaidOutPage,
        lines: &[String],
        x: f64,
        top: f64,
        (font, size_pt): (FontStyle, f64),
        tone: Tone,
    ) -> f64 {
        let line_height = self.config.line_height(size_pt);
        let ascent = pt_to_mm(size_pt);

        for (i, line) in lines.iter().enumerate() {
            page.ops.push(DrawOp::Text {
                text: line.clone(),
                x,
                y: top + ascent + i as f64 * line_height,
                font,
                size_pt,
                tone,
            });
        }

        lines.len() as f64 * line_height
    }

    fn push_right_aligned(
        &self,
        page: &mut LaidOutPage,
        text: &str,
        right: f64,
        baseline: f64,
        size_pt: f64,
        tone: Tone,
    ) {
        let width = self.metrics.text_width(text, FontStyle::Regular, size_pt);
        page.ops.push(DrawOp::Text {
            text: text.to_string(),
            x: right - width,
            y: baseline,
            font: FontStyle::Regular,
            size_pt,
            tone,
        });
    }
}

/// "Current participants: ..." with one entry per distinct sender
fn participants_line(rows: &[MessageRow]) -> String {
    let mut seen = HashSet::new();
    let participants: Vec<String> = rows
        .iter()
        .filter(|row| seen.insert(row.sender_id.as_str()))
        .map(|row| format!("{} ({})", row.sender_name, row.sender_email))
        .collect();
    format!("Current participants: {}", participants.join(", "))
}

