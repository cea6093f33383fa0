//! PDF renderer
//!
//! Replays the draw instructions of a [`LaidOutDocument`] onto `printpdf`
//! pages. Layout coordinates are measured from the top of the page; PDF
//! coordinates from the bottom.

use crate::error::{Error, Result};
use crate::export::DecoratedMessage;
use crate::layout::{DrawOp, FontStyle, LaidOutDocument, LayoutConfig, MessageRow, Tone};
use chrono::TimeZone;
use printpdf::path::PaintMode;
use printpdf::{BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, Rect, Rgb};
use std::fmt::Display;
use tracing::debug;

use super::format_timestamp;

const LAYER_NAME: &str = "Layer 1";
const BORDER_THICKNESS: f32 = 0.3;

/// Convert prepared messages into layout rows
pub fn message_rows<Tz>(messages: &[DecoratedMessage], tz: &Tz) -> Vec<MessageRow>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    messages
        .iter()
        .map(|message| MessageRow {
            sender_id: message.sender_id().to_string(),
            sender_name: message.sender_name.clone(),
            sender_email: message.sender_email.clone(),
            timestamp: message
                .updated_at()
                .map(|ts| format_timestamp(&ts, tz))
                .unwrap_or_default(),
            body: message.body().to_string(),
            has_attachment: message.message.has_attachment(),
        })
        .collect()
}

fn tone_color(tone: Tone) -> Color {
    let level = match tone {
        Tone::Normal => 0.0,
        Tone::Muted => 100.0 / 255.0,
        Tone::Border => 200.0 / 255.0,
    };
    Color::Rgb(Rgb::new(level, level, level, None))
}

fn pdf_error(err: impl Display) -> Error {
    Error::pdf(err.to_string())
}

/// Render a laid-out document to PDF bytes
pub fn render_pdf(document: &LaidOutDocument, config: &LayoutConfig, title: &str) -> Result<Vec<u8>> {
    let width = Mm(config.page_width as f32);
    let height = Mm(config.page_height as f32);
    let flip = |y: f64| Mm((config.page_height - y) as f32);

    let (doc, first_page, first_layer) = PdfDocument::new(title, width, height, LAYER_NAME);
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(pdf_error)?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(pdf_error)?;

    for (index, page) in document.pages.iter().enumerate() {
        let (page_index, layer_index) = if index == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(width, height, LAYER_NAME)
        };
        let layer = doc.get_page(page_index).get_layer(layer_index);

        for op in &page.ops {
            match op {
                DrawOp::Text {
                    text,
                    x,
                    y,
                    font: style,
                    size_pt,
                    tone,
                } => {
                    let font: &IndirectFontRef = match style {
                        FontStyle::Regular => &regular,
                        FontStyle::Bold => &bold,
                    };
                    layer.set_fill_color(tone_color(*tone));
                    layer.use_text(text.as_str(), *size_pt as f32, Mm(*x as f32), flip(*y), font);
                }
                DrawOp::Rect {
                    x,
                    y,
                    width,
                    height,
                    tone,
                } => {
                    layer.set_outline_color(tone_color(*tone));
                    layer.set_outline_thickness(BORDER_THICKNESS);
                    let rect = Rect::new(
                        Mm(*x as f32),
                        flip(y + height),
                        Mm((x + width) as f32),
                        flip(*y),
                    )
                    .with_mode(PaintMode::Stroke);
                    layer.add_rect(rect);
                }
            }
        }
    }

    let bytes = doc.save_to_bytes().map_err(pdf_error)?;
    debug!(
        "Rendered {} pages into {} bytes",
        document.page_count(),
        bytes.len()
    );
    Ok(bytes)
}
