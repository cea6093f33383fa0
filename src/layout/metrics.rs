//! Text measurement and line wrapping

use super::types::{pt_to_mm, FontStyle};

/// Measures rendered text width
pub trait TextMetrics: Send + Sync {
    /// Width in millimetres of `text` set in `font` at `size_pt`
    fn text_width(&self, text: &str, font: FontStyle, size_pt: f64) -> f64;

    /// Greedily wrap `text` into lines no wider than `max_width`
    ///
    /// Newlines start a new paragraph. A word wider than a whole line is
    /// broken between characters. Blank text yields no lines.
    fn wrap(&self, text: &str, font: FontStyle, size_pt: f64, max_width: f64) -> Vec<String> {
        let mut lines = Vec::new();
        if text.trim().is_empty() {
            return lines;
        }

        let fits = |candidate: &str| self.text_width(candidate, font, size_pt) <= max_width;

        for paragraph in text.split('\n') {
            let paragraph = paragraph.trim_end_matches('\r');
            let mut current = String::new();

            for word in paragraph.split_whitespace() {
                let candidate = if current.is_empty() {
                    word.to_string()
                } else {
                    format!("{current} {word}")
                };
                if fits(&candidate) {
                    current = candidate;
                    continue;
                }

                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                if fits(word) {
                    current = word.to_string();
                    continue;
                }

                for ch in word.chars() {
                    current.push(ch);
                    if !fits(&current) && current.chars().count() > 1 {
                        current.pop();
                        lines.push(std::mem::take(&mut current));
                        current.push(ch);
                    }
                }
            }

            lines.push(current);
        }

        lines
    }
}

/// Advance widths of the standard PDF Helvetica faces
///
/// Widths are in thousandths of the font size for code points 32..=126;
/// anything else is measured as 556.
#[derive(Debug, Clone, Copy, Default)]
pub struct HelveticaMetrics;

const FALLBACK_WIDTH: u16 = 556;

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

impl HelveticaMetrics {
    fn advance(ch: char, font: FontStyle) -> u16 {
        let table = match font {
            FontStyle::Regular => &HELVETICA,
            FontStyle::Bold => &HELVETICA_BOLD,
        };
        (ch as usize)
            .checked_sub(32)
            .and_then(|index| table.get(index))
            .copied()
            .unwrap_or(FALLBACK_WIDTH)
    }
}

impl TextMetrics for HelveticaMetrics {
    fn text_width(&self, text: &str, font: FontStyle, size_pt: f64) -> f64 {
        let units: u32 = text.chars().map(|ch| u32::from(Self::advance(ch, font))).sum();
        f64::from(units) / 1000.0 * pt_to_mm(size_pt)
    }
}
