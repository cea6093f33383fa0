//! Document layout
//!
//! Turns an ordered list of message rows into positioned draw instructions
//! on fixed-size pages. The output is independent of any PDF library; the
//! renderer in `output::pdf` only replays the instructions.
//!
//! # Example
//!
//! ```
//! use message_exporter::layout::{DocumentPaginator, DocumentPreamble, LayoutConfig, MessageRow};
//!
//! let paginator = DocumentPaginator::new(LayoutConfig::default());
//! let rows = vec![MessageRow {
//!     sender_id: "u1".into(),
//!     sender_name: "Ann Lee".into(),
//!     body: "hello".into(),
//!     ..Default::default()
//! }];
//! let document = paginator.layout(&DocumentPreamble::default(), &rows);
//! assert_eq!(document.page_count(), 1);
//! ```

mod metrics;
mod paginator;
mod types;

pub use metrics::{HelveticaMetrics, TextMetrics};
pub use paginator::{DocumentPaginator, ATTACHMENT_LABEL, EMPTY_DOCUMENT_TEXT};
pub use types::{
    pt_to_mm, DocumentPreamble, DrawOp, FontStyle, LaidOutDocument, LaidOutPage, LayoutConfig,
    MessageRow, PlacedBlock, Tone,
};
