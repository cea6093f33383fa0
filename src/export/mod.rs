//! Export options and message preparation
//!
//! Turns the raw messages of a channel into the decorated, filtered and
//! ordered sequence that is written to CSV or laid out as PDF.

mod options;
mod pipeline;

pub use options::{ExportOptions, NO_CHANNEL_MESSAGE};
pub use pipeline::{
    apply_time_range, decorate, prepare, select_senders, sort_messages, within_time_range,
    DecoratedMessage,
};
