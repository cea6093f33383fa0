//! CSV output writer

use crate::error::Result;
use crate::export::DecoratedMessage;
use chrono::TimeZone;
use std::fmt::Display;
use std::io::Write;

use super::format_timestamp;

/// Column headers, in order
pub const CSV_HEADERS: [&str; 4] = ["Sender Name", "Sender Email", "Time Stamp", "Message"];

/// Write messages as CSV: one header row, then one row per message
///
/// The timestamp column holds the last-updated time formatted in `tz`, or is
/// empty when the message has none.
pub fn write_csv<W, Tz>(messages: &[DecoratedMessage], writer: W, tz: &Tz) -> Result<()>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut writer = ::csv::Writer::from_writer(writer);
    writer.write_record(CSV_HEADERS)?;

    for message in messages {
        let timestamp = message
            .updated_at()
            .map(|ts| format_timestamp(&ts, tz))
            .unwrap_or_default();
        writer.write_record([
            message.sender_name.as_str(),
            message.sender_email.as_str(),
            timestamp.as_str(),
            message.body(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Serialize messages to CSV bytes
pub fn csv_bytes<Tz>(messages: &[DecoratedMessage], tz: &Tz) -> Result<Vec<u8>>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut buffer = Vec::new();
    write_csv(messages, &mut buffer, tz)?;
    Ok(buffer)
}
