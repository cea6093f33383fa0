//! Message selection, decoration and ordering
//!
//! Steps run in this order: sender scope (which also decorates), sort by
//! last update, then the time window. No step duplicates a message, and
//! only the scope and window predicates drop one.

use super::options::ExportOptions;
use crate::api::{Message, User};
use crate::directory::Directory;
use crate::types::{SenderScope, SortOrder, TimeRange};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// A message joined with its sender's details
#[derive(Debug, Clone, PartialEq)]
pub struct DecoratedMessage {
    pub message: Message,
    /// `"given family"`, empty when the sender is unknown
    pub sender_name: String,
    /// Empty when the sender is unknown
    pub sender_email: String,
}

impl DecoratedMessage {
    pub fn sender_id(&self) -> &str {
        self.message.sender_id.as_deref().unwrap_or_default()
    }

    pub fn body(&self) -> &str {
        self.message.text.as_deref().unwrap_or_default()
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.message.updated_at
    }
}

/// Join each message with the first user whose id matches its sender
pub fn decorate<'a>(
    messages: Vec<Message>,
    users: impl IntoIterator<Item = &'a User>,
) -> Vec<DecoratedMessage> {
    let mut lookup: HashMap<&str, &User> = HashMap::new();
    for user in users {
        lookup.entry(user.id.as_str()).or_insert(user);
    }

    messages
        .into_iter()
        .map(|message| {
            let sender = message
                .sender_id
                .as_deref()
                .and_then(|id| lookup.get(id).copied());
            let (sender_name, sender_email) = match sender {
                Some(user) => (user.full_name(), user.email.clone().unwrap_or_default()),
                None => (String::new(), String::new()),
            };
            DecoratedMessage {
                message,
                sender_name,
                sender_email,
            }
        })
        .collect()
}

/// Keep the messages whose sender is in `users`
fn sent_by(messages: Vec<Message>, users: &[User]) -> Vec<Message> {
    messages
        .into_iter()
        .filter(|message| {
            message
                .sender_id
                .as_deref()
                .is_some_and(|id| users.iter().any(|user| user.id == id))
        })
        .collect()
}

/// Apply the sender scope and decorate from the matching user tables
pub fn select_senders(
    messages: Vec<Message>,
    scope: SenderScope,
    directory: &Directory,
) -> Vec<DecoratedMessage> {
    match scope {
        SenderScope::Client => decorate(sent_by(messages, &directory.clients), &directory.clients),
        SenderScope::Internal => decorate(
            sent_by(messages, &directory.internal_users),
            &directory.internal_users,
        ),
        SenderScope::InternalAndClient => decorate(
            messages,
            directory.clients.iter().chain(&directory.internal_users),
        ),
    }
}

/// Stable sort by last update; messages without one sort as the oldest
pub fn sort_messages(messages: &mut [DecoratedMessage], order: SortOrder) {
    match order {
        SortOrder::Ascending => messages.sort_by(|a, b| a.updated_at().cmp(&b.updated_at())),
        SortOrder::Descending => messages.sort_by(|a, b| b.updated_at().cmp(&a.updated_at())),
    }
}

/// Whether a message falls inside `range` as seen at `now`
///
/// Ages are whole days rounded down. Messages without a last update are
/// only kept by the unbounded range.
pub fn within_time_range(
    updated_at: Option<DateTime<Utc>>,
    range: TimeRange,
    now: DateTime<Utc>,
) -> bool {
    let Some(max_days) = range.max_age_days() else {
        return true;
    };
    let Some(updated_at) = updated_at else {
        return false;
    };
    let age_days = (now - updated_at)
        .num_milliseconds()
        .div_euclid(MILLIS_PER_DAY);
    age_days <= max_days
}

/// Drop messages outside `range`
pub fn apply_time_range(
    messages: Vec<DecoratedMessage>,
    range: TimeRange,
    now: DateTime<Utc>,
) -> Vec<DecoratedMessage> {
    messages
        .into_iter()
        .filter(|message| within_time_range(message.updated_at(), range, now))
        .collect()
}

/// Run the whole selection for one export
pub fn prepare(
    messages: Vec<Message>,
    directory: &Directory,
    options: &ExportOptions,
    now: DateTime<Utc>,
) -> Vec<DecoratedMessage> {
    let mut selected = select_senders(messages, options.sender_scope, directory);
    sort_messages(&mut selected, options.effective_sort_order());
    apply_time_range(selected, options.time_range, now)
}
