//! Records returned by the messaging platform
//!
//! Only identifiers, timestamps and join keys carry meaning for an export.
//! Every field may be absent; a missing `id` deserializes as empty and the
//! record is left out of lookups.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Participant structure of a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipType {
    Individual,
    Group,
    Company,
    #[serde(other)]
    Unknown,
}

/// A conversation thread
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageChannel {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub id: String,
    #[serde(default)]
    pub membership_type: Option<MembershipType>,
    /// Client or company the channel belongs to
    #[serde(default)]
    pub membership_entity_id: Option<String>,
    /// Client ids participating in a group channel
    #[serde(default)]
    pub member_ids: Option<Vec<String>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A client or internal user
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub id: String,
    #[serde(default)]
    pub given_name: Option<String>,
    #[serde(default)]
    pub family_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub company_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl User {
    /// Whether the record can be joined on
    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }

    /// `"given family"` with whichever parts are present
    pub fn full_name(&self) -> String {
        format!(
            "{} {}",
            self.given_name.as_deref().unwrap_or_default(),
            self.family_name.as_deref().unwrap_or_default()
        )
        .trim()
        .to_string()
    }

    /// `"given family"` only when both parts are present and non-empty
    pub fn complete_name(&self) -> Option<String> {
        match (self.given_name.as_deref(), self.family_name.as_deref()) {
            (Some(given), Some(family)) if !given.is_empty() && !family.is_empty() => {
                Some(format!("{given} {family}"))
            }
            _ => None,
        }
    }
}

/// A client company
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// A single message in a channel
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub id: String,
    #[serde(default)]
    pub channel_id: Option<String>,
    #[serde(default)]
    pub sender_id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub is_attachment_included: Option<bool>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Message {
    /// Whether the message carries a file
    pub fn has_attachment(&self) -> bool {
        self.is_attachment_included.unwrap_or(false)
    }
}
