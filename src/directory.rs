//! Lookup tables loaded from the platform
//!
//! The directory holds every channel, client, company and internal user so
//! messages can be joined to their senders and channels can be given a
//! display name.

use crate::api::{Company, MembershipType, MessageChannel, MessagingApi, User};
use crate::error::Result;
use crate::pagination::PaginatedFetcher;
use serde::Serialize;
use tracing::info;

/// Name used when a channel's participants cannot be resolved
pub const UNNAMED_CHANNEL: &str = "Unnamed Channel";

/// Name used for a group member without a complete name
pub const UNKNOWN_USER: &str = "Unknown User";

/// A channel as offered for export
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelSummary {
    pub id: String,
    pub name: String,
    pub membership_type: MembershipType,
}

/// Every lookup table needed for an export
#[derive(Debug, Clone, Default)]
pub struct Directory {
    pub channels: Vec<MessageChannel>,
    pub clients: Vec<User>,
    pub companies: Vec<Company>,
    pub internal_users: Vec<User>,
}

impl Directory {
    /// Fetch all lookup tables, one resource after another
    pub async fn load(api: &MessagingApi, fetcher: &PaginatedFetcher) -> Result<Self> {
        let mut channels = fetcher.fetch_all(&api.message_channels()).await?;
        let mut clients = fetcher.fetch_all(&api.clients()).await?;
        let mut companies = fetcher.fetch_all(&api.companies()).await?;
        let mut internal_users = fetcher.fetch_all(&api.internal_users()).await?;

        channels.retain(|channel| !channel.id.is_empty());
        clients.retain(User::has_id);
        companies.retain(|company| !company.id.is_empty());
        internal_users.retain(User::has_id);

        info!(
            "Loaded directory: {} channels, {} clients, {} companies, {} internal users",
            channels.len(),
            clients.len(),
            companies.len(),
            internal_users.len()
        );

        Ok(Self {
            channels,
            clients,
            companies,
            internal_users,
        })
    }

    /// Find a client by id
    pub fn client(&self, id: &str) -> Option<&User> {
        self.clients.iter().find(|c| c.id == id)
    }

    /// Find a company by id
    pub fn company(&self, id: &str) -> Option<&Company> {
        self.companies.iter().find(|c| c.id == id)
    }

    /// Find a channel by id
    pub fn channel(&self, id: &str) -> Option<&MessageChannel> {
        self.channels.iter().find(|c| c.id == id)
    }

    /// Display name of a channel, `None` for unsupported membership types
    pub fn channel_name(&self, channel: &MessageChannel) -> Option<String> {
        let entity = channel.membership_entity_id.as_deref();
        let name = match channel.membership_type? {
            MembershipType::Group => {
                let members: Vec<String> = channel
                    .member_ids
                    .iter()
                    .flatten()
                    .filter_map(|id| self.client(id))
                    .map(|client| {
                        client
                            .complete_name()
                            .unwrap_or_else(|| UNKNOWN_USER.to_string())
                    })
                    .collect();
                Some(members.join(", ")).filter(|name| !name.is_empty())
            }
            MembershipType::Individual => entity
                .and_then(|id| self.client(id))
                .and_then(User::complete_name),
            MembershipType::Company => entity
                .and_then(|id| self.company(id))
                .and_then(|company| company.name.clone())
                .filter(|name| !name.is_empty()),
            MembershipType::Unknown => return None,
        };
        Some(name.unwrap_or_else(|| UNNAMED_CHANNEL.to_string()))
    }

    /// Title for the channel with `id`, falling back to the unnamed label
    pub fn channel_title(&self, id: &str) -> String {
        self.channel(id)
            .and_then(|channel| self.channel_name(channel))
            .unwrap_or_else(|| UNNAMED_CHANNEL.to_string())
    }

    /// Channels offered for export: groups, then individuals, then companies
    pub fn channel_summaries(&self) -> Vec<ChannelSummary> {
        let order = [
            MembershipType::Group,
            MembershipType::Individual,
            MembershipType::Company,
        ];

        order
            .iter()
            .flat_map(|kind| {
                self.channels
                    .iter()
                    .filter(move |channel| channel.membership_type == Some(*kind))
            })
            .filter_map(|channel| {
                let membership_type = channel.membership_type?;
                Some(ChannelSummary {
                    id: channel.id.clone(),
                    name: self.channel_name(channel)?,
                    membership_type,
                })
            })
            .collect()
    }
}
