//! Messaging platform client
//!
//! One list endpoint per resource, each exposed as a [`PageSource`] so the
//! paginated fetcher can drain it.

use super::models::{Company, Message, MessageChannel, User};
use crate::config::ApiConfig;
use crate::error::Result;
use crate::http::{HttpClient, RequestConfig};
use crate::pagination::{ListPage, PageSource};
use crate::types::ResourceKind;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;

/// Client for the messaging platform's list API
#[derive(Debug)]
pub struct MessagingApi {
    http: HttpClient,
    session_token: Option<String>,
}

impl MessagingApi {
    /// Create a client from API settings
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = HttpClient::with_config(config.http_client_config())?;
        Ok(Self::with_client(http))
    }

    /// Create a client over an existing HTTP client
    pub fn with_client(http: HttpClient) -> Self {
        Self {
            http,
            session_token: None,
        }
    }

    /// Send a session token with every request
    #[must_use]
    pub fn with_session_token(mut self, token: Option<String>) -> Self {
        self.session_token = token.filter(|t| !t.is_empty());
        self
    }

    /// List endpoint for message channels
    pub fn message_channels(&self) -> Endpoint<'_, MessageChannel> {
        Endpoint::new(self, ResourceKind::MessageChannels, None)
    }

    /// List endpoint for companies
    pub fn companies(&self) -> Endpoint<'_, Company> {
        Endpoint::new(self, ResourceKind::Companies, None)
    }

    /// List endpoint for clients
    pub fn clients(&self) -> Endpoint<'_, User> {
        Endpoint::new(self, ResourceKind::Clients, None)
    }

    /// List endpoint for internal users
    pub fn internal_users(&self) -> Endpoint<'_, User> {
        Endpoint::new(self, ResourceKind::InternalUsers, None)
    }

    /// List endpoint for the messages of one channel
    pub fn messages(&self, channel_id: impl Into<String>) -> Endpoint<'_, Message> {
        Endpoint::new(self, ResourceKind::Messages, Some(channel_id.into()))
    }

    async fn list_page<T: DeserializeOwned>(
        &self,
        resource: ResourceKind,
        channel_id: Option<&str>,
        token: Option<&str>,
        limit: u32,
    ) -> Result<ListPage<T>> {
        let request = RequestConfig::new()
            .query_opt("channelId", channel_id)
            .query("limit", limit.to_string())
            .query_opt("nextToken", token)
            .query_opt("token", self.session_token.as_deref());

        self.http.get_json_with_config(resource.path(), request).await
    }
}

/// A single list endpoint of [`MessagingApi`]
pub struct Endpoint<'a, T> {
    api: &'a MessagingApi,
    resource: ResourceKind,
    channel_id: Option<String>,
    _record: PhantomData<fn() -> T>,
}

impl<'a, T> Endpoint<'a, T> {
    fn new(api: &'a MessagingApi, resource: ResourceKind, channel_id: Option<String>) -> Self {
        Self {
            api,
            resource,
            channel_id,
            _record: PhantomData,
        }
    }
}

#[async_trait]
impl<'a, T> PageSource for Endpoint<'a, T>
where
    T: DeserializeOwned + Send + 'static,
{
    type Item = T;

    fn resource(&self) -> ResourceKind {
        self.resource
    }

    async fn list(&self, token: Option<&str>, limit: u32) -> Result<ListPage<T>> {
        self.api
            .list_page(self.resource, self.channel_id.as_deref(), token, limit)
            .await
    }
}
