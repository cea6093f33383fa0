//! Tests for the messaging platform API

use super::*;
use crate::config::ApiConfig;
use crate::error::Error;
use crate::pagination::{FetchLimits, PageSource, PaginatedFetcher};
use crate::types::ResourceKind;
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> MessagingApi {
    let config = ApiConfig {
        base_url: server.uri(),
        api_key: Some("test-key".to_string()),
        rate_limit: None,
        ..ApiConfig::default()
    };
    MessagingApi::new(&config).unwrap()
}

// ============================================================================
// Model Tests
// ============================================================================

#[test]
fn test_message_deserialize() {
    let message: Message = serde_json::from_value(json!({
        "id": "m1",
        "object": "message",
        "channelId": "ch-1",
        "senderId": "u1",
        "text": "hello",
        "isAttachmentIncluded": true,
        "createdAt": "2024-01-02T03:04:05Z",
        "updatedAt": "2024-01-02T03:04:05.123Z"
    }))
    .unwrap();

    assert_eq!(message.sender_id.as_deref(), Some("u1"));
    assert!(message.has_attachment());
    assert_eq!(
        message.created_at,
        Some(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap())
    );
}

#[test]
fn test_message_minimal() {
    let message: Message = serde_json::from_value(json!({"id": "m2"})).unwrap();
    assert!(message.text.is_none());
    assert!(message.updated_at.is_none());
    assert!(!message.has_attachment());
}

#[test]
fn test_records_without_id_still_parse() {
    let page: crate::pagination::ListPage<User> = serde_json::from_value(json!({
        "data": [
            null,
            {"id": "c1", "givenName": "Ann"},
            {"givenName": "No", "familyName": "Id"},
            {"id": null, "email": "null@id.com"}
        ]
    }))
    .unwrap();

    let ids: Vec<&str> = page.data.iter().map(|user| user.id.as_str()).collect();
    assert_eq!(ids, vec!["c1", "", ""]);
    assert!(page.data[0].has_id());
    assert!(!page.data[1].has_id());

    let message: Message = serde_json::from_value(json!({"text": "orphan"})).unwrap();
    assert!(message.id.is_empty());
}

#[test]
fn test_channel_membership_types() {
    let channels: Vec<MessageChannel> = serde_json::from_value(json!([
        {"id": "a", "membershipType": "group", "memberIds": ["c1", "c2"]},
        {"id": "b", "membershipType": "individual", "membershipEntityId": "c1"},
        {"id": "c", "membershipType": "company", "membershipEntityId": "co1"},
        {"id": "d", "membershipType": "something_new"}
    ]))
    .unwrap();

    assert_eq!(channels[0].membership_type, Some(MembershipType::Group));
    assert_eq!(
        channels[0].member_ids,
        Some(vec!["c1".to_string(), "c2".to_string()])
    );
    assert_eq!(channels[1].membership_entity_id.as_deref(), Some("c1"));
    assert_eq!(channels[2].membership_type, Some(MembershipType::Company));
    assert_eq!(channels[3].membership_type, Some(MembershipType::Unknown));
}

#[test]
fn test_user_names() {
    let user = User {
        id: "u1".to_string(),
        given_name: Some("Ann".to_string()),
        family_name: Some("Lee".to_string()),
        ..User::default()
    };
    assert_eq!(user.full_name(), "Ann Lee");
    assert_eq!(user.complete_name().as_deref(), Some("Ann Lee"));

    let partial = User {
        id: "u2".to_string(),
        given_name: Some("Bob".to_string()),
        ..User::default()
    };
    assert_eq!(partial.full_name(), "Bob");
    assert!(partial.complete_name().is_none());
}

// ============================================================================
// Endpoint Tests
// ============================================================================

#[tokio::test]
async fn test_endpoint_sends_key_and_limit() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/clients"))
        .and(header("X-API-KEY", "test-key"))
        .and(query_param("limit", "100"))
        .and(query_param_is_missing("nextToken"))
        .and(query_param_is_missing("token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "c1", "givenName": "Ann", "familyName": "Lee"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = api_for(&mock_server);
    let page = api.clients().list(None, 100).await.unwrap();

    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].full_name(), "Ann Lee");
    assert!(page.next_token.is_none());
}

#[tokio::test]
async fn test_endpoint_messages_channel_and_session_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/messages"))
        .and(query_param("channelId", "ch-1"))
        .and(query_param("nextToken", "abc"))
        .and(query_param("token", "session-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = api_for(&mock_server).with_session_token(Some("session-1".to_string()));
    let messages = api.messages("ch-1");
    assert_eq!(messages.resource(), ResourceKind::Messages);

    let page = messages.list(Some("abc"), 50).await.unwrap();
    assert!(page.data.is_empty());
}

#[tokio::test]
async fn test_fetcher_drains_endpoint() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/companies"))
        .and(query_param("nextToken", "page-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "co3", "name": "Gamma"}],
            "nextToken": ""
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/companies"))
        .and(query_param_is_missing("nextToken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "co1", "name": "Alpha"}, {"id": "co2"}],
            "nextToken": "page-2"
        })))
        .mount(&mock_server)
        .await;

    let api = api_for(&mock_server);
    let companies = PaginatedFetcher::default()
        .fetch_all(&api.companies())
        .await
        .unwrap();

    let ids: Vec<&str> = companies.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["co1", "co2", "co3"]);
    assert!(companies[1].name.is_none());
}

#[tokio::test]
async fn test_fetcher_wraps_status_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/internal-users"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
        .mount(&mock_server)
        .await;

    let api = api_for(&mock_server);
    let err = PaginatedFetcher::new(FetchLimits::default())
        .fetch_all(&api.internal_users())
        .await
        .unwrap_err();

    assert!(err.is_upstream());
    match err {
        Error::Fetch {
            resource, token, ..
        } => {
            assert_eq!(resource, ResourceKind::InternalUsers);
            assert!(token.is_none());
        }
        other => panic!("Expected Fetch, got {other:?}"),
    }
}
