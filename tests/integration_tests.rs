//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: YAML config → paginated API requests →
//! filtered messages → CSV/PDF file on disk

use chrono::{DateTime, TimeZone, Utc};
use message_exporter::api::{Message, User};
use message_exporter::config::ExporterConfig;
use message_exporter::directory::Directory;
use message_exporter::export::prepare;
use message_exporter::layout::{DocumentPaginator, DocumentPreamble, LayoutConfig, MessageRow};
use message_exporter::output::{csv_bytes, message_rows};
use message_exporter::types::{ExportFormat, SenderScope, SortOrder, TimeRange};
use message_exporter::{ExportEngine, ExportOptions};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Fixtures
// ============================================================================

fn config_yaml(server: &MockServer) -> String {
    format!(
        r#"
api:
  base_url: "{}"
  api_key: "integration-key"
  rate_limit: null
fetch:
  page_size: 2
  max_pages: 50
"#,
        server.uri()
    )
}

fn engine_for(server: &MockServer) -> ExportEngine {
    let config = ExporterConfig::from_yaml_str(&config_yaml(server)).unwrap();
    ExportEngine::from_config(&config, Some("session-abc".to_string())).unwrap()
}

async fn mount_list(server: &MockServer, endpoint: &str, data: Value) {
    Mock::given(method("GET"))
        .and(path(endpoint))
        .and(header("X-API-KEY", "integration-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": data })))
        .mount(server)
        .await;
}

/// Group channel listing two clients, an internal user and an unknown id,
/// plus an individual channel whose client has an empty family name
async fn mount_directory(server: &MockServer) {
    mount_list(
        server,
        "/message-channels",
        json!([
            {"id": "ch-ind", "membershipType": "individual", "membershipEntityId": "c2"},
            {"id": "ch-grp", "membershipType": "group", "memberIds": ["c1", "i1", "ghost", "c3"]}
        ]),
    )
    .await;
    mount_list(
        server,
        "/clients",
        json!([
            {"id": "c1", "givenName": "Ann", "familyName": "Lee", "email": "ann@client.com"},
            {"id": "c2", "givenName": "Bo", "familyName": "", "email": "bo@client.com"},
            {"id": "c3", "givenName": "Cy", "email": "cy@client.com"}
        ]),
    )
    .await;
    mount_list(server, "/companies", json!([])).await;
    mount_list(
        server,
        "/internal-users",
        json!([{"id": "i1", "givenName": "Ivy", "familyName": "Ng", "email": "ivy@staff.com"}]),
    )
    .await;
}

/// Messages for the group channel, split over two pages
async fn mount_group_messages(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/messages"))
        .and(query_param("channelId", "ch-grp"))
        .and(query_param("limit", "2"))
        .and(query_param("token", "session-abc"))
        .and(query_param_is_missing("nextToken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"id": "m3", "senderId": "i1", "text": "Ivy, newest", "updatedAt": "2024-03-10T15:00:00Z"},
                {"id": "m1", "senderId": "c1", "text": "Ann, old", "updatedAt": "2024-02-01T08:00:00Z"}
            ],
            "nextToken": "page-2"
        })))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/messages"))
        .and(query_param("channelId", "ch-grp"))
        .and(query_param("nextToken", "page-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"id": "m2", "senderId": "c1", "text": "Ann, recent", "updatedAt": "2024-03-09T09:05:00Z",
                 "isAttachmentIncluded": true},
                {"id": "m4", "senderId": "i1", "text": "Ivy, undated"}
            ],
            "nextToken": ""
        })))
        .expect(1)
        .mount(server)
        .await;
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 12, 12, 0, 0).unwrap()
}

// ============================================================================
// Channel Listing
// ============================================================================

#[tokio::test]
async fn test_channel_listing_names_and_order() {
    let server = MockServer::start().await;
    mount_directory(&server).await;

    let engine = engine_for(&server);
    let channels = engine.list_channels().await.unwrap();

    let names: Vec<(&str, &str)> = channels
        .iter()
        .map(|c| (c.id.as_str(), c.name.as_str()))
        .collect();
    assert_eq!(
        names,
        vec![
            ("ch-grp", "Ann Lee, Unknown User"),
            ("ch-ind", "Unnamed Channel"),
        ]
    );
}

// ============================================================================
// CSV Export
// ============================================================================

#[tokio::test]
async fn test_csv_export_across_pages_to_disk() {
    let server = MockServer::start().await;
    mount_directory(&server).await;
    mount_group_messages(&server).await;

    let mut engine = engine_for(&server);
    let options = ExportOptions::new("ch-grp")
        .with_format(ExportFormat::Csv)
        .with_sender_scope(SenderScope::InternalAndClient)
        .with_sort_order(SortOrder::Descending)
        .with_time_range(TimeRange::LastSevenDays);

    let artifact = engine.export_at(&options, now(), &Utc).await.unwrap();

    let dir = TempDir::new().unwrap();
    let written = artifact.write_to(dir.path()).unwrap();
    assert_eq!(written, dir.path().join("messages.csv"));

    let content = fs::read_to_string(&written).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Sender Name,Sender Email,Time Stamp,Message",
            "Ivy Ng,ivy@staff.com,\"3/10/2024, 3:00:00 PM\",\"Ivy, newest\"",
            "Ann Lee,ann@client.com,\"3/9/2024, 9:05:00 AM\",\"Ann, recent\"",
        ]
    );

    let stats = engine.stats();
    assert_eq!(stats.messages_fetched, 4);
    assert_eq!(stats.message_pages, 2);
    assert_eq!(stats.messages_exported, 2);
}

#[tokio::test]
async fn test_csv_export_client_scope_all_time() {
    let server = MockServer::start().await;
    mount_directory(&server).await;
    mount_group_messages(&server).await;

    let mut engine = engine_for(&server);
    let options = ExportOptions::new("ch-grp")
        .with_sender_scope(SenderScope::Client)
        .with_sort_order(SortOrder::Ascending)
        .with_time_range(TimeRange::AllTime);

    let artifact = engine.export_at(&options, now(), &Utc).await.unwrap();
    let content = String::from_utf8(artifact.bytes).unwrap();
    let lines: Vec<&str> = content.lines().collect();

    assert_eq!(
        lines,
        vec![
            "Sender Name,Sender Email,Time Stamp,Message",
            "Ann Lee,ann@client.com,\"2/1/2024, 8:00:00 AM\",\"Ann, old\"",
            "Ann Lee,ann@client.com,\"3/9/2024, 9:05:00 AM\",\"Ann, recent\"",
        ]
    );
}

// ============================================================================
// PDF Export
// ============================================================================

#[tokio::test]
async fn test_pdf_export_to_named_file() {
    let server = MockServer::start().await;
    mount_directory(&server).await;
    mount_group_messages(&server).await;

    let mut engine = engine_for(&server);
    let options = ExportOptions::new("ch-grp")
        .with_format(ExportFormat::Pdf)
        .with_sort_order(SortOrder::Ascending)
        .with_time_range(TimeRange::AllTime);

    let artifact = engine.export_at(&options, now(), &Utc).await.unwrap();
    assert_eq!(artifact.content_type, "application/pdf");

    let dir = TempDir::new().unwrap();
    let target = dir.path().join("group.pdf");
    let written = artifact.write_to(&target).unwrap();

    assert_eq!(written, target);
    let bytes = fs::read(&written).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
    assert_eq!(engine.stats().messages_exported, 4);
    assert_eq!(engine.stats().document_pages, 1);
}

#[test]
fn test_long_conversation_flows_over_pages() {
    let rows: Vec<MessageRow> = (0..60)
        .map(|i| MessageRow {
            sender_id: format!("u{}", i % 3),
            sender_name: format!("User {}", i % 3),
            sender_email: format!("user{}@example.com", i % 3),
            timestamp: "3/10/2024, 3:00:00 PM".to_string(),
            body: "A message long enough to wrap onto a second line inside its block \
                   when rendered at the body font size on an A4 page."
                .to_string(),
            has_attachment: i % 7 == 0,
        })
        .collect();
    let preamble = DocumentPreamble {
        title: "Team".to_string(),
        generated_at: "3/12/2024, 12:00:00 PM".to_string(),
    };

    let config = LayoutConfig::default();
    let limit = config.content_limit();
    let document = DocumentPaginator::new(config).layout(&preamble, &rows);

    assert!(document.page_count() > 1);
    assert_eq!(document.blocks.len(), rows.len());
    for (index, page) in document.pages.iter().enumerate() {
        assert_eq!(page.number as usize, index + 1);
        assert_eq!(page.texts()[0], format!("Page {}", index + 1));
    }
    for pair in document.blocks.windows(2) {
        assert!(pair[1].page >= pair[0].page);
        if pair[1].page == pair[0].page {
            assert!(pair[1].top > pair[0].bottom());
        }
    }
    for block in &document.blocks {
        assert!(block.bottom() <= limit + 1e-9);
    }
}

// ============================================================================
// Pipeline Without Network
// ============================================================================

#[test]
fn test_two_messages_keep_ascending_order_in_csv_and_layout() {
    let directory = Directory {
        clients: serde_json::from_value::<Vec<User>>(json!([
            {"id": "a", "givenName": "Alice", "familyName": "Adams", "email": "a@x.com"}
        ]))
        .unwrap(),
        internal_users: serde_json::from_value::<Vec<User>>(json!([
            {"id": "b", "givenName": "Bob", "familyName": "Brown", "email": "b@x.com"}
        ]))
        .unwrap(),
        ..Directory::default()
    };
    let messages: Vec<Message> = serde_json::from_value(json!([
        {"id": "2", "senderId": "b", "text": "yo", "updatedAt": "2024-03-11T10:00:00Z"},
        {"id": "1", "senderId": "a", "text": "hi", "updatedAt": "2024-03-11T09:00:00Z"}
    ]))
    .unwrap();
    let options = ExportOptions::new("ch")
        .with_sender_scope(SenderScope::InternalAndClient)
        .with_sort_order(SortOrder::Ascending);

    let prepared = prepare(messages, &directory, &options, now());
    let ids: Vec<&str> = prepared.iter().map(|m| m.message.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2"]);

    let csv = String::from_utf8(csv_bytes(&prepared, &Utc).unwrap()).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("Alice Adams,a@x.com,"));
    assert!(lines[2].starts_with("Bob Brown,b@x.com,"));

    let preamble = DocumentPreamble {
        title: "Alice Adams".to_string(),
        generated_at: "3/12/2024, 12:00:00 PM".to_string(),
    };
    let rows = message_rows(&prepared, &Utc);
    let document = DocumentPaginator::new(LayoutConfig::default()).layout(&preamble, &rows);

    assert_eq!(document.page_count(), 1);
    assert_eq!(document.blocks[0].row, 0);
    assert_eq!(document.blocks[1].row, 1);
    assert!(document.blocks[0].top < document.blocks[1].top);
}
