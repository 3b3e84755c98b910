//! Mock API tests for the HTTP client.
//!
//! These tests use wiremock to simulate the REST API and exercise the client
//! and the resource helpers without network access.

use kasa_core::resource::{self, Checks, Contacts, Vehicles};
use kasa_core::{Api, BaseUrl, ContactDraft, Error, Id, ListQuery};
use kasa_http::HttpApi;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper to create an API client for a mock server.
fn mock_api(server: &MockServer) -> HttpApi {
    let base = BaseUrl::new(format!("http://127.0.0.1:{}/api", server.address().port())).unwrap();
    HttpApi::new(base).unwrap().with_token("test-token")
}

fn check_json(id: i64, number: &str) -> serde_json::Value {
    json!({
        "id": id,
        "check_number": number,
        "bank_name": "Ziraat",
        "amount": "1000.00",
        "issue_date": "2026-01-01",
        "due_date": "2026-02-01",
        "status": "pending"
    })
}

// ============================================================================
// Listing
// ============================================================================

#[tokio::test]
async fn test_list_sends_query_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/checks"))
        .and(query_param("page", "2"))
        .and(query_param("per_page", "20"))
        .and(query_param("search", "A-10"))
        .and(query_param("status", "pending"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [check_json(1, "A-101"), check_json(2, "A-102")],
            "meta": {"current_page": 2, "last_page": 4, "total": 70}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = mock_api(&server);
    let query = ListQuery::new()
        .with_search("A-10")
        .with_filter(Some("pending"))
        .at_page(2);
    let page = resource::list::<Checks, _>(&api, &query, 20).await.unwrap();

    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].check_number, "A-101");
    assert_eq!(page.pagination.last_page, 4);
}

#[tokio::test]
async fn test_list_without_meta_is_single_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/vehicles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": 5, "plate": "34 ABC 123", "brand": "Ford", "model": "Transit"}]
        })))
        .mount(&server)
        .await;

    let api = mock_api(&server);
    let page = resource::list::<Vehicles, _>(&api, &ListQuery::new(), 20)
        .await
        .unwrap();

    assert_eq!(page.items[0].plate, "34 ABC 123");
    assert!(!page.pagination.has_more());
}

// ============================================================================
// Writes
// ============================================================================

#[tokio::test]
async fn test_create_posts_normalized_draft() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/contacts"))
        .and(body_json(json!({
            "name": "Acme Ltd",
            "type": "supplier",
            "email": "info@acme.test"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": {"id": 44, "name": "Acme Ltd", "type": "supplier", "email": "info@acme.test"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = mock_api(&server);
    let draft = ContactDraft {
        name: " Acme Ltd ".into(),
        kind: kasa_core::models::ContactKind::Supplier,
        email: Some("Info@Acme.test".into()),
        phone: Some("  ".into()),
        ..ContactDraft::default()
    };
    let contact = resource::create::<Contacts, _>(&api, &draft).await.unwrap();

    assert_eq!(contact.id, Id::new(44));
}

#[tokio::test]
async fn test_validation_rejection_maps_field_errors() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/contacts/7"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "The given data was invalid.",
            "errors": {"tax_number": ["invalid"]}
        })))
        .mount(&server)
        .await;

    let api = mock_api(&server);
    let draft = ContactDraft {
        name: "Acme".into(),
        ..ContactDraft::default()
    };
    let err = resource::update::<Contacts, _>(&api, Id::new(7), &draft)
        .await
        .unwrap_err();

    let fields = err.field_errors().expect("validation errors");
    assert_eq!(fields.get("tax_number"), Some("invalid"));
    assert_eq!(fields.len(), 1);
}

#[tokio::test]
async fn test_delete_accepts_no_content() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/checks/9"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let api = mock_api(&server);
    resource::delete::<Checks, _>(&api, Id::new(9)).await.unwrap();
}

// ============================================================================
// Error Handling
// ============================================================================

#[tokio::test]
async fn test_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/checks/404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "No query results."
        })))
        .mount(&server)
        .await;

    let api = mock_api(&server);
    let err = resource::fetch::<Checks, _>(&api, Id::new(404))
        .await
        .unwrap_err();

    match err {
        Error::Api(api_err) => {
            assert!(api_err.is_not_found());
            assert_eq!(api_err.message.as_deref(), Some("No query results."));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_non_json_error_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/checks"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_string("Internal Server Error")
                .insert_header("content-type", "text/plain"),
        )
        .mount(&server)
        .await;

    let api = mock_api(&server);
    let err = api.get("checks", &[]).await.unwrap_err();

    assert!(err.to_string().contains("500"));
    assert!(err.field_errors().is_none());
}

#[tokio::test]
async fn test_malformed_success_body_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/checks"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let api = mock_api(&server);
    let err = api.get("checks", &[]).await.unwrap_err();

    assert!(matches!(err, Error::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    // Nothing listens on the discard port.
    let base = BaseUrl::new("http://127.0.0.1:9/api").unwrap();
    let api = HttpApi::new(base).unwrap();

    let err = api.get("checks", &[]).await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
}
