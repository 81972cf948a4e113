#![allow(clippy::unwrap_used)]
// Integration tests for `UserClient` using wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use orgview_api::{
    FailureKind, OrganizationId, OrganizationSource, ServiceClient, TransportConfig, UserClient,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, UserClient) {
    let server = MockServer::start().await;
    let http = TransportConfig::default().build_client().unwrap();
    let client = UserClient::from_service_client(ServiceClient::with_client(
        http,
        UserClient::SERVICE,
        Url::parse(&server.uri()).unwrap(),
    ));
    (server, client)
}

fn org(id: i64) -> OrganizationId {
    OrganizationId::new(id).unwrap()
}

// ── Tests ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_find_by_organization_decodes_users() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/users/organization/42"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 100,
                "name": "Grace",
                "email": "grace@example.com",
                "phone": "555-0101",
                "position": "Admiral",
                "siteId": 1
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let users = client
        .find_by_organization(org(42))
        .await
        .into_result()
        .unwrap();

    assert_eq!(users.len(), 1);
    assert_eq!(users[0].id, 100);
    assert_eq!(users[0].email.as_deref(), Some("grace@example.com"));
    assert_eq!(users[0].site_id, Some(1));
}

#[tokio::test]
async fn test_no_users_is_empty_success() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/users/organization/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let outcome = client.fetch_by_organization(org(42)).await;
    assert!(outcome.is_succeeded());
    assert_eq!(outcome.items().map(<[_]>::len), Some(0));
    assert_eq!(client.name(), "user");
}

#[tokio::test]
async fn test_no_content_is_empty_success() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/users/organization/3"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    assert!(client.find_by_organization(org(3)).await.is_succeeded());
}

#[tokio::test]
async fn test_unavailable_service_never_errors() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/users/organization/7"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let outcome = client.find_by_organization(org(7)).await;
    assert!(outcome.is_unavailable());
    assert_eq!(outcome.unavailable().map(|u| u.kind), Some(FailureKind::Protocol));
    assert!(outcome.unwrap_or_empty().is_empty());
}

#[tokio::test]
async fn test_repeated_calls_are_identical() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/users/organization/12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "Lin", "email": null, "phone": null, "position": "Lead" }
        ])))
        .expect(2)
        .mount(&server)
        .await;

    let first = client.find_by_organization(org(12)).await;
    let second = client.find_by_organization(org(12)).await;
    assert_eq!(first, second);
}
