#![allow(clippy::unwrap_used)]
// Integration tests for `Aggregator` against wiremock site and user services.

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use orgview_core::{
    Aggregator, AggregatorConfig, CoreError, FailureKind, SiteDetail, SourceResult,
};

// ── Helpers ─────────────────────────────────────────────────────────

fn aggregator(site_url: &str, user_url: &str) -> Aggregator {
    let mut config = AggregatorConfig::new(
        Url::parse(site_url).unwrap(),
        Url::parse(user_url).unwrap(),
    );
    config.timeout = Duration::from_millis(500);
    config.connect_timeout = Duration::from_millis(500);
    Aggregator::from_config(&config).unwrap()
}

async fn setup() -> (MockServer, MockServer, Aggregator) {
    let site = MockServer::start().await;
    let user = MockServer::start().await;
    let agg = aggregator(&site.uri(), &user.uri());
    (site, user, agg)
}

/// A base URL on a port with nothing listening.
fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

async fn mount_json(server: &MockServer, route: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

// ── Scenarios ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_two_sites_no_users_both_succeed() {
    let (site, user, agg) = setup().await;

    mount_json(
        &site,
        "/api/sites/organization/42",
        json!([
            { "id": 1, "organizationId": 42, "name": "North", "address": "1 North Rd" },
            { "id": 2, "organizationId": 42, "name": "South", "address": "2 South Rd" }
        ]),
    )
    .await;
    mount_json(&user, "/api/users/organization/42", json!([])).await;

    let view = agg.get_organization_view(42).await.unwrap();

    assert_eq!(view.organization_id.get(), 42);
    assert_eq!(view.site_detail, SiteDetail::Plain);
    assert_eq!(view.sites.data().map(<[_]>::len), Some(2));
    assert_eq!(view.users, SourceResult::Succeeded { data: Vec::new() });
    assert!(view.is_complete());
    assert!(view.unavailable_sources().is_empty());
}

#[tokio::test]
async fn test_user_service_down_keeps_sites() {
    let site = MockServer::start().await;
    let agg = aggregator(&site.uri(), &unreachable_base_url());

    mount_json(
        &site,
        "/api/sites/organization/7",
        json!([{ "id": 70, "organizationId": 7, "name": "Only Site", "address": "7 Way" }]),
    )
    .await;

    let view = agg.get_organization_view(7).await.unwrap();

    let sites = view.sites.data().unwrap();
    assert_eq!(sites.len(), 1);
    assert_eq!(sites[0].name.as_deref(), Some("Only Site"));
    assert_eq!(view.users.failure_kind(), Some(FailureKind::Transport));
    assert_eq!(view.unavailable_sources(), vec!["users"]);
    assert!(view.users_or_empty().is_empty());
}

#[tokio::test]
async fn test_site_service_error_keeps_users() {
    let (site, user, agg) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/sites/organization/5"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&site)
        .await;
    mount_json(
        &user,
        "/api/users/organization/5",
        json!([{ "id": 9, "name": "Kim", "email": "kim@example.com", "phone": "9", "position": "CFO" }]),
    )
    .await;

    let view = agg.get_organization_view(5).await.unwrap();

    assert_eq!(view.sites.failure_kind(), Some(FailureKind::Protocol));
    assert_eq!(view.users.data().map(<[_]>::len), Some(1));
    assert_eq!(view.unavailable_sources(), vec!["sites"]);
}

#[tokio::test]
async fn test_every_source_down_still_returns_a_view() {
    let dead = unreachable_base_url();
    let agg = aggregator(&dead, &dead);

    let view = agg.get_organization_view(1).await.unwrap();

    assert!(view.sites.is_unavailable());
    assert!(view.users.is_unavailable());
    assert_eq!(view.unavailable_sources(), vec!["sites", "users"]);
}

#[tokio::test]
async fn test_with_site_users_uses_enriched_endpoint() {
    let (site, user, agg) = setup().await;

    mount_json(
        &site,
        "/api/sites/organization/3/with-users",
        json!([{
            "id": 30,
            "organizationId": 3,
            "name": "Campus",
            "address": "3 Quad",
            "users": [
                { "id": 1, "name": "A", "email": "a@x.io", "phone": "1", "position": "P1" },
                { "id": 2, "name": "B", "email": "b@x.io", "phone": "2", "position": "P2" },
                { "id": 3, "name": "C", "email": "c@x.io", "phone": "3", "position": "P3" }
            ]
        }]),
    )
    .await;
    mount_json(
        &site,
        "/api/sites/organization/3",
        json!([{ "id": 30, "organizationId": 3, "name": "Campus", "address": "3 Quad" }]),
    )
    .await;
    mount_json(&user, "/api/users/organization/3", json!([])).await;

    let enriched = agg.get_organization_view_with_site_users(3).await.unwrap();
    assert_eq!(enriched.site_detail, SiteDetail::WithUsers);
    let sites = enriched.sites.data().unwrap();
    assert_eq!(sites.len(), 1);
    assert_eq!(sites[0].users().len(), 3);

    let plain = agg.get_organization_view(3).await.unwrap();
    let plain_sites = plain.sites.data().unwrap();
    assert_eq!(plain_sites[0].id, sites[0].id);
    assert!(plain_sites[0].users.is_none());
}

// ── Boundaries ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_invalid_ids_are_rejected_before_any_request() {
    let (site, user, agg) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&site)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&user)
        .await;

    for raw in [0, -1, i64::MIN] {
        let err = agg.get_organization_view(raw).await.unwrap_err();
        assert!(
            matches!(err, CoreError::InvalidOrganizationId { ref value } if *value == raw.to_string()),
            "unexpected error for {raw}: {err:?}"
        );
    }
}

#[tokio::test]
async fn test_repeated_views_are_identical() {
    let (site, user, agg) = setup().await;

    mount_json(
        &site,
        "/api/sites/organization/11",
        json!([{ "id": 1, "organizationId": 11, "name": "Same", "address": null }]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/api/users/organization/11"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&user)
        .await;

    let first = agg.get_organization_view(11).await.unwrap();
    let second = agg.get_organization_view(11).await.unwrap();
    assert_eq!(first, second);
}

// ── Concurrency & cancellation ──────────────────────────────────────

#[tokio::test]
async fn test_sub_calls_run_concurrently() {
    let site = MockServer::start().await;
    let user = MockServer::start().await;
    let mut config = AggregatorConfig::new(
        Url::parse(&site.uri()).unwrap(),
        Url::parse(&user.uri()).unwrap(),
    );
    config.timeout = Duration::from_secs(5);
    let agg = Aggregator::from_config(&config).unwrap();

    for (server, route) in [
        (&site, "/api/sites/organization/2"),
        (&user, "/api/users/organization/2"),
    ] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([]))
                    .set_delay(Duration::from_millis(400)),
            )
            .mount(server)
            .await;
    }

    let started = std::time::Instant::now();
    let view = agg.get_organization_view(2).await.unwrap();
    let elapsed = started.elapsed();

    assert!(view.is_complete());
    assert!(
        elapsed < Duration::from_millis(750),
        "sub-calls looked sequential: {elapsed:?}"
    );
}

#[tokio::test]
async fn test_pre_cancelled_request_sends_nothing() {
    let (site, user, agg) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&site)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&user)
        .await;

    let cancel = CancellationToken::new();
    cancel.cancel();

    let view = agg
        .get_organization_view_cancellable(4, SiteDetail::Plain, &cancel)
        .await
        .unwrap();

    assert_eq!(view.sites.failure_kind(), Some(FailureKind::Cancelled));
    assert_eq!(view.users.failure_kind(), Some(FailureKind::Cancelled));
}

#[tokio::test]
async fn test_cancellation_keeps_finished_results() {
    let site = MockServer::start().await;
    let user = MockServer::start().await;
    let mut config = AggregatorConfig::new(
        Url::parse(&site.uri()).unwrap(),
        Url::parse(&user.uri()).unwrap(),
    );
    config.timeout = Duration::from_secs(10);
    let agg = Aggregator::from_config(&config).unwrap();

    mount_json(
        &site,
        "/api/sites/organization/8",
        json!([{ "id": 80, "organizationId": 8, "name": "Fast", "address": "8 Ln" }]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/api/users/organization/8"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&user)
        .await;

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    let canceller = async move {
        tokio::time::sleep(Duration::from_millis(300)).await;
        trigger.cancel();
    };

    let (view, ()) = tokio::join!(
        agg.get_organization_view_cancellable(8, SiteDetail::Plain, &cancel),
        canceller,
    );
    let view = view.unwrap();

    assert_eq!(view.sites.data().map(<[_]>::len), Some(1));
    assert_eq!(view.users.failure_kind(), Some(FailureKind::Cancelled));
}

#[tokio::test]
async fn test_single_source_calls_honour_cancellation() {
    let (site, user, agg) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&site)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&user)
        .await;

    let cancel = CancellationToken::new();
    cancel.cancel();

    for detail in [SiteDetail::Plain, SiteDetail::WithUsers] {
        let sites = agg.get_sites_cancellable(3, detail, &cancel).await.unwrap();
        assert_eq!(sites.failure_kind(), Some(FailureKind::Cancelled));
    }
    let users = agg.get_users_cancellable(3, &cancel).await.unwrap();
    assert_eq!(users.failure_kind(), Some(FailureKind::Cancelled));
}

#[tokio::test]
async fn test_single_source_calls_fetch_and_validate() {
    let (site, user, agg) = setup().await;

    mount_json(
        &site,
        "/api/sites/organization/9/with-users",
        json!([{
            "id": 90, "organizationId": 9, "name": "Annex",
            "users": [{ "id": 1, "name": "A", "email": "a@x.io", "phone": "1", "position": "P" }]
        }]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/api/users/organization/9"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&user)
        .await;

    let cancel = CancellationToken::new();
    let sites = agg
        .get_sites_cancellable(9, SiteDetail::WithUsers, &cancel)
        .await
        .unwrap();
    assert_eq!(sites.data().unwrap()[0].users().len(), 1);

    let users = agg.get_users_cancellable(9, &cancel).await.unwrap();
    assert_eq!(users.failure_kind(), Some(FailureKind::Protocol));

    let err = agg.get_users_cancellable(0, &cancel).await.unwrap_err();
    assert!(matches!(err, CoreError::InvalidOrganizationId { .. }));
}

// ── Construction ────────────────────────────────────────────────────

#[test]
fn test_unbuildable_http_client_is_reported_as_such() {
    let mut config = AggregatorConfig::new(
        Url::parse("http://site:8082").unwrap(),
        Url::parse("http://user:8081").unwrap(),
    );
    config.user_agent = "bad\nagent".into();

    let err = Aggregator::from_config(&config).unwrap_err();
    assert!(matches!(err, CoreError::HttpClient { .. }), "{err:?}");
}
