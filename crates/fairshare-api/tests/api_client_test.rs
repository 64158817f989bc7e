// Integration tests for `ApiClient` using wiremock.
#![allow(clippy::unwrap_used)]

use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fairshare_api::{ApiClient, Error, ExportKind};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let client = ApiClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

// ── Telemetry reads ─────────────────────────────────────────────────

#[tokio::test]
async fn test_get_status() {
    let (server, client) = setup().await;

    let body = json!({
        "total_clients": 3,
        "network_stats": { "sent": 120.5, "recv": 840.2 },
        "total_bandwidth": 100.0,
        "max_priority": 10,
    });

    Mock::given(method("GET"))
        .and(path("/api/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let status = client.get_status().await.unwrap();

    assert_eq!(status.total_clients, 3);
    assert!((status.network_stats.sent - 120.5).abs() < f64::EPSILON);
    assert!((status.network_stats.recv - 840.2).abs() < f64::EPSILON);
    assert!((status.total_bandwidth - 100.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_list_clients_tolerates_missing_optionals() {
    let (server, client) = setup().await;

    let body = json!([
        {
            "ip": "10.0.0.5",
            "friendly_name": "Laptop",
            "icon": "💻",
            "priority": 5,
            "usage": 3.0,
            "allocated": 5.0,
            "usage_percent": 60.0
        },
        // no label, no icon, no priority -- must still parse
        { "ip": "10.0.0.9", "usage": 0.4, "allocated": 2.0, "usage_percent": 20.0 }
    ]);

    Mock::given(method("GET"))
        .and(path("/api/clients"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let clients = client.list_clients().await.unwrap();

    assert_eq!(clients.len(), 2);
    assert_eq!(clients[0].ip, "10.0.0.5");
    assert_eq!(clients[0].friendly_name.as_deref(), Some("Laptop"));
    assert_eq!(clients[1].friendly_name, None);
    assert_eq!(clients[1].icon, None);
    assert_eq!(clients[1].priority, 0);
}

#[tokio::test]
async fn test_get_history() {
    let (server, client) = setup().await;

    let body = json!({
        "time": ["12:00:01", "12:00:03", "12:00:05"],
        "upload": [10.0, 12.5, 11.0],
        "download": [80.0, 95.5, 90.0]
    });

    Mock::given(method("GET"))
        .and(path("/api/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let history = client.get_history().await.unwrap();

    assert_eq!(history.time.len(), 3);
    assert_eq!(history.upload.len(), 3);
    assert_eq!(history.download.len(), 3);
}

// ── Mutations and the shared success contract ───────────────────────

#[tokio::test]
async fn test_set_total_bandwidth_posts_integer_cap() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/config"))
        .and(body_json(json!({ "total_bandwidth": 150 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    client.set_total_bandwidth(150).await.unwrap();
}

#[tokio::test]
async fn test_set_priority_rejection_surfaces_as_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/priority/10.0.0.5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": false })))
        .mount(&server)
        .await;

    let err = client.set_priority("10.0.0.5", 8).await.unwrap_err();
    assert!(matches!(err, Error::Rejected { .. }));
}

#[tokio::test]
async fn test_get_device_label_absent() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/device/10.0.0.7/label"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let label = client.get_device_label("10.0.0.7").await.unwrap();
    assert_eq!(label, None);
}

#[tokio::test]
async fn test_set_device_label() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/device/10.0.0.7/label"))
        .and(body_json(json!({ "label": "Kitchen TV" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    client.set_device_label("10.0.0.7", "Kitchen TV").await.unwrap();
}

#[tokio::test]
async fn test_set_alert_threshold_checks_success_flag() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/alerts/threshold"))
        .and(body_json(json!({ "threshold": 85.0 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .mount(&server)
        .await;

    client.set_alert_threshold(85.0).await.unwrap();
}

// ── Router control ──────────────────────────────────────────────────

#[tokio::test]
async fn test_router_info() {
    let (server, client) = setup().await;

    let body = json!({
        "ip": "192.168.1.1",
        "type": "hotspot",
        "mode": "hotspot",
        "status": "ready",
        "admin": true
    });

    Mock::given(method("GET"))
        .and(path("/api/router/info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let info = client.router_info().await.unwrap();

    assert_eq!(info.ip.as_deref(), Some("192.168.1.1"));
    assert_eq!(info.kind.as_deref(), Some("hotspot"));
    assert!(info.admin);
}

#[tokio::test]
async fn test_apply_router_limits_counts() {
    let (server, client) = setup().await;

    let body = json!({
        "success": true,
        "message": "Limits applied",
        "applied": 4,
        "total": 5
    });

    Mock::given(method("POST"))
        .and(path("/api/router/apply_limits"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = client.apply_router_limits().await.unwrap();

    assert_eq!(outcome.applied, 4);
    assert_eq!(outcome.total, 5);
    assert_eq!(outcome.message, "Limits applied");
}

#[tokio::test]
async fn test_apply_router_limits_error_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/router/apply_limits"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": false, "error": "router unreachable" })),
        )
        .mount(&server)
        .await;

    let err = client.apply_router_limits().await.unwrap_err();
    match err {
        Error::Rejected { message } => assert_eq!(message, "router unreachable"),
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn test_clear_router_limits_single_post() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/router/clear_limits"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    client.clear_router_limits().await.unwrap();
}

#[tokio::test]
async fn test_set_router_priority() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/router/set_priority/10.0.0.5"))
        .and(body_json(json!({ "priority": 8 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    client.set_router_priority("10.0.0.5", 8).await.unwrap();
}

// ── CSV export ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_export_url_windows() {
    let (_server, client) = setup().await;

    let url = client.export_url(ExportKind::Bandwidth, 24).unwrap();
    assert!(url.path().ends_with("/api/export/csv/bandwidth"));
    assert_eq!(url.query(), Some("hours=24"));

    let url = client.export_url(ExportKind::Alerts, 50).unwrap();
    assert!(url.path().ends_with("/api/export/csv/alerts"));
    assert_eq!(url.query(), Some("limit=50"));
}

#[tokio::test]
async fn test_download_csv_writes_file() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/export/csv/clients"))
        .and(query_param("hours", "12"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("ip,usage\n10.0.0.5,3.0\n"),
        )
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("clients.csv");

    let written = client
        .download_csv(ExportKind::Clients, 12, &dest)
        .await
        .unwrap();

    assert!(written > 0);
    let contents = std::fs::read_to_string(&dest).unwrap();
    assert!(contents.starts_with("ip,usage"));
}
