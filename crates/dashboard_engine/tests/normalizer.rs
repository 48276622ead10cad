use std::time::Duration;

use dashboard_engine::actions::orders;
use dashboard_engine::models::Order;
use dashboard_engine::{
    api_request, detail_outcome, fetch_list_data, fetch_single_data, ApiSettings, FailureKind,
    ListQuery, PageOutcome, ReqwestBackend,
};
use pretty_assertions::assert_eq;
use serde::Deserialize;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct Item {
    id: String,
}

fn backend_for(server: &MockServer) -> ReqwestBackend {
    ReqwestBackend::new(ApiSettings {
        base_url: server.uri(),
        token: Some("tok-123".to_string()),
        ..ApiSettings::default()
    })
    .expect("client")
}

#[tokio::test]
async fn list_envelope_maps_payload_and_metadata() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bakeries/b1/orders"))
        .and(query_param("pageIndex", "2"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "payload": [{"id": "x"}, {"id": "y"}],
            "meta_data": {"total_pages_count": 3, "limit": 10, "total_items_count": 21}
        })))
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let query = ListQuery::new().with("pageIndex", "2");
    let list = fetch_list_data::<Item>(&backend, "/bakeries/b1/orders", &query)
        .await
        .expect("list ok");

    assert_eq!(
        list.data,
        vec![
            Item { id: "x".to_string() },
            Item { id: "y".to_string() }
        ]
    );
    assert_eq!(list.page_count, 3);
    assert_eq!(list.total_items_count, 21);
    assert_eq!(list.error, None);
}

#[tokio::test]
async fn null_payload_is_an_empty_successful_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cakes"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"payload": null, "meta_data": {}})),
        )
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let list = fetch_list_data::<Item>(&backend, "/cakes", &ListQuery::new())
        .await
        .expect("list ok");

    assert!(list.data.is_empty());
    assert_eq!(list.page_count, 0);
    assert_eq!(list.total_items_count, 0);
}

#[tokio::test]
async fn missing_entity_surfaces_as_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orders/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let err = fetch_single_data::<Order>(&backend, "/orders/missing")
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(404));
    assert!(!err.message.is_empty());

    let response = orders::get_order(&backend, "missing").await;
    assert_eq!(response.data, None);
    assert_eq!(response.error.as_deref(), Some(err.message.as_str()));
    assert_eq!(detail_outcome(response), PageOutcome::NotFound);
}

#[tokio::test]
async fn single_envelope_unwraps_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orders/o1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "payload": {"id": "o1", "order_code": "ORD-1", "order_status": "PENDING"}
        })))
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let single = fetch_single_data::<Order>(&backend, "/orders/o1")
        .await
        .expect("single ok");
    let order = single.data.expect("order");
    assert_eq!(order.order_code, "ORD-1");
    assert_eq!(order.order_status, "PENDING");
}

#[tokio::test]
async fn rejected_request_becomes_a_failure_value() {
    let client = reqwest::Client::new();
    // Nothing listens on port 1.
    let result = api_request(|| client.get("http://127.0.0.1:1/unreachable").send()).await;

    let err = result.unwrap_err();
    assert_eq!(err.kind, FailureKind::Network);
    assert!(!err.message.is_empty());
}

#[tokio::test]
async fn server_error_is_translated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admins/sales-overview"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let url = format!("{}/admins/sales-overview", server.uri());
    let err = api_request(|| client.get(url.as_str()).send())
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(503));
    assert_eq!(
        err.message,
        "The server encountered an error. Please try again later."
    );
}

#[tokio::test]
async fn non_json_body_is_a_decode_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cakes"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let err = fetch_list_data::<Item>(&backend, "/cakes", &ListQuery::new())
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test]
async fn slow_backend_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({"payload": []})),
        )
        .mount(&server)
        .await;

    let backend = ReqwestBackend::new(ApiSettings {
        base_url: server.uri(),
        request_timeout: Duration::from_millis(50),
        ..ApiSettings::default()
    })
    .expect("client");
    let err = fetch_list_data::<Item>(&backend, "/slow", &ListQuery::new())
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}
