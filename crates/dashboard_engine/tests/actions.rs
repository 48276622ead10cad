use std::collections::HashMap;
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use dashboard_engine::actions::{bakeries, cakes, notifications, orders, MISSING_BAKERY};
use dashboard_engine::models::NewCake;
use dashboard_engine::{
    get_sales_overview, load_dashboard, load_detail, load_table, ApiError, ApiResult, Backend,
    EngineEvent, EngineHandle, FailureKind, ListQuery, Method, Overview, PageOutcome, PageRequest,
    Resource, SalesSeries, Session,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(dashboard_logging::initialize_for_tests);
}

#[derive(Debug, Clone, PartialEq)]
struct Call {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<Value>,
}

/// Canned backend: answers by path, 404 for anything unknown.
#[derive(Default)]
struct FakeBackend {
    responses: Mutex<HashMap<String, ApiResult<Value>>>,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl FakeBackend {
    fn new() -> Self {
        Self::default()
    }

    fn respond(self, path: &str, result: ApiResult<Value>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(path.to_string(), result);
        self
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn answer(&self, call: Call) -> ApiResult<Value> {
        let result = self
            .responses
            .lock()
            .unwrap()
            .get(&call.path)
            .cloned()
            .unwrap_or_else(|| Err(ApiError::from_kind(FailureKind::HttpStatus(404))));
        self.calls.lock().unwrap().push(call);
        result
    }
}

#[async_trait::async_trait]
impl Backend for FakeBackend {
    async fn get(&self, path: &str, query: &[(String, String)]) -> ApiResult<Value> {
        self.answer(Call {
            method: Method::GET,
            path: path.to_string(),
            query: query.to_vec(),
            body: None,
        })
    }

    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> ApiResult<Value> {
        self.answer(Call {
            method,
            path: path.to_string(),
            query: Vec::new(),
            body,
        })
    }
}

fn orders_page() -> Value {
    json!({
        "payload": [{"id": "o1", "order_code": "ORD-1", "order_status": "PENDING"}],
        "meta_data": {"total_pages_count": 1, "limit": 10, "total_items_count": 1}
    })
}

#[tokio::test]
async fn bakery_orders_are_scoped_to_the_session_bakery() {
    init_logging();
    let backend = FakeBackend::new().respond("/bakeries/b1/orders", Ok(orders_page()));
    let session = Session::bakery("u1", "b1");
    let query = ListQuery::from_pairs([("order_status", "PENDING"), ("pageIndex", "1")]);

    let list = orders::get_orders(&backend, &session, &query).await;

    assert_eq!(list.data.len(), 1);
    assert_eq!(list.data[0].order_code, "ORD-1");
    assert_eq!(list.error, None);
    assert_eq!(
        backend.calls()[0].query,
        vec![
            ("order_status".to_string(), "PENDING".to_string()),
            ("pageIndex".to_string(), "1".to_string()),
        ]
    );
}

#[tokio::test]
async fn admins_read_platform_wide_orders() {
    init_logging();
    let backend = FakeBackend::new().respond("/orders", Ok(orders_page()));
    let list = orders::get_orders(&backend, &Session::admin("a1"), &ListQuery::new()).await;
    assert_eq!(list.total_items_count, 1);
    assert_eq!(backend.calls()[0].path, "/orders");
}

#[tokio::test]
async fn backend_failure_degrades_to_empty_list() {
    init_logging();
    let backend = FakeBackend::new().respond(
        "/bakeries/b1/cakes",
        Err(ApiError::from_kind(FailureKind::HttpStatus(500))),
    );
    let list = cakes::get_cakes(&backend, &Session::bakery("u1", "b1"), &ListQuery::new()).await;

    assert!(list.data.is_empty());
    assert_eq!(list.page_count, 0);
    assert_eq!(
        list.error.as_deref(),
        Some("The server encountered an error. Please try again later.")
    );
}

#[tokio::test]
async fn bakery_user_without_entity_gets_empty_list_without_a_call() {
    init_logging();
    let mut session = Session::bakery("u1", "b1");
    if let Some(user) = session.user.as_mut() {
        user.entity = None;
    }
    let backend = FakeBackend::new();

    let list = orders::get_orders(&backend, &session, &ListQuery::new()).await;

    assert!(list.data.is_empty());
    assert_eq!(list.error.as_deref(), Some(MISSING_BAKERY));
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn bakery_list_is_admin_only() {
    init_logging();
    let backend = FakeBackend::new();
    let list =
        bakeries::get_bakeries(&backend, &Session::bakery("u1", "b1"), &ListQuery::new()).await;
    assert!(list.error.is_some());
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn create_cake_posts_to_the_session_bakery() {
    init_logging();
    let backend = FakeBackend::new().respond(
        "/bakeries/b1/cakes",
        Ok(json!({"payload": {"id": "c9", "name": "Opera", "price": 90000.0}})),
    );
    let cake = NewCake {
        name: "Opera".to_string(),
        price: 90000.0,
        category: "CHOCOLATE".to_string(),
        description: "Layered".to_string(),
    };

    let created = cakes::create_cake(&backend, &Session::bakery("u1", "b1"), &cake).await;

    assert_eq!(created.data.map(|c| c.id), Some("c9".to_string()));
    let calls = backend.calls();
    let call = &calls[0];
    assert_eq!(call.method, Method::POST);
    assert_eq!(call.body.as_ref().unwrap()["name"], "Opera");
}

#[tokio::test]
async fn order_status_update_sends_the_new_status() {
    init_logging();
    let backend = FakeBackend::new().respond(
        "/orders/o1/status",
        Ok(json!({"payload": {"id": "o1", "order_status": "ACCEPTED"}})),
    );
    let updated = orders::update_order_status(&backend, "o1", "ACCEPTED").await;

    assert_eq!(updated.data.unwrap().order_status, "ACCEPTED");
    assert_eq!(backend.calls()[0].method, Method::PUT);
    assert_eq!(
        backend.calls()[0].body,
        Some(json!({"order_status": "ACCEPTED"}))
    );
}

#[tokio::test]
async fn delete_and_mark_read_report_success_without_payload() {
    init_logging();
    let backend = FakeBackend::new()
        .respond("/cakes/c1", Ok(Value::Null))
        .respond("/notifications/n1/read", Ok(Value::Null));

    assert_eq!(cakes::delete_cake(&backend, "c1").await.data, Some(()));
    assert_eq!(
        notifications::mark_notification_read(&backend, "n1").await.data,
        Some(())
    );
    assert_eq!(cakes::delete_cake(&backend, "c2").await.data, None);
}

#[tokio::test]
async fn dashboard_sections_fail_independently() {
    init_logging();
    let backend = FakeBackend::new()
        .respond(
            "/bakeries/b1/overview",
            Ok(json!({"payload": {"total_revenue": 1500.0, "total_orders": 12}})),
        )
        .respond(
            "/bakeries/b1/sales-overview",
            Ok(json!({"payload": [{"month": "2024-04", "revenue": 1500.0, "orders": 12}]})),
        )
        .respond(
            "/bakeries/b1/category-distribution",
            Err(ApiError::from_kind(FailureKind::Timeout)),
        );

    let data = load_dashboard(&backend, &Session::bakery("u1", "b1")).await;

    assert_eq!(data.overview.total_revenue, 1500.0);
    assert_eq!(data.overview.total_orders, 12);
    assert_eq!(data.overview.total_customers, 0);
    assert!(data.categories.is_empty());
    assert!(data.products.is_empty());
    assert!(matches!(data.sales, SalesSeries::Monthly(ref points) if points.len() == 1));
    // category distribution timed out, product performance is unknown (404)
    assert_eq!(data.errors.len(), 2);
    assert_eq!(backend.calls().len(), 4);
}

#[tokio::test]
async fn anonymous_dashboard_is_zeroed() {
    init_logging();
    let backend = FakeBackend::new();
    let data = load_dashboard(&backend, &Session::anonymous()).await;
    assert_eq!(data.overview, Overview::default());
    assert_eq!(data.errors.len(), 1);
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn page_loads_apply_role_guards() {
    init_logging();
    let backend = FakeBackend::new().respond("/bakeries/b1/orders", Ok(orders_page()));

    let outcome =
        load_table(&backend, &Session::anonymous(), Resource::Orders, &ListQuery::new()).await;
    assert_eq!(outcome, PageOutcome::Redirect("/".to_string()));

    let outcome = load_table(
        &backend,
        &Session::bakery("u1", "b1"),
        Resource::Bakeries,
        &ListQuery::new(),
    )
    .await;
    assert_eq!(outcome, PageOutcome::Redirect("/dashboard".to_string()));

    let PageOutcome::Render(table) = load_table(
        &backend,
        &Session::bakery("u1", "b1"),
        Resource::Orders,
        &ListQuery::new(),
    )
    .await
    else {
        panic!("expected a rendered table");
    };
    assert_eq!(table.columns[0], "code");
    assert_eq!(table.rows[0][0], "ORD-1");
}

#[tokio::test]
async fn transactions_are_read_from_the_session_wallet() {
    init_logging();
    let backend = FakeBackend::new().respond(
        "/wallets/w1/transactions",
        Ok(json!({
            "payload": [],
            "meta_data": {"total_pages_count": 0, "limit": 10, "total_items_count": 0}
        })),
    );

    let session = Session::bakery("u1", "b1").with_wallet("w1");
    let outcome = load_table(&backend, &session, Resource::Transactions, &ListQuery::new()).await;
    let PageOutcome::Render(table) = outcome else {
        panic!("expected a rendered table");
    };
    assert_eq!(table.error, None);
    assert_eq!(backend.calls()[0].path, "/wallets/w1/transactions");

    let session = Session::bakery("u1", "b1");
    let outcome = load_table(&backend, &session, Resource::Transactions, &ListQuery::new()).await;
    let PageOutcome::Render(table) = outcome else {
        panic!("expected a rendered table");
    };
    assert!(table.error.is_some());
    assert_eq!(backend.calls().len(), 1);
}

#[tokio::test]
async fn sales_overview_follows_the_session_scope() {
    init_logging();
    let backend = FakeBackend::new().respond(
        "/admins/sales-overview",
        Ok(json!({"payload": [{"date": "2024-05-01T08:30:00Z", "revenue": 80.0, "orders": 3}]})),
    );

    let series = get_sales_overview(&backend, &Session::admin("a1")).await;
    assert!(matches!(series, SalesSeries::Daily(ref points) if points.len() == 1));
    assert_eq!(series.total_revenue(), 80.0);

    let series = get_sales_overview(&backend, &Session::anonymous()).await;
    assert!(series.is_empty());
    assert_eq!(backend.calls().len(), 1);
}

#[tokio::test]
async fn unknown_detail_renders_not_found() {
    init_logging();
    let backend = FakeBackend::new();
    let outcome = load_detail(&backend, &Session::admin("a1"), Resource::Cakes, "nope").await;
    assert_eq!(outcome, PageOutcome::NotFound);
}

#[test]
fn engine_handle_reports_loaded_tables() {
    init_logging();
    let backend = Arc::new(FakeBackend::new().respond("/bakeries/b1/orders", Ok(orders_page())));
    let engine = EngineHandle::new(backend, Session::bakery("u1", "b1")).expect("engine");

    engine.load(
        7,
        PageRequest::List {
            resource: Resource::Orders,
            query: ListQuery::new(),
        },
    );

    match engine.recv_timeout(Duration::from_secs(5)) {
        Some(EngineEvent::TableLoaded {
            request_id,
            outcome: PageOutcome::Render(table),
        }) => {
            assert_eq!(request_id, 7);
            assert_eq!(table.total_items_count, 1);
        }
        other => panic!("unexpected event: {other:?}"),
    }
}
