use reqwest::Method;
use serde_json::json;

use super::{scope, settle_list, settle_single};
use crate::backend::Backend;
use crate::models::Order;
use crate::normalize::{fetch_list_data, fetch_single_data, send_single_data};
use crate::session::Session;
use crate::{ApiListResponse, ApiSingleResponse, ListQuery};

pub async fn get_orders(
    backend: &dyn Backend,
    session: &Session,
    query: &ListQuery,
) -> ApiListResponse<Order> {
    let path = match scope(session, "get_orders") {
        Ok(scope) => scope.path("/orders", "orders"),
        Err(message) => return ApiListResponse::from_error(message),
    };
    settle_list("get_orders", fetch_list_data(backend, &path, query).await)
}

pub async fn get_order(backend: &dyn Backend, order_id: &str) -> ApiSingleResponse<Order> {
    let path = format!("/orders/{order_id}");
    settle_single("get_order", fetch_single_data(backend, &path).await)
}

/// Moves an order to `status` (e.g. `ACCEPTED`, `CANCELED`).
pub async fn update_order_status(
    backend: &dyn Backend,
    order_id: &str,
    status: &str,
) -> ApiSingleResponse<Order> {
    let path = format!("/orders/{order_id}/status");
    let body = json!({ "order_status": status });
    settle_single(
        "update_order_status",
        send_single_data(backend, Method::PUT, &path, Some(body)).await,
    )
}
