use reqwest::Method;

use super::{bakery_scope, scope, settle_list, settle_single, settle_unit};
use crate::backend::Backend;
use crate::models::{Cake, NewCake};
use crate::normalize::{fetch_list_data, fetch_single_data, send_single_data};
use crate::session::Session;
use crate::{ApiListResponse, ApiSingleResponse, ListQuery};

pub async fn get_cakes(
    backend: &dyn Backend,
    session: &Session,
    query: &ListQuery,
) -> ApiListResponse<Cake> {
    let path = match scope(session, "get_cakes") {
        Ok(scope) => scope.path("/cakes", "cakes"),
        Err(message) => return ApiListResponse::from_error(message),
    };
    settle_list("get_cakes", fetch_list_data(backend, &path, query).await)
}

pub async fn get_cake(backend: &dyn Backend, cake_id: &str) -> ApiSingleResponse<Cake> {
    let path = format!("/cakes/{cake_id}");
    settle_single("get_cake", fetch_single_data(backend, &path).await)
}

pub async fn create_cake(
    backend: &dyn Backend,
    session: &Session,
    cake: &NewCake,
) -> ApiSingleResponse<Cake> {
    let bakery_id = match bakery_scope(session, "create_cake") {
        Ok(id) => id,
        Err(message) => return ApiSingleResponse::from_error(message),
    };
    let body = match serde_json::to_value(cake) {
        Ok(body) => body,
        Err(err) => return ApiSingleResponse::from_error(err.to_string()),
    };
    let path = format!("/bakeries/{bakery_id}/cakes");
    settle_single(
        "create_cake",
        send_single_data(backend, Method::POST, &path, Some(body)).await,
    )
}

pub async fn delete_cake(backend: &dyn Backend, cake_id: &str) -> ApiSingleResponse<()> {
    let path = format!("/cakes/{cake_id}");
    settle_unit("delete_cake", backend.send(Method::DELETE, &path, None).await)
}
