use reqwest::Method;

use super::{scope, settle_list, settle_single, Scope, ADMIN_ONLY};
use crate::backend::Backend;
use crate::models::Bakery;
use crate::normalize::{fetch_list_data, fetch_single_data, send_single_data};
use crate::session::Session;
use crate::{ApiListResponse, ApiSingleResponse, ListQuery};

/// Platform-wide bakery list; administrators only.
pub async fn get_bakeries(
    backend: &dyn Backend,
    session: &Session,
    query: &ListQuery,
) -> ApiListResponse<Bakery> {
    match scope(session, "get_bakeries") {
        Ok(Scope::Platform) => {}
        Ok(Scope::Bakery(_)) => {
            dashboard_logging::dashboard_error!("get_bakeries: requires an admin account");
            return ApiListResponse::from_error(ADMIN_ONLY);
        }
        Err(message) => return ApiListResponse::from_error(message),
    }
    settle_list("get_bakeries", fetch_list_data(backend, "/bakeries", query).await)
}

pub async fn get_bakery(backend: &dyn Backend, bakery_id: &str) -> ApiSingleResponse<Bakery> {
    let path = format!("/bakeries/{bakery_id}");
    settle_single("get_bakery", fetch_single_data(backend, &path).await)
}

/// Confirms a pending bakery registration.
pub async fn approve_bakery(backend: &dyn Backend, bakery_id: &str) -> ApiSingleResponse<Bakery> {
    let path = format!("/bakeries/{bakery_id}/approve");
    settle_single(
        "approve_bakery",
        send_single_data(backend, Method::PUT, &path, None).await,
    )
}
