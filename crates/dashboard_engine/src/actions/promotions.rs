use reqwest::Method;

use super::{bakery_scope, scope, settle_list, settle_single};
use crate::backend::Backend;
use crate::models::{NewPromotion, Promotion};
use crate::normalize::{fetch_list_data, fetch_single_data, send_single_data};
use crate::session::Session;
use crate::{ApiListResponse, ApiSingleResponse, ListQuery};

pub async fn get_promotions(
    backend: &dyn Backend,
    session: &Session,
    query: &ListQuery,
) -> ApiListResponse<Promotion> {
    let path = match scope(session, "get_promotions") {
        Ok(scope) => scope.path("/promotions", "promotions"),
        Err(message) => return ApiListResponse::from_error(message),
    };
    settle_list("get_promotions", fetch_list_data(backend, &path, query).await)
}

pub async fn get_promotion(
    backend: &dyn Backend,
    promotion_id: &str,
) -> ApiSingleResponse<Promotion> {
    let path = format!("/promotions/{promotion_id}");
    settle_single("get_promotion", fetch_single_data(backend, &path).await)
}

pub async fn create_promotion(
    backend: &dyn Backend,
    session: &Session,
    promotion: &NewPromotion,
) -> ApiSingleResponse<Promotion> {
    let bakery_id = match bakery_scope(session, "create_promotion") {
        Ok(id) => id,
        Err(message) => return ApiSingleResponse::from_error(message),
    };
    let body = match serde_json::to_value(promotion) {
        Ok(body) => body,
        Err(err) => return ApiSingleResponse::from_error(err.to_string()),
    };
    let path = format!("/bakeries/{bakery_id}/promotions");
    settle_single(
        "create_promotion",
        send_single_data(backend, Method::POST, &path, Some(body)).await,
    )
}
