use super::{scope, settle_list, settle_single};
use crate::backend::Backend;
use crate::models::Ingredient;
use crate::normalize::{fetch_list_data, fetch_single_data};
use crate::session::Session;
use crate::{ApiListResponse, ApiSingleResponse, ListQuery};

pub async fn get_ingredients(
    backend: &dyn Backend,
    session: &Session,
    query: &ListQuery,
) -> ApiListResponse<Ingredient> {
    let path = match scope(session, "get_ingredients") {
        Ok(scope) => scope.path("/ingredients", "ingredients"),
        Err(message) => return ApiListResponse::from_error(message),
    };
    settle_list("get_ingredients", fetch_list_data(backend, &path, query).await)
}

pub async fn get_ingredient(
    backend: &dyn Backend,
    ingredient_id: &str,
) -> ApiSingleResponse<Ingredient> {
    let path = format!("/ingredients/{ingredient_id}");
    settle_single("get_ingredient", fetch_single_data(backend, &path).await)
}
