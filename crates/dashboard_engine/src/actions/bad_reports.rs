use super::{scope, settle_list, settle_single};
use crate::backend::Backend;
use crate::models::BadReport;
use crate::normalize::{fetch_list_data, fetch_single_data};
use crate::session::Session;
use crate::{ApiListResponse, ApiSingleResponse, ListQuery};

pub async fn get_bad_reports(
    backend: &dyn Backend,
    session: &Session,
    query: &ListQuery,
) -> ApiListResponse<BadReport> {
    let path = match scope(session, "get_bad_reports") {
        Ok(scope) => scope.path("/bad_reports", "bad_reports"),
        Err(message) => return ApiListResponse::from_error(message),
    };
    settle_list("get_bad_reports", fetch_list_data(backend, &path, query).await)
}

pub async fn get_bad_report(
    backend: &dyn Backend,
    report_id: &str,
) -> ApiSingleResponse<BadReport> {
    let path = format!("/bad_reports/{report_id}");
    settle_single("get_bad_report", fetch_single_data(backend, &path).await)
}
