use dashboard_logging::dashboard_error;
use reqwest::Method;

use super::{settle_list, settle_unit, MISSING_SESSION};
use crate::backend::Backend;
use crate::models::Notification;
use crate::normalize::fetch_list_data;
use crate::session::Session;
use crate::{ApiListResponse, ApiSingleResponse, ListQuery};

/// Notifications addressed to the signed-in user, whatever their role.
pub async fn get_notifications(
    backend: &dyn Backend,
    session: &Session,
    query: &ListQuery,
) -> ApiListResponse<Notification> {
    let Some(user_id) = session.user_id() else {
        dashboard_error!("get_notifications: no signed-in user");
        return ApiListResponse::from_error(MISSING_SESSION);
    };
    let path = format!("/users/{user_id}/notifications");
    settle_list("get_notifications", fetch_list_data(backend, &path, query).await)
}

pub async fn mark_notification_read(
    backend: &dyn Backend,
    notification_id: &str,
) -> ApiSingleResponse<()> {
    let path = format!("/notifications/{notification_id}/read");
    settle_unit(
        "mark_notification_read",
        backend.send(Method::PUT, &path, None).await,
    )
}
