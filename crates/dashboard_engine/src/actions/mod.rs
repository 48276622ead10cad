//! Feature actions: one module per business area.
//!
//! Actions never fail. A backend failure or a session without the scope an
//! action needs is logged and degraded to an empty list or a `None` entity
//! carrying the translated message.

pub mod bad_reports;
pub mod bakeries;
pub mod cakes;
pub mod ingredients;
pub mod notifications;
pub mod orders;
pub mod promotions;
pub mod transactions;

use dashboard_logging::dashboard_error;

use crate::session::{Role, Session};
use crate::{ApiListResponse, ApiResult, ApiSingleResponse};

pub const MISSING_SESSION: &str = "You need to sign in to see this page.";
pub const MISSING_BAKERY: &str = "No bakery is associated with this account.";
pub const ADMIN_ONLY: &str = "Only administrators can see this page.";

/// Where a list action reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Scope<'a> {
    Platform,
    Bakery(&'a str),
}

impl Scope<'_> {
    /// `platform` for admins, `/bakeries/{id}/{bakery_suffix}` for bakery users.
    pub(crate) fn path(self, platform: &str, bakery_suffix: &str) -> String {
        match self {
            Scope::Platform => platform.to_string(),
            Scope::Bakery(id) => format!("/bakeries/{id}/{bakery_suffix}"),
        }
    }
}

pub(crate) fn scope<'a>(session: &'a Session, context: &str) -> Result<Scope<'a>, &'static str> {
    match session.role() {
        None => {
            dashboard_error!("{}: no signed-in user", context);
            Err(MISSING_SESSION)
        }
        Some(Role::Admin) => Ok(Scope::Platform),
        Some(Role::Bakery) => match session.bakery_id() {
            Some(id) => Ok(Scope::Bakery(id)),
            None => {
                dashboard_error!("{}: bakery user without a bakery id", context);
                Err(MISSING_BAKERY)
            }
        },
    }
}

pub(crate) fn bakery_scope<'a>(
    session: &'a Session,
    context: &str,
) -> Result<&'a str, &'static str> {
    match scope(session, context)? {
        Scope::Bakery(id) => Ok(id),
        Scope::Platform => {
            dashboard_error!("{}: requires a bakery account", context);
            Err(MISSING_BAKERY)
        }
    }
}

pub(crate) fn settle_list<T>(
    context: &str,
    result: ApiResult<ApiListResponse<T>>,
) -> ApiListResponse<T> {
    match result {
        Ok(list) => list,
        Err(err) => {
            dashboard_error!("{}: {} ({})", context, err.message, err.kind);
            ApiListResponse::from_error(err.message)
        }
    }
}

pub(crate) fn settle_single<T>(
    context: &str,
    result: ApiResult<ApiSingleResponse<T>>,
) -> ApiSingleResponse<T> {
    match result {
        Ok(single) => single,
        Err(err) => {
            dashboard_error!("{}: {} ({})", context, err.message, err.kind);
            ApiSingleResponse::from_error(err.message)
        }
    }
}

/// For mutations whose response body carries nothing the caller needs.
pub(crate) fn settle_unit(
    context: &str,
    result: ApiResult<serde_json::Value>,
) -> ApiSingleResponse<()> {
    match result {
        Ok(_) => ApiSingleResponse {
            data: Some(()),
            error: None,
        },
        Err(err) => {
            dashboard_error!("{}: {} ({})", context, err.message, err.kind);
            ApiSingleResponse::from_error(err.message)
        }
    }
}
