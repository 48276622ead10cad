//! Page-level guards: who may see a page, and what a missing entity renders.

use crate::session::{Role, Session, SessionUser};
use crate::ApiSingleResponse;

pub const SIGN_IN_PATH: &str = "/";
pub const DASHBOARD_PATH: &str = "/dashboard";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect(pub String);

#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome<T> {
    Render(T),
    NotFound,
    Redirect(String),
}

impl<T> From<Redirect> for PageOutcome<T> {
    fn from(redirect: Redirect) -> Self {
        PageOutcome::Redirect(redirect.0)
    }
}

/// Signed-out visitors go to sign-in; signed-in users without one of
/// `allowed` go back to the dashboard.
pub fn authorize<'a>(session: &'a Session, allowed: &[Role]) -> Result<&'a SessionUser, Redirect> {
    let user = session
        .user
        .as_ref()
        .ok_or_else(|| Redirect(SIGN_IN_PATH.to_string()))?;
    if allowed.contains(&user.role) {
        Ok(user)
    } else {
        Err(Redirect(DASHBOARD_PATH.to_string()))
    }
}

pub fn detail_outcome<T>(response: ApiSingleResponse<T>) -> PageOutcome<T> {
    match response.data {
        Some(data) => PageOutcome::Render(data),
        None => PageOutcome::NotFound,
    }
}
