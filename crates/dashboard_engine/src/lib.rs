//! Dashboard engine: data access against the bakery marketplace backend.
pub mod actions;
mod analytics;
mod backend;
mod engine;
pub mod models;
mod normalize;
mod page;
mod resource;
mod session;
mod translate;
mod types;

pub use analytics::{
    get_sales_overview, load_dashboard, CategoryShare, DailyPoint, DashboardData, MonthlyPoint,
    Overview, ProductPerformance, SalesSeries,
};
pub use backend::{
    api_request, ApiSettings, Backend, ReqwestBackend, BASE_URL_ENV, TIMEOUT_ENV, TOKEN_ENV,
};
pub use engine::{EngineEvent, EngineHandle, PageRequest, RequestId};
pub use normalize::{fetch_list_data, fetch_single_data, send_single_data};
pub use page::{authorize, detail_outcome, PageOutcome, Redirect, DASHBOARD_PATH, SIGN_IN_PATH};
pub use reqwest::Method;
pub use resource::{load_detail, load_table, RenderedDetail, RenderedTable, Resource};
pub use session::{Role, Session, SessionEntity, SessionUser};
pub use translate::translate;
pub use types::{ApiError, ApiListResponse, ApiResult, ApiSingleResponse, FailureKind, ListQuery};
