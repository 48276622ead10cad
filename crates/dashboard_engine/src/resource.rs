use std::fmt;

use dashboard_logging::dashboard_error;

use crate::actions::{
    bad_reports, bakeries, cakes, ingredients, notifications, orders, promotions, transactions,
};
use crate::backend::Backend;
use crate::models::TableRow;
use crate::page::{authorize, detail_outcome, PageOutcome};
use crate::session::{Role, Session};
use crate::{ApiListResponse, ApiSingleResponse, ListQuery};

const EVERYONE: &[Role] = &[Role::Admin, Role::Bakery];
const ADMINS: &[Role] = &[Role::Admin];
const BAKERIES: &[Role] = &[Role::Bakery];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Orders,
    Cakes,
    Ingredients,
    Bakeries,
    Promotions,
    Transactions,
    BadReports,
    Notifications,
}

impl Resource {
    pub const ALL: [Resource; 8] = [
        Resource::Orders,
        Resource::Cakes,
        Resource::Ingredients,
        Resource::Bakeries,
        Resource::Promotions,
        Resource::Transactions,
        Resource::BadReports,
        Resource::Notifications,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Resource::Orders => "orders",
            Resource::Cakes => "cakes",
            Resource::Ingredients => "ingredients",
            Resource::Bakeries => "bakeries",
            Resource::Promotions => "promotions",
            Resource::Transactions => "transactions",
            Resource::BadReports => "bad-reports",
            Resource::Notifications => "notifications",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim().to_ascii_lowercase().replace('_', "-");
        Resource::ALL
            .into_iter()
            .find(|resource| resource.as_str() == raw)
    }

    /// Dashboard page listing this resource.
    pub fn dashboard_path(self) -> String {
        format!("/dashboard/{}", self.as_str())
    }

    pub fn allowed_roles(self) -> &'static [Role] {
        match self {
            Resource::Bakeries => ADMINS,
            Resource::Transactions => BAKERIES,
            _ => EVERYONE,
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A list page laid out as plain strings for a generic table renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTable {
    pub resource: Resource,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub page_count: u64,
    pub total_items_count: u64,
    pub error: Option<String>,
}

impl RenderedTable {
    pub fn from_list<T: TableRow>(resource: Resource, list: ApiListResponse<T>) -> Self {
        Self {
            resource,
            columns: T::COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows: list.data.iter().map(TableRow::cells).collect(),
            page_count: list.page_count,
            total_items_count: list.total_items_count,
            error: list.error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDetail {
    pub resource: Resource,
    pub fields: Vec<(String, String)>,
}

impl RenderedDetail {
    fn from_record<T: TableRow>(resource: Resource, record: &T) -> Self {
        Self {
            resource,
            fields: T::COLUMNS
                .iter()
                .map(|c| c.to_string())
                .zip(record.cells())
                .collect(),
        }
    }
}

pub async fn load_table(
    backend: &dyn Backend,
    session: &Session,
    resource: Resource,
    query: &ListQuery,
) -> PageOutcome<RenderedTable> {
    if let Err(redirect) = authorize(session, resource.allowed_roles()) {
        return redirect.into();
    }
    let table = match resource {
        Resource::Orders => {
            RenderedTable::from_list(resource, orders::get_orders(backend, session, query).await)
        }
        Resource::Cakes => {
            RenderedTable::from_list(resource, cakes::get_cakes(backend, session, query).await)
        }
        Resource::Ingredients => RenderedTable::from_list(
            resource,
            ingredients::get_ingredients(backend, session, query).await,
        ),
        Resource::Bakeries => RenderedTable::from_list(
            resource,
            bakeries::get_bakeries(backend, session, query).await,
        ),
        Resource::Promotions => RenderedTable::from_list(
            resource,
            promotions::get_promotions(backend, session, query).await,
        ),
        Resource::Transactions => {
            let list = match session.wallet_id() {
                Some(wallet_id) => {
                    transactions::get_wallet_transactions(backend, wallet_id, query).await
                }
                None => {
                    dashboard_error!("load_table: session has no wallet");
                    ApiListResponse::from_error("No wallet is associated with this account.")
                }
            };
            RenderedTable::from_list(resource, list)
        }
        Resource::BadReports => RenderedTable::from_list(
            resource,
            bad_reports::get_bad_reports(backend, session, query).await,
        ),
        Resource::Notifications => RenderedTable::from_list(
            resource,
            notifications::get_notifications(backend, session, query).await,
        ),
    };
    PageOutcome::Render(table)
}

pub async fn load_detail(
    backend: &dyn Backend,
    session: &Session,
    resource: Resource,
    id: &str,
) -> PageOutcome<RenderedDetail> {
    if let Err(redirect) = authorize(session, resource.allowed_roles()) {
        return redirect.into();
    }
    match resource {
        Resource::Orders => render_detail(resource, orders::get_order(backend, id).await),
        Resource::Cakes => render_detail(resource, cakes::get_cake(backend, id).await),
        Resource::Ingredients => {
            render_detail(resource, ingredients::get_ingredient(backend, id).await)
        }
        Resource::Bakeries => render_detail(resource, bakeries::get_bakery(backend, id).await),
        Resource::Promotions => {
            render_detail(resource, promotions::get_promotion(backend, id).await)
        }
        Resource::BadReports => {
            render_detail(resource, bad_reports::get_bad_report(backend, id).await)
        }
        // Listed only; the dashboard has no detail page for these.
        Resource::Transactions | Resource::Notifications => PageOutcome::NotFound,
    }
}

fn render_detail<T: TableRow>(
    resource: Resource,
    response: ApiSingleResponse<T>,
) -> PageOutcome<RenderedDetail> {
    match detail_outcome(response) {
        PageOutcome::Render(record) => {
            PageOutcome::Render(RenderedDetail::from_record(resource, &record))
        }
        PageOutcome::NotFound => PageOutcome::NotFound,
        PageOutcome::Redirect(to) => PageOutcome::Redirect(to),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resources_parse_from_cli_spelling() {
        assert_eq!(Resource::parse("bad_reports"), Some(Resource::BadReports));
        assert_eq!(Resource::parse("Orders"), Some(Resource::Orders));
        assert_eq!(Resource::parse("wallets"), None);
        for resource in Resource::ALL {
            assert_eq!(Resource::parse(resource.as_str()), Some(resource));
        }
    }

    #[test]
    fn dashboard_paths_follow_resource_names() {
        assert_eq!(Resource::BadReports.dashboard_path(), "/dashboard/bad-reports");
    }
}
