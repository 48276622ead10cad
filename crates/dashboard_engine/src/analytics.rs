//! Sales analytics shown on the dashboard landing page.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::actions::{scope, settle_single, Scope};
use crate::backend::Backend;
use crate::normalize::fetch_single_data;
use crate::session::Session;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Overview {
    pub total_revenue: f64,
    pub total_orders: u64,
    pub total_customers: u64,
    pub average_order_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: String,
    #[serde(default)]
    pub revenue: f64,
    #[serde(default)]
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPerformance {
    pub cake_id: String,
    #[serde(default)]
    pub cake_name: String,
    #[serde(default)]
    pub quantity_sold: u64,
    #[serde(default)]
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPoint {
    #[serde(deserialize_with = "calendar_date")]
    pub date: NaiveDate,
    #[serde(default)]
    pub revenue: f64,
    #[serde(default)]
    pub orders: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPoint {
    /// `YYYY-MM`.
    pub month: String,
    #[serde(default)]
    pub revenue: f64,
    #[serde(default)]
    pub orders: u64,
}

/// Sales over time. The backend answers with either daily or monthly points;
/// which one is decided here, from the keys of the first point, so renderers
/// never have to look at keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SalesSeries {
    Daily(Vec<DailyPoint>),
    Monthly(Vec<MonthlyPoint>),
}

impl<'de> Deserialize<'de> for SalesSeries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let points = Vec::<Value>::deserialize(deserializer)?;
        let monthly = points
            .first()
            .is_some_and(|point| point.get("date").is_none() && point.get("month").is_some());
        let points = Value::Array(points);
        if monthly {
            serde_json::from_value(points)
                .map(SalesSeries::Monthly)
                .map_err(de::Error::custom)
        } else {
            serde_json::from_value(points)
                .map(SalesSeries::Daily)
                .map_err(de::Error::custom)
        }
    }
}

/// Accepts `YYYY-MM-DD` as well as a timestamp, keeping only its date.
fn calendar_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
    let raw = String::deserialize(deserializer)?;
    if let Ok(date) = NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(stamp.date_naive());
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|stamp| stamp.date())
        .map_err(|_| de::Error::custom(format!("unrecognised date {raw:?}")))
}

impl Default for SalesSeries {
    fn default() -> Self {
        SalesSeries::Daily(Vec::new())
    }
}

impl SalesSeries {
    pub fn is_empty(&self) -> bool {
        match self {
            SalesSeries::Daily(points) => points.is_empty(),
            SalesSeries::Monthly(points) => points.is_empty(),
        }
    }

    pub fn total_revenue(&self) -> f64 {
        match self {
            SalesSeries::Daily(points) => points.iter().map(|p| p.revenue).sum(),
            SalesSeries::Monthly(points) => points.iter().map(|p| p.revenue).sum(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardData {
    pub overview: Overview,
    pub categories: Vec<CategoryShare>,
    pub products: Vec<ProductPerformance>,
    pub sales: SalesSeries,
    /// One entry per section that fell back to its default.
    pub errors: Vec<String>,
}

struct SectionPaths {
    overview: String,
    categories: String,
    products: String,
    sales: String,
}

impl SectionPaths {
    fn for_scope(scope: Scope<'_>) -> Self {
        Self {
            overview: scope.path("/admins/overview", "overview"),
            categories: scope.path("/admins/category-distribution", "category-distribution"),
            products: scope.path("/admins/product-performance", "product-performance"),
            sales: scope.path("/admins/sales-overview", "sales-overview"),
        }
    }
}

/// Loads every dashboard section concurrently. Each section settles on its
/// own; a failed one is logged and defaulted without affecting the others.
pub async fn load_dashboard(backend: &dyn Backend, session: &Session) -> DashboardData {
    let scope = match scope(session, "load_dashboard") {
        Ok(scope) => scope,
        Err(message) => {
            return DashboardData {
                errors: vec![message.to_string()],
                ..DashboardData::default()
            }
        }
    };
    let paths = SectionPaths::for_scope(scope);

    let (overview, categories, products, sales) = tokio::join!(
        section::<Overview>(backend, &paths.overview, "overview"),
        section::<Vec<CategoryShare>>(backend, &paths.categories, "category_distribution"),
        section::<Vec<ProductPerformance>>(backend, &paths.products, "product_performance"),
        section::<SalesSeries>(backend, &paths.sales, "sales_overview"),
    );

    let errors = [&overview.1, &categories.1, &products.1, &sales.1]
        .into_iter()
        .flatten()
        .cloned()
        .collect();

    DashboardData {
        overview: overview.0,
        categories: categories.0,
        products: products.0,
        sales: sales.0,
        errors,
    }
}

pub async fn get_sales_overview(backend: &dyn Backend, session: &Session) -> SalesSeries {
    match scope(session, "get_sales_overview") {
        Ok(scope) => {
            let path = SectionPaths::for_scope(scope).sales;
            section::<SalesSeries>(backend, &path, "sales_overview").await.0
        }
        Err(_) => SalesSeries::default(),
    }
}

async fn section<T>(backend: &dyn Backend, path: &str, context: &str) -> (T, Option<String>)
where
    T: DeserializeOwned + Default,
{
    let response = settle_single(context, fetch_single_data::<T>(backend, path).await);
    (response.data.unwrap_or_default(), response.error)
}
