//! Records returned by the bakery marketplace backend.
//!
//! Only `id` is mandatory; everything else defaults so one missing field
//! does not sink a whole page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A record that can be laid out as one row of a generic table.
pub trait TableRow {
    const COLUMNS: &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CustomerRef {
    pub id: String,
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    #[serde(default)]
    pub order_code: String,
    #[serde(default)]
    pub order_status: String,
    #[serde(default)]
    pub total_customer_paid: f64,
    #[serde(default)]
    pub payment_type: String,
    #[serde(default)]
    pub shipping_type: String,
    #[serde(default)]
    pub customer: Option<CustomerRef>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl TableRow for Order {
    const COLUMNS: &'static [&'static str] =
        &["code", "customer", "status", "paid", "payment", "created"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.order_code.clone(),
            self.customer
                .as_ref()
                .map(|customer| customer.name.clone())
                .unwrap_or_default(),
            self.order_status.clone(),
            format_money(self.total_customer_paid),
            self.payment_type.clone(),
            format_time(self.created_at),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cake {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_available: bool,
}

impl TableRow for Cake {
    const COLUMNS: &'static [&'static str] = &["name", "category", "price", "available"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.category.clone(),
            format_money(self.price),
            yes_no(self.is_available),
        ]
    }
}

/// Payload for creating a cake; the backend assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCake {
    pub name: String,
    pub price: f64,
    pub category: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ingredient_type: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub quantity: f64,
}

impl TableRow for Ingredient {
    const COLUMNS: &'static [&'static str] = &["name", "type", "price", "quantity"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.ingredient_type.clone(),
            format_money(self.price),
            format!("{} {}", self.quantity, self.unit).trim().to_string(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bakery {
    pub id: String,
    #[serde(default)]
    pub bakery_name: String,
    #[serde(default)]
    pub owner_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    /// `PENDING`, `CONFIRMED` or `BANNED`.
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl TableRow for Bakery {
    const COLUMNS: &'static [&'static str] = &["name", "owner", "email", "status", "created"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.bakery_name.clone(),
            self.owner_name.clone(),
            self.email.clone(),
            self.status.clone(),
            format_time(self.created_at),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Promotion {
    pub id: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub promotion_type: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub min_order_amount: f64,
    #[serde(default)]
    pub usage_count: u64,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub expiration_date: Option<DateTime<Utc>>,
}

impl TableRow for Promotion {
    const COLUMNS: &'static [&'static str] = &["code", "type", "amount", "used", "expires"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.code.clone(),
            self.promotion_type.clone(),
            format_money(self.amount),
            self.usage_count.to_string(),
            format_time(self.expiration_date),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPromotion {
    pub code: String,
    pub description: String,
    pub promotion_type: String,
    pub amount: f64,
    pub min_order_amount: f64,
    pub start_date: DateTime<Utc>,
    pub expiration_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub transaction_type: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl TableRow for Transaction {
    const COLUMNS: &'static [&'static str] = &["type", "amount", "content", "created"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.transaction_type.clone(),
            format_money(self.amount),
            self.content.clone(),
            format_time(self.created_at),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BadReport {
    pub id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub report_type: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl TableRow for BadReport {
    const COLUMNS: &'static [&'static str] = &["type", "status", "content", "created"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.report_type.clone(),
            self.status.clone(),
            self.content.clone(),
            format_time(self.created_at),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub notification_type: String,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl TableRow for Notification {
    const COLUMNS: &'static [&'static str] = &["title", "type", "read", "created"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.notification_type.clone(),
            yes_no(self.is_read),
            format_time(self.created_at),
        ]
    }
}

fn format_money(amount: f64) -> String {
    format!("{amount:.0}")
}

fn format_time(at: Option<DateTime<Utc>>) -> String {
    at.map(|at| at.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

fn yes_no(flag: bool) -> String {
    let label = if flag { "yes" } else { "no" };
    label.to_string()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn order_tolerates_missing_fields() {
        let order: Order = serde_json::from_value(json!({
            "id": "o1",
            "order_code": "ORD-1",
            "customer": {"name": "Lan"},
            "created_at": "2024-05-01T08:30:00Z"
        }))
        .unwrap();
        assert_eq!(
            order.cells(),
            vec!["ORD-1", "Lan", "", "0", "", "2024-05-01 08:30"]
        );
    }

    #[test]
    fn cells_line_up_with_columns() {
        let cake = Cake {
            id: "c1".to_string(),
            name: "Tiramisu".to_string(),
            price: 120000.0,
            category: "MOUSSE".to_string(),
            description: String::new(),
            is_available: true,
        };
        assert_eq!(cake.cells().len(), Cake::COLUMNS.len());
        assert_eq!(cake.cells()[2], "120000");
    }
}
