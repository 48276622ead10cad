//! Column declarations for each dashboard list page.

use dashboard_core::query::split_location;
use dashboard_core::{FilterOption, Modal, OrderStatus, TableConfig};
use dashboard_engine::Resource;

pub fn table_config(resource: Resource) -> TableConfig {
    match resource {
        Resource::Orders => TableConfig::new()
            .with_searchable("order_code")
            .with_searchable("customer_name")
            .with_filterable("order_status", "Status", order_status_options()),
        Resource::Cakes => TableConfig::new().with_searchable("name").with_filterable(
            "category",
            "Category",
            vec![
                FilterOption::new("Bread", "BREAD"),
                FilterOption::new("Cream", "CREAM"),
                FilterOption::new("Chocolate", "CHOCOLATE"),
                FilterOption::new("Fruit", "FRUIT"),
            ],
        ),
        Resource::Ingredients => TableConfig::new().with_searchable("name").with_filterable(
            "ingredient_type",
            "Type",
            vec![
                FilterOption::new("Color", "COLOR"),
                FilterOption::new("Decoration", "DECORATION"),
                FilterOption::new("Flavor", "FLAVOR"),
                FilterOption::new("Sponge", "SPONGE"),
            ],
        ),
        Resource::Bakeries => TableConfig::new()
            .with_searchable("bakery_name")
            .with_filterable(
                "status",
                "Status",
                vec![
                    FilterOption::new("Pending", "PENDING"),
                    FilterOption::new("Confirmed", "CONFIRMED"),
                    FilterOption::new("Banned", "BANNED"),
                ],
            ),
        Resource::Promotions => TableConfig::new().with_searchable("code").with_filterable(
            "promotion_type",
            "Type",
            vec![
                FilterOption::new("Percentage", "PERCENTAGE"),
                FilterOption::new("Fixed amount", "FIXED_AMOUNT"),
            ],
        ),
        Resource::Transactions => TableConfig::new().with_filterable(
            "transaction_type",
            "Type",
            vec![
                FilterOption::new("Deposit", "DEPOSIT"),
                FilterOption::new("Withdraw", "WITHDRAW"),
                FilterOption::new("Payment", "PAYMENT"),
            ],
        ),
        Resource::BadReports => TableConfig::new().with_searchable("content").with_filterable(
            "status",
            "Status",
            vec![
                FilterOption::new("Pending", "PENDING"),
                FilterOption::new("Resolved", "RESOLVED"),
            ],
        ),
        Resource::Notifications => TableConfig::new().with_searchable("title"),
    }
}

fn order_status_options() -> Vec<FilterOption> {
    [
        OrderStatus::Pending,
        OrderStatus::Accepted,
        OrderStatus::Processing,
        OrderStatus::ReadyForPickup,
        OrderStatus::Shipping,
        OrderStatus::Completed,
        OrderStatus::Canceled,
        OrderStatus::Faulty,
    ]
    .into_iter()
    .map(|status| FilterOption::new(status_label(status), status.as_str()))
    .collect()
}

pub fn status_label(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Pending => "Pending",
        OrderStatus::Accepted => "Accepted",
        OrderStatus::Processing => "Processing",
        OrderStatus::ReadyForPickup => "Ready for pickup",
        OrderStatus::Shipping => "Shipping",
        OrderStatus::Completed => "Completed",
        OrderStatus::Canceled => "Canceled",
        OrderStatus::Faulty => "Faulty",
    }
}

/// Whether `location` points at the list page of `resource`, ignoring its query.
pub fn is_resource_location(resource: Resource, location: &str) -> bool {
    split_location(location).0 == resource.dashboard_path()
}

/// Detail dialog shown when a row of `resource` is opened, if it has one.
pub fn detail_modal(resource: Resource, id: &str) -> Option<Modal> {
    let id = id.to_string();
    let modal = match resource {
        Resource::Orders => Modal::OrderDetail { order_id: id },
        Resource::Cakes => Modal::CakeDetail { cake_id: id },
        Resource::Bakeries => Modal::BakeryDetail { bakery_id: id },
        Resource::BadReports => Modal::BadReportDetail { report_id: id },
        Resource::Promotions => Modal::PromotionForm {
            promotion_id: Some(id),
        },
        Resource::Ingredients | Resource::Transactions | Resource::Notifications => return None,
    };
    Some(modal)
}

/// Resource and id a detail modal loads, the inverse of [`detail_modal`].
pub fn modal_target(modal: &Modal) -> Option<(Resource, &str)> {
    match modal {
        Modal::OrderDetail { order_id } => Some((Resource::Orders, order_id)),
        Modal::CakeDetail { cake_id } => Some((Resource::Cakes, cake_id)),
        Modal::BakeryDetail { bakery_id } => Some((Resource::Bakeries, bakery_id)),
        Modal::BadReportDetail { report_id } => Some((Resource::BadReports, report_id)),
        Modal::PromotionForm {
            promotion_id: Some(id),
        } => Some((Resource::Promotions, id)),
        _ => None,
    }
}
