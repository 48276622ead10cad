//! Plain-text rendering of dashboard pages.

use std::fmt::Write;

use dashboard_core::{order_progress, OrderStatus, StepState, TableConfig, TableViewModel};
use dashboard_engine::{
    DashboardData, PageOutcome, RenderedDetail, RenderedTable, Resource, SalesSeries,
};

use super::tables::status_label;

pub fn render_table_page(
    view: &TableViewModel,
    config: &TableConfig,
    outcome: &PageOutcome<RenderedTable>,
) -> String {
    match outcome {
        PageOutcome::Render(table) => render_table(view, config, table),
        PageOutcome::NotFound => "Not found.\n".to_string(),
        PageOutcome::Redirect(to) => render_redirect(to),
    }
}

pub fn render_redirect(to: &str) -> String {
    format!("Redirected to {to}\n")
}

pub fn render_table(view: &TableViewModel, config: &TableConfig, table: &RenderedTable) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}  {}", table.resource, view.url);
    if let Some(error) = &table.error {
        let _ = writeln!(out, "! {error}");
    }
    out.push_str(&render_grid(&table.columns, &table.rows));

    let pages = view.page_count.unwrap_or(table.page_count);
    let _ = writeln!(
        out,
        "page {}/{}  size {}  items {}",
        view.page, pages, view.page_size, table.total_items_count
    );
    if let Some(sort) = &view.sort {
        let _ = writeln!(out, "sorted by {} {:?}", sort.column, sort.direction);
    }
    if !view.search.is_empty() {
        let _ = writeln!(out, "search: {}", view.search);
    }
    for selection in &view.selections {
        let title = config
            .filterable_column(&selection.column)
            .map_or(selection.column.as_str(), |column| column.title.as_str());
        let _ = writeln!(out, "{}: {}", title, selection.values.join(", "));
    }
    out
}

fn render_grid(columns: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let mut out = String::new();
    push_row(&mut out, columns, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &rule, &widths);
    if rows.is_empty() {
        out.push_str("(no rows)\n");
    }
    for row in rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    let _ = writeln!(out, "{}", line.join("  ").trim_end());
}

pub fn render_detail_page(outcome: &PageOutcome<RenderedDetail>) -> String {
    match outcome {
        PageOutcome::Render(detail) => render_detail(detail),
        PageOutcome::NotFound => "Not found.\n".to_string(),
        PageOutcome::Redirect(to) => render_redirect(to),
    }
}

pub fn render_detail(detail: &RenderedDetail) -> String {
    let mut out = String::new();
    let width = detail
        .fields
        .iter()
        .map(|(name, _)| name.chars().count())
        .max()
        .unwrap_or(0);
    for (name, value) in &detail.fields {
        let _ = writeln!(out, "{name:>width$}: {value}");
    }

    if detail.resource == Resource::Orders {
        let status = detail
            .fields
            .iter()
            .find(|(name, _)| name == "status")
            .and_then(|(_, value)| OrderStatus::parse(value));
        if let Some(status) = status {
            out.push_str(&render_progress(status));
        }
    }
    out
}

fn render_progress(status: OrderStatus) -> String {
    let steps: Vec<String> = order_progress(status, None)
        .into_iter()
        .map(|step| {
            let mark = match step.state {
                StepState::Done => "x",
                StepState::Current => ">",
                StepState::Upcoming => " ",
                StepState::Failed => "!",
            };
            format!("[{mark}] {}", status_label(step.status))
        })
        .collect();
    format!("{}\n", steps.join(" -> "))
}

pub fn render_dashboard(data: &DashboardData) -> String {
    let mut out = String::new();
    let overview = &data.overview;
    let _ = writeln!(out, "Revenue        {:.0}", overview.total_revenue);
    let _ = writeln!(out, "Orders         {}", overview.total_orders);
    let _ = writeln!(out, "Customers      {}", overview.total_customers);
    let _ = writeln!(out, "Average order  {:.0}", overview.average_order_value);

    if !data.categories.is_empty() {
        out.push_str("\nCategories\n");
        for share in &data.categories {
            let _ = writeln!(out, "  {:<16} {:>5.1}%", share.category, share.percentage);
        }
    }
    if !data.products.is_empty() {
        out.push_str("\nTop products\n");
        for product in &data.products {
            let _ = writeln!(
                out,
                "  {:<24} {:>6} sold  {:.0}",
                product.cake_name, product.quantity_sold, product.revenue
            );
        }
    }

    match &data.sales {
        SalesSeries::Daily(points) if !points.is_empty() => {
            out.push_str("\nDaily sales\n");
            for point in points {
                let _ = writeln!(out, "  {}  {:.0}", point.date, point.revenue);
            }
        }
        SalesSeries::Monthly(points) if !points.is_empty() => {
            out.push_str("\nMonthly sales\n");
            for point in points {
                let _ = writeln!(out, "  {}  {:.0}", point.month, point.revenue);
            }
        }
        _ => {}
    }

    for error in &data.errors {
        let _ = writeln!(out, "! {error}");
    }
    out
}

#[cfg(test)]
mod tests {
    use dashboard_core::{SelectionView, Sort};
    use dashboard_engine::{MonthlyPoint, Overview};

    use super::super::tables::table_config;
    use super::*;

    fn view() -> TableViewModel {
        TableViewModel {
            page: 2,
            page_size: 10,
            page_count: Some(3),
            can_previous: true,
            can_next: true,
            sort: Some(Sort::desc("created_at")),
            search: "ORD".to_string(),
            selections: vec![SelectionView {
                column: "order_status".to_string(),
                values: vec!["PENDING".to_string(), "SHIPPING".to_string()],
            }],
            url: "/dashboard/orders?pageIndex=2".to_string(),
        }
    }

    #[test]
    fn table_shows_rows_and_state() {
        let table = RenderedTable {
            resource: Resource::Orders,
            columns: vec!["code".to_string(), "status".to_string()],
            rows: vec![vec!["ORD-1".to_string(), "PENDING".to_string()]],
            page_count: 3,
            total_items_count: 21,
            error: None,
        };
        let text = render_table(&view(), &table_config(Resource::Orders), &table);

        assert!(text.contains("ORD-1  PENDING"));
        assert!(text.contains("page 2/3  size 10  items 21"));
        assert!(text.contains("search: ORD"));
        assert!(text.contains("Status: PENDING, SHIPPING"));
    }

    #[test]
    fn failed_load_shows_the_message_over_an_empty_grid() {
        let table = RenderedTable {
            resource: Resource::Cakes,
            columns: vec!["name".to_string()],
            rows: Vec::new(),
            page_count: 0,
            total_items_count: 0,
            error: Some("The server encountered an error.".to_string()),
        };
        let text = render_table(&view(), &TableConfig::new(), &table);
        assert!(text.contains("! The server encountered an error."));
        assert!(text.contains("(no rows)"));
    }

    #[test]
    fn order_detail_includes_the_status_stepper() {
        let detail = RenderedDetail {
            resource: Resource::Orders,
            fields: vec![
                ("code".to_string(), "ORD-1".to_string()),
                ("status".to_string(), "PROCESSING".to_string()),
            ],
        };
        let text = render_detail(&detail);
        assert!(text.contains("[x] Accepted -> [>] Processing -> [ ] Ready for pickup"));
    }

    #[test]
    fn redirects_render_their_target() {
        let outcome: PageOutcome<RenderedDetail> = PageOutcome::Redirect("/".to_string());
        assert_eq!(render_detail_page(&outcome), "Redirected to /\n");
    }

    #[test]
    fn dashboard_labels_monthly_series() {
        let data = DashboardData {
            overview: Overview {
                total_revenue: 1500.0,
                total_orders: 12,
                ..Overview::default()
            },
            sales: SalesSeries::Monthly(vec![MonthlyPoint {
                month: "2024-04".to_string(),
                revenue: 1500.0,
                orders: 12,
            }]),
            ..DashboardData::default()
        };
        let text = render_dashboard(&data);
        assert!(text.contains("Monthly sales"));
        assert!(text.contains("2024-04  1500"));
        assert!(text.contains("Orders         12"));
    }
}
