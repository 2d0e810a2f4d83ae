//! Chart series for the overview page.

use chrono::NaiveDate;
use contracts::dashboards::d100_sales_overview::{BreakdownRow, Breakdowns, DailySales, ProductSales};
use contracts::domain::a001_order::Order;
use std::collections::{BTreeMap, HashMap};

use crate::domain::a003_product::ProductCatalog;

/// Label for orders without attribution
pub const DIRECT_LABEL: &str = "Direct";
/// Label for orders without a campaign
pub const NO_CAMPAIGN_LABEL: &str = "No campaign";
/// Label for orders without a payment method
pub const UNKNOWN_PAYMENT_LABEL: &str = "Unknown";

const TOP_SOURCES: usize = 8;
const TOP_MEDIUMS: usize = 8;
const TOP_CAMPAIGNS: usize = 10;
const TOP_PRODUCTS: usize = 10;

pub fn build(orders: &[Order], catalog: &ProductCatalog<'_>) -> Breakdowns {
    Breakdowns {
        sales_by_day: sales_by_day(orders),
        by_payment_method: group_by(orders, |o| o.payment_method.as_deref(), UNKNOWN_PAYMENT_LABEL, None),
        by_source: group_by(orders, |o| o.attribution.source.as_deref(), DIRECT_LABEL, Some(TOP_SOURCES)),
        by_medium: group_by(orders, |o| o.attribution.medium.as_deref(), DIRECT_LABEL, Some(TOP_MEDIUMS)),
        by_campaign: group_by(
            orders,
            |o| o.attribution.campaign.as_deref(),
            NO_CAMPAIGN_LABEL,
            Some(TOP_CAMPAIGNS),
        ),
        top_products: top_products(orders, catalog, TOP_PRODUCTS),
    }
}

/// Revenue per calendar day, oldest first. Undated orders are left out.
pub fn sales_by_day(orders: &[Order]) -> Vec<DailySales> {
    let mut days: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for order in orders {
        if let Some(date) = order.order_date {
            let entry = days.entry(date.date()).or_insert((0.0, 0));
            entry.0 += order.total_value;
            entry.1 += 1;
        }
    }

    days.into_iter()
        .map(|(date, (revenue, orders))| DailySales { date, revenue, orders })
        .collect()
}

/// Revenue grouped by `key`, highest revenue first.
///
/// Missing or blank keys fall into `fallback`; `limit` keeps only the top rows.
pub fn group_by<F>(orders: &[Order], key: F, fallback: &str, limit: Option<usize>) -> Vec<BreakdownRow>
where
    F: Fn(&Order) -> Option<&str>,
{
    let mut groups: HashMap<&str, BreakdownRow> = HashMap::new();
    for order in orders {
        let label = key(order).map(str::trim).filter(|k| !k.is_empty()).unwrap_or(fallback);
        let row = groups.entry(label).or_insert_with(|| BreakdownRow {
            label: label.to_string(),
            revenue: 0.0,
            orders: 0,
        });
        row.revenue += order.total_value;
        row.orders += 1;
    }

    let mut rows: Vec<BreakdownRow> = groups.into_values().collect();
    rows.sort_by(|a, b| b.revenue.total_cmp(&a.revenue).then_with(|| a.label.cmp(&b.label)));
    if let Some(limit) = limit {
        rows.truncate(limit);
    }
    rows
}

/// Best-selling products by attributed revenue.
///
/// Each order's value is split evenly over its product tokens. Tokens that
/// resolve in the catalog are reported under the product name; the rest
/// under the raw token.
pub fn top_products(orders: &[Order], catalog: &ProductCatalog<'_>, limit: usize) -> Vec<ProductSales> {
    let mut products: HashMap<String, ProductSales> = HashMap::new();
    for order in orders {
        let tokens = order.product_tokens();
        if tokens.is_empty() {
            continue;
        }
        let share = order.total_value / tokens.len() as f64;

        for token in tokens {
            let resolved = catalog.resolve(token);
            let key = match resolved {
                Some(product) => format!("id:{}", product.product_id),
                None => format!("token:{token}"),
            };
            let entry = products.entry(key).or_insert_with(|| ProductSales {
                product_id: resolved.map(|p| p.product_id.to_string()),
                label: resolved.map_or_else(|| token.to_string(), |p| p.name.clone()),
                revenue: 0.0,
                quantity: 0,
            });
            entry.revenue += share;
            entry.quantity += 1;
        }
    }

    let mut rows: Vec<ProductSales> = products.into_values().collect();
    rows.sort_by(|a, b| b.revenue.total_cmp(&a.revenue).then_with(|| a.label.cmp(&b.label)));
    rows.truncate(limit);
    rows
}
