use contracts::dashboards::d100_sales_overview::KpiSnapshot;
use contracts::domain::a001_order::Order;
use std::collections::HashSet;

use crate::domain::a003_product::ProductCatalog;

/// Share of the sale value assumed to be cost of goods when the real cost
/// is unknown.
pub const FALLBACK_COST_RATIO: f64 = 0.6;

/// Summary metrics of `orders`. Pure: the same inputs always give the same
/// snapshot.
///
/// Every ratio is `0` when its denominator is `0`.
pub fn compute(orders: &[Order], catalog: &ProductCatalog<'_>) -> KpiSnapshot {
    let total_revenue: f64 = orders.iter().map(|o| o.total_value).sum();
    let total_orders = orders.len();
    let unique_customer_count = orders
        .iter()
        .map(|o| &o.customer_id)
        .collect::<HashSet<_>>()
        .len();
    let total_items_sold: u64 = orders.iter().map(|o| u64::from(o.item_count)).sum();
    let total_cost: f64 = orders.iter().map(|o| attributed_cost(o, catalog)).sum();

    let profit = total_revenue - total_cost;

    KpiSnapshot {
        total_revenue,
        total_orders,
        average_order_value: ratio(total_revenue, total_orders as f64),
        unique_customer_count,
        total_items_sold,
        total_cost,
        margin_percent: ratio(profit, total_revenue) * 100.0,
        roas: ratio(total_revenue, total_cost),
        roi_percent: ratio(profit, total_cost) * 100.0,
    }
}

/// Cost of goods attributed to one order.
///
/// The order value is split evenly over its N product tokens. A token that
/// resolves to a product with a known cost contributes `cost / N`; any other
/// token contributes `0.6 * total_value / N`. An order without product
/// tokens contributes `0.6 * total_value`.
pub fn attributed_cost(order: &Order, catalog: &ProductCatalog<'_>) -> f64 {
    let tokens = order.product_tokens();
    if tokens.is_empty() {
        return order.total_value * FALLBACK_COST_RATIO;
    }

    let n = tokens.len() as f64;
    tokens
        .iter()
        .map(|token| match catalog.resolve(token).and_then(|p| p.cost) {
            Some(cost) => cost / n,
            None => order.total_value * FALLBACK_COST_RATIO / n,
        })
        .sum()
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}
