use contracts::dashboards::d100_sales_overview::Facets;
use contracts::domain::a001_order::Order;
use contracts::domain::a002_customer::Customer;
use std::collections::BTreeSet;

/// Distinct values offered by the filter controls.
///
/// Depends only on the dataset, never on the current filters.
pub fn extract(orders: &[Order], customers: &[Customer]) -> Facets {
    let mut products = BTreeSet::new();
    let mut channels = BTreeSet::new();
    let mut statuses = BTreeSet::new();

    for order in orders {
        products.extend(order.product_tokens());
        insert_non_empty(&mut channels, order.channel());
        insert_non_empty(&mut statuses, order.status.as_deref());
    }

    let mut cities = BTreeSet::new();
    for customer in customers {
        insert_non_empty(&mut cities, customer.city.as_deref());
    }

    Facets {
        products: into_sorted(products),
        cities: into_sorted(cities),
        channels: into_sorted(channels),
        statuses: into_sorted(statuses),
    }
}

fn insert_non_empty<'a>(set: &mut BTreeSet<&'a str>, value: Option<&'a str>) {
    if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
        set.insert(value);
    }
}

fn into_sorted(set: BTreeSet<&str>) -> Vec<String> {
    set.into_iter().map(str::to_string).collect()
}
