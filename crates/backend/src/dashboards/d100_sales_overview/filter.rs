use contracts::dashboards::d100_sales_overview::{DateRange, FilterSpec};
use contracts::domain::a001_order::Order;
use contracts::domain::a002_customer::{Customer, CustomerId};
use std::collections::HashMap;

/// `FilterSpec` prepared for evaluation: bounds resolved, needles lowercased,
/// inactive clauses dropped.
#[derive(Debug, Clone, Default)]
pub struct CompiledFilter {
    /// Set only when both bounds are present
    date_range: Option<DateRange>,
    product: Option<String>,
    city: Option<String>,
    channel: Option<String>,
    status: Option<String>,
}

impl CompiledFilter {
    pub fn new(spec: &FilterSpec) -> Self {
        Self {
            date_range: Some(spec.date_range.clone()).filter(DateRange::is_active),
            product: needle(&spec.product),
            city: needle(&spec.city),
            channel: needle(&spec.channel),
            status: needle(&spec.status),
        }
    }

    /// `true` when no clause is active
    pub fn is_identity(&self) -> bool {
        self.date_range.is_none()
            && self.product.is_none()
            && self.city.is_none()
            && self.channel.is_none()
            && self.status.is_none()
    }

    pub fn needs_customers(&self) -> bool {
        self.city.is_some()
    }

    /// Evaluate all active clauses, stopping at the first that fails.
    ///
    /// `customer_city` is only consulted when the city clause is active.
    pub fn matches<'c>(
        &self,
        order: &Order,
        customer_city: impl FnOnce(&CustomerId) -> Option<&'c str>,
    ) -> bool {
        if let Some(range) = &self.date_range {
            match order.order_date {
                Some(at) if range.contains(at) => {}
                _ => return false,
            }
        }
        if !field_matches(order.sold_products.as_deref(), self.product.as_deref()) {
            return false;
        }
        if !field_matches(order.channel(), self.channel.as_deref()) {
            return false;
        }
        if !field_matches(order.status.as_deref(), self.status.as_deref()) {
            return false;
        }
        if let Some(city) = self.city.as_deref() {
            if !field_matches(customer_city(&order.customer_id), Some(city)) {
                return false;
            }
        }
        true
    }
}

fn needle(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Case-insensitive substring check; an absent field never matches an
/// active clause.
fn field_matches(value: Option<&str>, needle: Option<&str>) -> bool {
    match needle {
        None => true,
        Some(needle) => value.is_some_and(|v| v.to_lowercase().contains(needle)),
    }
}

/// Orders matching every active clause of `spec`.
///
/// Customers are joined by id for the city clause; an order whose customer
/// is unknown or has no city fails that clause.
pub fn apply(orders: &[Order], customers: &[Customer], spec: &FilterSpec) -> Vec<Order> {
    let mut index: HashMap<&CustomerId, &Customer> = HashMap::new();
    if CompiledFilter::new(spec).needs_customers() {
        for customer in customers {
            index.entry(&customer.customer_id).or_insert(customer);
        }
    }
    apply_with(orders, |id| index.get(id).copied(), spec)
}

/// Same as [`apply`] with a caller-provided customer lookup
pub fn apply_with<'c, F>(orders: &[Order], lookup: F, spec: &FilterSpec) -> Vec<Order>
where
    F: Fn(&CustomerId) -> Option<&'c Customer>,
{
    let compiled = CompiledFilter::new(spec);
    if compiled.is_identity() {
        return orders.to_vec();
    }

    let filtered: Vec<Order> = orders
        .iter()
        .filter(|order| {
            compiled.matches(order, |id| lookup(id).and_then(|c| c.city.as_deref()))
        })
        .cloned()
        .collect();

    tracing::debug!("filter kept {} of {} orders", filtered.len(), orders.len());
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use contracts::domain::a001_order::{Attribution, OrderNumber};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn order(number: &str, customer: &str, date: Option<NaiveDateTime>, value: f64) -> Order {
        Order {
            order_number: OrderNumber::new(number),
            order_date: date,
            customer_id: CustomerId::new(customer),
            customer_name: String::new(),
            status: Some("Entregue".into()),
            total_value: value,
            item_count: 1,
            payment_method: Some("Pix".into()),
            coupon_used: None,
            attribution: Attribution {
                source: Some("Instagram".into()),
                ..Attribution::default()
            },
            origin_url: None,
            sold_products: Some("Tênis Runner, Boné".into()),
            category: None,
        }
    }

    fn customer(id: &str, city: Option<&str>) -> Customer {
        Customer {
            customer_id: CustomerId::new(id),
            name: String::new(),
            email: String::new(),
            phone: None,
            birth_date: None,
            city: city.map(str::to_string),
            state: None,
            address: None,
        }
    }

    fn numbers(orders: &[Order]) -> Vec<&str> {
        orders.iter().map(|o| o.order_number.as_str()).collect()
    }

    #[test]
    fn test_empty_spec_is_identity() {
        let orders = vec![
            order("1", "C1", None, 10.0),
            order("2", "C2", day(1).and_hms_opt(8, 0, 0), 20.0),
        ];
        let filtered = apply(&orders, &[], &FilterSpec::default());
        assert_eq!(filtered, orders);
    }

    #[test]
    fn test_date_range_is_inclusive_at_both_ends() {
        let orders = vec![
            order("start", "C", day(1).and_hms_opt(0, 0, 0), 1.0),
            order("late", "C", day(3).and_hms_opt(23, 59, 59), 1.0),
            order("after", "C", day(4).and_hms_opt(0, 0, 0), 1.0),
            order("before", "C", day(1).pred_opt().unwrap().and_hms_opt(23, 0, 0), 1.0),
            order("undated", "C", None, 1.0),
        ];
        let spec = FilterSpec::default().with_date_range(DateRange::new(day(1), day(3)));

        assert_eq!(numbers(&apply(&orders, &[], &spec)), vec!["start", "late"]);
    }

    #[test]
    fn test_same_day_range_includes_any_time() {
        let orders = vec![
            order("morning", "C", day(2).and_hms_opt(6, 15, 0), 1.0),
            order("night", "C", day(2).and_hms_opt(23, 59, 59), 1.0),
        ];
        let spec = FilterSpec::default().with_date_range(DateRange::day(day(2)));
        assert_eq!(apply(&orders, &[], &spec).len(), 2);
    }

    #[test]
    fn test_last_fraction_of_a_second_stays_on_its_day() {
        let orders = vec![
            order("sub-milli", "C", day(2).and_hms_nano_opt(23, 59, 59, 999_500_000), 1.0),
            order("next-day", "C", day(3).and_hms_opt(0, 0, 0), 1.0),
        ];
        let spec = FilterSpec::default().with_date_range(DateRange::day(day(2)));
        assert_eq!(numbers(&apply(&orders, &[], &spec)), vec!["sub-milli"]);
    }

    #[test]
    fn test_half_open_range_is_ignored() {
        let orders = vec![order("1", "C", None, 1.0)];
        let spec = FilterSpec::default().with_date_range(DateRange {
            from: Some(day(1)),
            to: None,
        });
        assert_eq!(apply(&orders, &[], &spec).len(), 1);
    }

    #[test]
    fn test_product_matches_raw_text() {
        let mut other = order("2", "C", None, 1.0);
        other.sold_products = None;
        let orders = vec![order("1", "C", None, 1.0), other];

        // substring across the separator still matches: the field is raw text
        let spec = FilterSpec::default().with_product("runner, bo");
        assert_eq!(numbers(&apply(&orders, &[], &spec)), vec!["1"]);

        let spec = FilterSpec::default().with_product("TÊNIS");
        assert_eq!(numbers(&apply(&orders, &[], &spec)), vec!["1"]);
    }

    #[test]
    fn test_city_requires_known_customer_with_city() {
        let orders = vec![
            order("rio", "C1", None, 1.0),
            order("no-city", "C2", None, 1.0),
            order("unknown", "C9", None, 1.0),
        ];
        let customers = vec![customer("C1", Some("Rio de Janeiro")), customer("C2", None)];

        let spec = FilterSpec::default().with_city("rio");
        assert_eq!(numbers(&apply(&orders, &customers, &spec)), vec!["rio"]);
    }

    #[test]
    fn test_channel_and_status_need_the_field() {
        let mut direct = order("direct", "C", None, 1.0);
        direct.attribution.source = None;
        direct.status = None;
        let orders = vec![order("social", "C", None, 1.0), direct];

        let spec = FilterSpec::default().with_channel("insta");
        assert_eq!(numbers(&apply(&orders, &[], &spec)), vec!["social"]);

        let spec = FilterSpec::default().with_status("entreg");
        assert_eq!(numbers(&apply(&orders, &[], &spec)), vec!["social"]);
    }

    #[test]
    fn test_clauses_are_combined_with_and() {
        let orders = vec![
            order("1", "C1", day(5).and_hms_opt(12, 0, 0), 1.0),
            order("2", "C2", day(5).and_hms_opt(12, 0, 0), 1.0),
        ];
        let customers = vec![customer("C1", Some("Rio")), customer("C2", Some("SP"))];
        let spec = FilterSpec::default()
            .with_date_range(DateRange::day(day(5)))
            .with_city("SP")
            .with_status("entregue");

        let filtered = apply(&orders, &customers, &spec);
        assert_eq!(numbers(&filtered), vec!["2"]);
        assert!(filtered.len() <= orders.len());
    }
}
