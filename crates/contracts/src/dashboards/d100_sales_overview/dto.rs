use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::a001_order::Order;
use crate::shared::indicators::IndicatorValue;

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Inclusive calendar date range. Only active when both bounds are set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default)]
    pub from: Option<NaiveDate>,
    #[serde(default)]
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    /// Range covering a single calendar day
    pub fn day(date: NaiveDate) -> Self {
        Self::new(date, date)
    }

    pub fn is_active(&self) -> bool {
        self.from.is_some() && self.to.is_some()
    }

    /// `(from, to)`, or `None` while the range is incomplete.
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.from?, self.to?))
    }

    /// Whether `at` falls on a calendar day inside the range, whatever its
    /// time of day. An incomplete range contains nothing.
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.bounds()
            .is_some_and(|(from, to)| from <= at.date() && at.date() <= to)
    }

    /// Preceding window of the same length, ending the day before `from`.
    /// `None` for incomplete or inverted ranges.
    pub fn previous(&self) -> Option<DateRange> {
        let from = self.from?;
        let to = self.to?;
        if to < from {
            return None;
        }
        let days = (to - from).num_days() + 1;
        let prev_to = from.pred_opt()?;
        let prev_from = prev_to.checked_sub_signed(chrono::Duration::days(days - 1))?;
        Some(DateRange::new(prev_from, prev_to))
    }
}

/// Dashboard filter state.
///
/// Every text clause is a case-insensitive substring match; an empty
/// string means the clause is off.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterSpec {
    #[serde(default)]
    pub date_range: DateRange,
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub channel: String,
    #[serde(default)]
    pub status: String,
}

impl FilterSpec {
    /// `true` when no clause is active
    pub fn is_empty(&self) -> bool {
        !self.date_range.is_active()
            && self.product.trim().is_empty()
            && self.city.trim().is_empty()
            && self.channel.trim().is_empty()
            && self.status.trim().is_empty()
    }

    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = range;
        self
    }

    pub fn with_product(mut self, product: impl Into<String>) -> Self {
        self.product = product.into();
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = city.into();
        self
    }

    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = channel.into();
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }
}

// ---------------------------------------------------------------------------
// Derived views
// ---------------------------------------------------------------------------

/// Summary metrics over a set of orders
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct KpiSnapshot {
    pub total_revenue: f64,
    pub total_orders: usize,
    pub average_order_value: f64,
    pub unique_customer_count: usize,
    pub total_items_sold: u64,
    /// Attributed cost of goods the ratios below are based on
    pub total_cost: f64,
    pub margin_percent: f64,
    pub roas: f64,
    pub roi_percent: f64,
}

/// Distinct values for populating filter controls, each sorted ascending
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facets {
    pub products: Vec<String>,
    pub cities: Vec<String>,
    pub channels: Vec<String>,
    pub statuses: Vec<String>,
}

/// Revenue for one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySales {
    pub date: NaiveDate,
    pub revenue: f64,
    pub orders: usize,
}

/// Revenue grouped by a label (payment method, UTM source, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownRow {
    pub label: String,
    pub revenue: f64,
    pub orders: usize,
}

/// Revenue share attributed to a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSales {
    /// Catalog id when the token resolved to a product
    pub product_id: Option<String>,
    pub label: String,
    pub revenue: f64,
    /// Number of order lines mentioning the product
    pub quantity: usize,
}

/// All chart series of the overview page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Breakdowns {
    pub sales_by_day: Vec<DailySales>,
    pub by_payment_method: Vec<BreakdownRow>,
    pub by_source: Vec<BreakdownRow>,
    pub by_medium: Vec<BreakdownRow>,
    pub by_campaign: Vec<BreakdownRow>,
    pub top_products: Vec<ProductSales>,
}

/// Everything the overview page renders for one filter state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub dataset_id: Uuid,
    pub filters: FilterSpec,
    pub orders: Vec<Order>,
    pub kpis: KpiSnapshot,
    pub indicators: Vec<IndicatorValue>,
    pub breakdowns: Breakdowns,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_range_needs_both_bounds() {
        let half = DateRange {
            from: Some(date(2024, 1, 1)),
            to: None,
        };
        assert!(!half.is_active());
        assert!(half.bounds().is_none());
        assert!(!half.contains(date(2024, 1, 1).and_hms_opt(12, 0, 0).unwrap()));
    }

    #[test]
    fn test_date_range_contains_whole_days() {
        let range = DateRange::day(date(2024, 3, 15));
        let day = date(2024, 3, 15);

        assert!(range.contains(day.and_hms_opt(0, 0, 0).unwrap()));
        assert!(range.contains(day.and_hms_nano_opt(23, 59, 59, 999_500_000).unwrap()));
        assert!(!range.contains(date(2024, 3, 16).and_hms_opt(0, 0, 0).unwrap()));
        assert!(!range.contains(date(2024, 3, 14).and_hms_nano_opt(23, 59, 59, 999_999_999).unwrap()));
    }

    #[test]
    fn test_previous_window() {
        let range = DateRange::new(date(2024, 3, 1), date(2024, 3, 10));
        let prev = range.previous().unwrap();
        assert_eq!(prev, DateRange::new(date(2024, 2, 20), date(2024, 2, 29)));

        let inverted = DateRange::new(date(2024, 3, 10), date(2024, 3, 1));
        assert!(inverted.previous().is_none());
    }

    #[test]
    fn test_filter_spec_is_empty() {
        assert!(FilterSpec::default().is_empty());
        assert!(FilterSpec::default().with_city("  ").is_empty());
        assert!(!FilterSpec::default().with_status("pago").is_empty());
    }

    #[test]
    fn test_filter_spec_deserializes_partial() {
        let spec: FilterSpec =
            serde_json::from_str(r#"{"date_range":{"from":"2024-01-01","to":"2024-01-31"},"city":"Rio"}"#)
                .unwrap();
        assert!(spec.date_range.is_active());
        assert_eq!(spec.city, "Rio");
        assert!(spec.product.is_empty());
    }
}
