use contracts::dashboards::d100_sales_overview::KpiSnapshot;
use contracts::shared::indicators::IndicatorStatus;

use crate::shared::format::format_percent;

// ---------------------------------------------------------------------------
// Comparison helpers
// ---------------------------------------------------------------------------

/// Change threshold, in percent, beyond which a card turns Good or Bad
pub const STATUS_THRESHOLD: f64 = 5.0;

pub fn pct_change(cur: f64, prev: f64) -> Option<f64> {
    if prev.abs() < 0.01 {
        None
    } else {
        Some(((cur - prev) / prev.abs()) * 100.0)
    }
}

pub fn status_by_change(change: Option<f64>, higher_is_good: bool) -> IndicatorStatus {
    match change {
        Some(c) if c > STATUS_THRESHOLD => {
            if higher_is_good {
                IndicatorStatus::Good
            } else {
                IndicatorStatus::Bad
            }
        }
        Some(c) if c < -STATUS_THRESHOLD => {
            if higher_is_good {
                IndicatorStatus::Bad
            } else {
                IndicatorStatus::Good
            }
        }
        _ => IndicatorStatus::Neutral,
    }
}

// ---------------------------------------------------------------------------
// Value extractors
// ---------------------------------------------------------------------------

pub fn sales_revenue(kpis: &KpiSnapshot) -> f64 {
    kpis.total_revenue
}

pub fn sales_order_count(kpis: &KpiSnapshot) -> f64 {
    kpis.total_orders as f64
}

pub fn sales_avg_check(kpis: &KpiSnapshot) -> f64 {
    kpis.average_order_value
}

pub fn unique_customers(kpis: &KpiSnapshot) -> f64 {
    kpis.unique_customer_count as f64
}

pub fn items_sold(kpis: &KpiSnapshot) -> f64 {
    kpis.total_items_sold as f64
}

pub fn total_cost(kpis: &KpiSnapshot) -> f64 {
    kpis.total_cost
}

pub fn margin_percent(kpis: &KpiSnapshot) -> f64 {
    kpis.margin_percent
}

pub fn roas(kpis: &KpiSnapshot) -> f64 {
    kpis.roas
}

pub fn roi_percent(kpis: &KpiSnapshot) -> f64 {
    kpis.roi_percent
}

/// Secondary line of the margin card
pub fn margin_subtitle(kpis: &KpiSnapshot) -> Option<String> {
    Some(format!("ROI: {}", format_percent(kpis.roi_percent)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pct_change() {
        assert_eq!(pct_change(150.0, 100.0), Some(50.0));
        assert_eq!(pct_change(50.0, 100.0), Some(-50.0));
        assert_eq!(pct_change(10.0, 0.0), None);
        assert_eq!(pct_change(10.0, 0.001), None);
    }

    #[test]
    fn test_status_by_change() {
        assert_eq!(status_by_change(Some(5.5), true), IndicatorStatus::Good);
        assert_eq!(status_by_change(Some(-5.5), true), IndicatorStatus::Bad);
        assert_eq!(status_by_change(Some(5.5), false), IndicatorStatus::Bad);
        assert_eq!(status_by_change(Some(-5.5), false), IndicatorStatus::Good);
        assert_eq!(status_by_change(Some(5.0), true), IndicatorStatus::Neutral);
        assert_eq!(status_by_change(None, true), IndicatorStatus::Neutral);
    }

    #[test]
    fn test_margin_subtitle_shows_roi() {
        let kpis = KpiSnapshot {
            roi_percent: 42.857,
            ..KpiSnapshot::default()
        };
        assert_eq!(margin_subtitle(&kpis).as_deref(), Some("ROI: 42.9%"));
    }
}
