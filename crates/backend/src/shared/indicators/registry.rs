use contracts::dashboards::d100_sales_overview::KpiSnapshot;
use contracts::shared::indicators::*;
use std::collections::HashMap;

use super::compute::sales;
use super::metadata::{build_catalog, ids};

type ValueFn = fn(&KpiSnapshot) -> f64;
type SubtitleFn = fn(&KpiSnapshot) -> Option<String>;

/// Snapshots an indicator batch is computed from.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndicatorContext {
    pub current: KpiSnapshot,
    /// Snapshot of the preceding comparable window, if there is one
    pub previous: Option<KpiSnapshot>,
}

/// Central registry: maps `IndicatorId` to the function reading its value.
pub struct IndicatorRegistry {
    catalog: IndicatorCatalog,
    fns: HashMap<String, ValueFn>,
    subtitles: HashMap<String, SubtitleFn>,
}

impl IndicatorRegistry {
    pub fn new() -> Self {
        let mut fns: HashMap<String, ValueFn> = HashMap::new();
        fns.insert(ids::sales_revenue().0, sales::sales_revenue);
        fns.insert(ids::sales_order_count().0, sales::sales_order_count);
        fns.insert(ids::sales_avg_check().0, sales::sales_avg_check);
        fns.insert(ids::unique_customers().0, sales::unique_customers);
        fns.insert(ids::items_sold().0, sales::items_sold);
        fns.insert(ids::total_cost().0, sales::total_cost);
        fns.insert(ids::margin_percent().0, sales::margin_percent);
        fns.insert(ids::roas().0, sales::roas);
        fns.insert(ids::roi_percent().0, sales::roi_percent);

        let mut subtitles: HashMap<String, SubtitleFn> = HashMap::new();
        subtitles.insert(ids::margin_percent().0, sales::margin_subtitle);

        Self {
            catalog: build_catalog(),
            fns,
            subtitles,
        }
    }

    pub fn catalog(&self) -> &IndicatorCatalog {
        &self.catalog
    }

    /// Indicators of the named set, in display order
    pub fn set(&self, set_id: &IndicatorSetId) -> &[IndicatorId] {
        self.catalog
            .sets
            .iter()
            .find(|s| &s.id == set_id)
            .map(|s| s.indicators.as_slice())
            .unwrap_or(&[])
    }

    /// Compute a batch of indicators. Unknown ids are skipped.
    pub fn compute(&self, ids: &[IndicatorId], ctx: &IndicatorContext) -> Vec<IndicatorValue> {
        let mut results = Vec::with_capacity(ids.len());

        for id in ids {
            let Some(value_fn) = self.fns.get(&id.0) else {
                tracing::warn!("indicator {} not found in registry", id.0);
                continue;
            };

            let higher_is_good = self
                .catalog
                .meta(id)
                .map(|m| m.higher_is_good)
                .unwrap_or(true);

            let cur = value_fn(&ctx.current);
            let prev = ctx.previous.as_ref().map(value_fn);
            let change = prev.and_then(|p| sales::pct_change(cur, p));

            results.push(IndicatorValue {
                id: id.clone(),
                value: Some(cur),
                previous_value: prev,
                change_percent: change,
                status: sales::status_by_change(change, higher_is_good),
                subtitle: self.subtitles.get(&id.0).and_then(|f| f(&ctx.current)),
            });
        }

        results
    }
}

impl Default for IndicatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(revenue: f64, orders: usize) -> KpiSnapshot {
        KpiSnapshot {
            total_revenue: revenue,
            total_orders: orders,
            ..KpiSnapshot::default()
        }
    }

    #[test]
    fn test_compute_without_previous_window() {
        let registry = IndicatorRegistry::new();
        let ctx = IndicatorContext {
            current: snapshot(500.0, 5),
            previous: None,
        };

        let values = registry.compute(&[ids::sales_revenue()], &ctx);

        assert_eq!(values.len(), 1);
        assert_eq!(values[0].value, Some(500.0));
        assert_eq!(values[0].previous_value, None);
        assert_eq!(values[0].change_percent, None);
        assert_eq!(values[0].status, IndicatorStatus::Neutral);
    }

    #[test]
    fn test_compute_against_previous_window() {
        let registry = IndicatorRegistry::new();
        let ctx = IndicatorContext {
            current: snapshot(150.0, 2),
            previous: Some(snapshot(100.0, 2)),
        };

        let values = registry.compute(&[ids::sales_revenue(), ids::sales_order_count()], &ctx);

        assert_eq!(values[0].change_percent, Some(50.0));
        assert_eq!(values[0].status, IndicatorStatus::Good);
        assert_eq!(values[1].change_percent, Some(0.0));
        assert_eq!(values[1].status, IndicatorStatus::Neutral);
    }

    #[test]
    fn test_rising_cost_is_bad_news() {
        let registry = IndicatorRegistry::new();
        let ctx = IndicatorContext {
            current: KpiSnapshot {
                total_cost: 120.0,
                ..KpiSnapshot::default()
            },
            previous: Some(KpiSnapshot {
                total_cost: 100.0,
                ..KpiSnapshot::default()
            }),
        };

        let values = registry.compute(&[ids::total_cost()], &ctx);

        assert_eq!(values[0].change_percent, Some(20.0));
        assert_eq!(values[0].status, IndicatorStatus::Bad);
    }

    #[test]
    fn test_unknown_ids_are_skipped() {
        let registry = IndicatorRegistry::new();
        let values = registry.compute(&[IndicatorId::new("nope")], &IndicatorContext::default());
        assert!(values.is_empty());
    }

    #[test]
    fn test_overview_set_covers_every_card() {
        let registry = IndicatorRegistry::new();
        let set = registry.set(&IndicatorSetId::new("sales_overview"));
        let values = registry.compute(set, &IndicatorContext::default());

        assert_eq!(values.len(), 9);
        let margin = values.iter().find(|v| v.id == ids::margin_percent()).unwrap();
        assert_eq!(margin.subtitle.as_deref(), Some("ROI: 0.0%"));
    }
}
