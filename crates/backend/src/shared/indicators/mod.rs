pub mod compute;
pub mod metadata;
pub mod registry;

use contracts::dashboards::d100_sales_overview::{FilterSpec, KpiSnapshot};
use contracts::shared::indicators::{IndicatorSetId, IndicatorValue};
use once_cell::sync::Lazy;

use crate::shared::data::Dataset;
pub use registry::{IndicatorContext, IndicatorRegistry};

static REGISTRY: Lazy<IndicatorRegistry> = Lazy::new(IndicatorRegistry::new);

pub fn registry() -> &'static IndicatorRegistry {
    &REGISTRY
}

/// KPI cards of the overview page for `spec`.
///
/// With an active date range every card is compared against the window of
/// the same length that ends the day before it; otherwise there is no
/// comparison.
pub fn compute_indicators(
    dataset: &Dataset,
    spec: &FilterSpec,
    current: &KpiSnapshot,
) -> Vec<IndicatorValue> {
    let previous = spec.date_range.previous().map(|range| {
        let previous_spec = spec.clone().with_date_range(range);
        let orders = dataset.apply_filters(&previous_spec);
        dataset.compute_kpis(&orders)
    });

    let ctx = IndicatorContext {
        current: *current,
        previous,
    };
    let registry = registry();
    registry.compute(registry.set(&IndicatorSetId::new("sales_overview")), &ctx)
}
