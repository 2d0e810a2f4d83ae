use contracts::dashboards::d100_sales_overview::{DashboardView, Facets, FilterSpec};
use lru::LruCache;
use once_cell::unsync::OnceCell;
use std::num::NonZeroUsize;
use std::sync::Arc;
use uuid::Uuid;

use super::breakdowns;
use crate::shared::data::Dataset;
use crate::shared::indicators::compute_indicators;

/// Number of views kept per session before the least recently used is dropped
pub const VIEW_CACHE_CAPACITY: usize = 32;

type ViewKey = (Uuid, FilterSpec);

/// Dashboard state for one viewer: a dataset handle plus the active filters.
///
/// Views are memoized by dataset identity and filters, so flipping back to
/// a previous filter combination does not re-aggregate. The least recently
/// used view is dropped once the memo is full.
pub struct DashboardSession {
    dataset: Arc<Dataset>,
    filters: FilterSpec,
    facets: OnceCell<Facets>,
    views: LruCache<ViewKey, Arc<DashboardView>>,
}

impl DashboardSession {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self::with_filters(dataset, FilterSpec::default())
    }

    pub fn with_filters(dataset: Arc<Dataset>, filters: FilterSpec) -> Self {
        Self {
            dataset,
            filters,
            facets: OnceCell::new(),
            views: LruCache::new(view_capacity(VIEW_CACHE_CAPACITY)),
        }
    }

    /// Resize the view memo, dropping least recently used views if needed
    pub fn with_view_capacity(mut self, capacity: NonZeroUsize) -> Self {
        self.views.resize(capacity);
        self
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    pub fn filters(&self) -> &FilterSpec {
        &self.filters
    }

    pub fn set_filters(&mut self, filters: FilterSpec) {
        self.filters = filters;
    }

    pub fn reset_filters(&mut self) {
        self.filters = FilterSpec::default();
    }

    /// Filter value domains. Computed once per dataset.
    pub fn facets(&self) -> &Facets {
        self.facets.get_or_init(|| self.dataset.extract_facets())
    }

    /// View for the current filters
    pub fn view(&mut self) -> Arc<DashboardView> {
        let key = (self.dataset.id(), self.filters.clone());
        if let Some(view) = self.views.get(&key) {
            tracing::debug!("view cache hit for dataset {}", key.0);
            return Arc::clone(view);
        }

        let view = Arc::new(build_view(&self.dataset, &self.filters));
        self.views.put(key, Arc::clone(&view));
        view
    }

    /// Swap in a freshly loaded dataset. Filters are kept.
    pub fn reload(&mut self, dataset: Arc<Dataset>) {
        tracing::info!("Reloading session dataset {} -> {}", self.dataset.id(), dataset.id());
        self.dataset = dataset;
        self.facets = OnceCell::new();
        self.views.clear();
    }
}

/// Compute a full view of `dataset` under `spec`.
pub fn build_view(dataset: &Dataset, spec: &FilterSpec) -> DashboardView {
    let orders = dataset.apply_filters(spec);
    let kpis = dataset.compute_kpis(&orders);
    let indicators = compute_indicators(dataset, spec, &kpis);
    let breakdowns = breakdowns::build(&orders, &dataset.catalog());

    tracing::info!(
        "Built view: {} of {} orders match filters",
        orders.len(),
        dataset.orders().len()
    );

    DashboardView {
        dataset_id: dataset.id(),
        filters: spec.clone(),
        orders,
        kpis,
        indicators,
        breakdowns,
    }
}

fn view_capacity(capacity: usize) -> NonZeroUsize {
    NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN)
}
