use chrono::{DateTime, Utc};
use contracts::dashboards::d100_sales_overview::{Facets, FilterSpec, KpiSnapshot};
use contracts::domain::a001_order::Order;
use contracts::domain::a002_customer::{Customer, CustomerId};
use contracts::domain::a003_product::Product;
use serde_json::Value;
use std::collections::HashMap;
use uuid::Uuid;

use super::raw_record::NormalizeOptions;
use crate::dashboards::d100_sales_overview::{facets, filter, kpi};
use crate::domain::a001_order::normalize_order;
use crate::domain::a002_customer::normalize_customer;
use crate::domain::a003_product::{normalize_product, ProductCatalog};

/// Immutable in-memory snapshot of one data load.
///
/// Every load gets a fresh `id`, which derived views use as the dataset
/// identity when memoizing.
#[derive(Debug)]
pub struct Dataset {
    id: Uuid,
    loaded_at: DateTime<Utc>,
    orders: Vec<Order>,
    customers: Vec<Customer>,
    products: Vec<Product>,
    /// customer_id -> position in `customers` (first record wins)
    customer_index: HashMap<CustomerId, usize>,
}

impl Dataset {
    pub fn new(orders: Vec<Order>, customers: Vec<Customer>, products: Vec<Product>) -> Self {
        let mut customer_index = HashMap::with_capacity(customers.len());
        for (idx, customer) in customers.iter().enumerate() {
            customer_index
                .entry(customer.customer_id.clone())
                .or_insert(idx);
        }

        Self {
            id: Uuid::new_v4(),
            loaded_at: Utc::now(),
            orders,
            customers,
            products,
            customer_index,
        }
    }

    /// Normalize raw JSON records into a dataset. Non-object entries are
    /// skipped.
    pub fn from_raw(
        orders: &[Value],
        customers: &[Value],
        products: &[Value],
        options: &NormalizeOptions,
    ) -> Self {
        let orders = objects(orders, "order")
            .map(|raw| normalize_order(raw, options))
            .collect();
        let customers = objects(customers, "customer")
            .map(normalize_customer)
            .collect();
        let products = objects(products, "product")
            .map(|raw| normalize_product(raw, options))
            .collect();

        Self::new(orders, customers, products)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn customer(&self, id: &CustomerId) -> Option<&Customer> {
        self.customer_index.get(id).map(|&idx| &self.customers[idx])
    }

    pub fn catalog(&self) -> ProductCatalog<'_> {
        ProductCatalog::new(&self.products)
    }

    /// Orders matching every active clause of `spec`
    pub fn apply_filters(&self, spec: &FilterSpec) -> Vec<Order> {
        filter::apply_with(&self.orders, |id| self.customer(id), spec)
    }

    /// KPI snapshot of `orders` against this dataset's product catalog
    pub fn compute_kpis(&self, orders: &[Order]) -> KpiSnapshot {
        kpi::compute(orders, &self.catalog())
    }

    /// Filter-independent value domains for the filter controls
    pub fn extract_facets(&self) -> Facets {
        facets::extract(&self.orders, &self.customers)
    }
}

fn objects<'a>(
    records: &'a [Value],
    kind: &'static str,
) -> impl Iterator<Item = &'a serde_json::Map<String, Value>> {
    records.iter().enumerate().filter_map(move |(idx, value)| {
        let object = value.as_object();
        if object.is_none() {
            tracing::warn!("skipping {} record #{}: not a JSON object", kind, idx);
        }
        object
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_raw_skips_non_objects() {
        let orders = vec![json!({ "Nº Pedido": "1", "id_cliente": "C1" }), json!("junk")];
        let customers = vec![json!({ "ID do Cliente": "C1", "Cidade": "Rio" }), json!(null)];
        let products = vec![json!({ "ID do Produto": "P1", "Nome do Produto": "Hat" })];

        let dataset = Dataset::from_raw(&orders, &customers, &products, &NormalizeOptions::default());

        assert_eq!(dataset.orders().len(), 1);
        assert_eq!(dataset.customers().len(), 1);
        assert_eq!(dataset.products().len(), 1);
        let customer = dataset.customer(&CustomerId::new("C1")).unwrap();
        assert_eq!(customer.city.as_deref(), Some("Rio"));
    }

    #[test]
    fn test_each_load_has_its_own_identity() {
        let a = Dataset::new(vec![], vec![], vec![]);
        let b = Dataset::new(vec![], vec![], vec![]);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_duplicate_customer_ids_keep_first() {
        let customers = vec![
            json!({ "customer_id": "C1", "city": "Rio" }),
            json!({ "customer_id": "C1", "city": "SP" }),
        ];
        let dataset = Dataset::from_raw(&[], &customers, &[], &NormalizeOptions::default());

        let customer = dataset.customer(&CustomerId::new("C1")).unwrap();
        assert_eq!(customer.city.as_deref(), Some("Rio"));
    }
}
