use serde::{Deserialize, Serialize};

use crate::domain::common::string_id;

string_id!(
    /// Catalog product identifier
    ProductId
);

/// Canonical catalog product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: ProductId,
    pub name: String,
    pub category: Option<String>,
    /// Sale price in whole currency units
    pub price: f64,
    /// Unit cost; `None` means unknown, which is not the same as free
    pub cost: Option<f64>,
    pub stock: Option<i64>,
}
