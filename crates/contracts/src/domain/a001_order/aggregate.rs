use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::a002_customer::CustomerId;
use crate::domain::common::string_id;

// ============================================================================
// ID Type
// ============================================================================

string_id!(
    /// Order number as issued by the store
    OrderNumber
);

// ============================================================================
// Entity
// ============================================================================

/// Marketing attribution of an order (UTM parameters)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attribution {
    pub source: Option<String>,
    pub medium: Option<String>,
    pub campaign: Option<String>,
    pub content: Option<String>,
    pub term: Option<String>,
}

/// Canonical order record.
///
/// The customer is referenced by id only; `customer_name` is the label
/// captured on the order itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_number: OrderNumber,
    /// `None` when the source date could not be parsed
    pub order_date: Option<NaiveDateTime>,
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub status: Option<String>,
    /// Whole currency units, never negative
    pub total_value: f64,
    pub item_count: u32,
    pub payment_method: Option<String>,
    pub coupon_used: Option<String>,
    #[serde(default)]
    pub attribution: Attribution,
    pub origin_url: Option<String>,
    /// Raw comma-separated product list as it came from the source
    pub sold_products: Option<String>,
    pub category: Option<String>,
}

impl Order {
    /// Trimmed, non-empty product tokens of `sold_products`
    pub fn product_tokens(&self) -> Vec<&str> {
        self.sold_products
            .as_deref()
            .map(split_product_list)
            .unwrap_or_default()
    }

    /// Channel the order is attributed to (UTM source)
    pub fn channel(&self) -> Option<&str> {
        self.attribution.source.as_deref()
    }
}

/// Split a comma-separated product list into trimmed, non-empty tokens
pub fn split_product_list(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_product_list() {
        assert_eq!(split_product_list("Shoe, Hat"), vec!["Shoe", "Hat"]);
        assert_eq!(split_product_list(" , Hat,,"), vec!["Hat"]);
        assert!(split_product_list("").is_empty());
    }
}
