use serde::{Deserialize, Serialize};

use crate::domain::common::string_id;

string_id!(
    /// Customer identifier shared between the customer and order feeds
    CustomerId
);

/// Canonical customer record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: CustomerId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub birth_date: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,
}
