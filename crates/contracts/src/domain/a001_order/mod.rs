pub mod aggregate;

pub use aggregate::{Attribution, Order, OrderNumber};
