pub mod common;

pub mod a001_order;
pub mod a002_customer;
pub mod a003_product;
