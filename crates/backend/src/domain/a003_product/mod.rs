pub mod catalog;
pub mod normalizer;

pub use catalog::ProductCatalog;
pub use normalizer::normalize_product;
