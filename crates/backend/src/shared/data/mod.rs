pub mod dataset;
pub mod loader;
pub mod raw_record;

pub use dataset::Dataset;
pub use loader::{load_dataset, LoadError, SourceError, SourceKind};
pub use raw_record::{MoneyScale, NormalizeOptions};
