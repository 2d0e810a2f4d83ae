pub mod breakdowns;
pub mod facets;
pub mod filter;
pub mod kpi;
pub mod service;

pub use service::{build_view, DashboardSession};
