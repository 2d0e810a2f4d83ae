//! Canonical entities and dashboard DTOs shared by the analytics engine
//! and its consumers.

pub mod dashboards;
pub mod domain;
pub mod shared;
