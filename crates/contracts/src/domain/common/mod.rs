//! Common types for all entities

pub mod aggregate_id;

pub(crate) use aggregate_id::string_id;
