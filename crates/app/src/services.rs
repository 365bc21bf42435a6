//! Application services: id-based use-cases on top of the registry.

pub mod control_service;
