//! Shared data model of the Undergrads order service: aggregates, forms,
//! dashboard/report DTOs and the pure rules that operate on them.

pub mod dashboards;
pub mod domain;
pub mod enums;
pub mod shared;
pub mod system;
