//! Property-management back office.
//!
//! The [`office`] module carries the domain: the entity store, the validation
//! layer, the maintenance-request lifecycle, dashboard aggregation, and the
//! HTTP routers that expose them. [`config`], [`telemetry`], and [`error`]
//! provide the service scaffolding shared with the API binary.

pub mod config;
pub mod error;
pub mod office;
pub mod telemetry;
