//! The engine's public API surface.
//!
//! Each API struct is a thin wrapper over one or more collaborator traits, so that callers (and tests) choose the
//! backends. [`price_api::PriceApi`] owns the cache-aside quote resolution, [`catalog_api::CatalogApi`] the store
//! reads and the currency sync, and [`order_flow_api::OrderFlowApi`] the settlement state machine.
pub mod catalog_api;
pub mod errors;
pub mod order_flow_api;
pub mod price_api;
pub mod price_objects;
pub mod pricing;
