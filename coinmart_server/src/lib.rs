//! # Coinmart server
//! This crate hosts the HTTP surface of the Coinmart marketplace backend. It is responsible for:
//! * serving the catalog read routes (`/currencies`, `/items`) with display-currency conversion,
//! * settling purchase orders (`/orders`) for authenticated callers,
//! * running the periodic quote refresh job against the cache store.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! * `/health`: A health check route that returns a 200 OK response.
//! * `/currencies`: Paginated currency listing.
//! * `/items?currencyId=..`: Paginated item listing, priced in the requested display currency.
//! * `/orders`: Order settlement. Requires a bearer JWT.
pub mod auth;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod integrations;
pub mod refresh_worker;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
