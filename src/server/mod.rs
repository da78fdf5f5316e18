//! HTTP server: JSON API, admin panel and the builder that wires them
//!
//! - [`api_routes`] exposes the hotel, room and customer endpoints
//! - [`admin`] renders the same services as HTML pages under `/admin`
//! - [`ServerBuilder`] merges both and serves them with graceful shutdown

pub mod admin;
pub mod builder;
pub mod router;
pub mod state;

pub use builder::ServerBuilder;
pub use router::api_routes;
pub use state::{AppState, Stores};
