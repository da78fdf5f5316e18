//! Hotel entity module

pub mod handlers;
pub mod model;
pub mod service;

pub use model::{Hotel, HotelInput};
pub use service::{HotelFilters, HotelService};
