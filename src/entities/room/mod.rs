//! Room entity module

pub mod handlers;
pub mod model;
pub mod service;

pub use model::{Room, RoomInput};
pub use service::{RoomFilters, RoomService};
