//! Hotel, room and customer documents with their services and JSON handlers

pub mod customer;
pub mod hotel;
pub mod room;

pub use customer::{Customer, CustomerService};
pub use hotel::{Hotel, HotelService};
pub use room::{Room, RoomService};
