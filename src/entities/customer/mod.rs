//! Customer entity module

pub mod handlers;
pub mod model;
pub mod service;

pub use model::{Credentials, Customer, CustomerProfile, RegisterCustomer};
pub use service::CustomerService;
