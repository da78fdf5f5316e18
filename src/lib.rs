//! # Hotel Booking
//!
//! A CRUD backend for hotels, their rooms and the customers who book them.
//!
//! ## Features
//!
//! - **Hotels**: create, read, update, paginated listing and filtered browsing
//! - **Rooms**: attached to exactly one hotel by its integer code
//! - **Cascade Delete**: deleting a hotel removes every room attached to it
//! - **Customers**: registration with argon2 password hashes and admin promotion
//! - **Two Front Ends**: a JSON API and a server-rendered admin panel
//! - **Pluggable Storage**: in-memory store, or MongoDB behind `mongodb_backend`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hotel_booking::prelude::*;
//!
//! let state = AppState::new(Stores::in_memory(), 10);
//! let hotel = state
//!     .hotels
//!     .create(HotelInput {
//!         hotel_name: Some("Ocean View".into()),
//!         hotel_address: Some("1 Beach Rd".into()),
//!         hotel_category: Some("****".into()),
//!     })
//!     .await?;
//!
//! ServerBuilder::new()
//!     .with_state(state)
//!     .serve("127.0.0.1:8000")
//!     .await?;
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        Condition, Document, DocumentStore, Filter, Page, PageQuery, PageRequest,
        PaginationMeta, ServiceError, ServiceResult, ValidationError, paginate,
    };

    // === Entities ===
    pub use crate::entities::customer::{
        Credentials, Customer, CustomerProfile, CustomerService, RegisterCustomer,
    };
    pub use crate::entities::hotel::{Hotel, HotelFilters, HotelInput, HotelService};
    pub use crate::entities::room::{Room, RoomFilters, RoomInput, RoomService};

    // === Server ===
    pub use crate::config::AppConfig;
    pub use crate::server::{AppState, ServerBuilder, Stores};

    // === Storage ===
    pub use crate::storage::InMemoryStore;
    #[cfg(feature = "mongodb_backend")]
    pub use crate::storage::MongoStore;
}
