//! Storage implementations for different backends

pub mod in_memory;
#[cfg(feature = "mongodb_backend")]
pub mod mongo;

pub use in_memory::InMemoryStore;
#[cfg(feature = "mongodb_backend")]
pub use mongo::MongoStore;
