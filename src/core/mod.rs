//! Core module containing the document, store, query and error abstractions

pub mod document;
pub mod error;
pub mod field;
pub mod pagination;
pub mod query;
pub mod store;
pub mod validation;

pub use document::Document;
pub use error::{ServiceError, ServiceResult, ValidationError};
pub use field::FieldValue;
pub use pagination::{DEFAULT_PAGE_SIZE, Page, PageQuery, PageRequest, PaginationMeta, paginate};
pub use query::{Condition, Filter};
pub use store::DocumentStore;
