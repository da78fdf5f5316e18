//! Pagination helper shared by the hotel, room and customer services

use crate::core::document::Document;
use crate::core::query::Filter;
use crate::core::store::DocumentStore;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Items per page used by every listing unless configured otherwise
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// A 1-based page number plus page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    page_size: u64,
}

impl PageRequest {
    /// Build a request, clamping the page to at least 1 and the size to at least 1
    pub fn new(page: u64, page_size: u64) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    /// First page with the default size
    pub fn first() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Number of filtered items before this page
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

/// `?page=` query parameter
///
/// Missing, non-numeric and non-positive values all mean page 1.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub page: Option<String>,
}

impl PageQuery {
    pub fn page(&self) -> u64 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<i64>().ok())
            .map_or(1, |p| p.max(1) as u64)
    }
}

/// Pagination metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// Current page number (starts at 1)
    pub current_page: u64,

    /// Total number of items after filters, independent of the page
    pub total_items: u64,

    pub items_per_page: u64,
}

impl PaginationMeta {
    /// Total number of pages, 0 when there are no items
    pub fn total_pages(&self) -> u64 {
        if self.total_items == 0 {
            0
        } else {
            self.total_items.div_ceil(self.items_per_page.max(1))
        }
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }
}

/// One page of items with its metadata
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> Page<T> {
    /// Page with no items and a zero total, reported as page 1
    pub fn empty(page_size: u64) -> Self {
        Self {
            data: Vec::new(),
            pagination: PaginationMeta {
                current_page: 1,
                total_items: 0,
                items_per_page: page_size,
            },
        }
    }

    /// Convert every item, keeping the metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

/// Run a filtered query against a store and cut out one page
///
/// Returns the items in `[(page-1)*size, page*size)` of the filtered set in
/// insertion order. A page past the end yields no items but correct totals.
pub async fn paginate<T, S>(store: &S, filter: &Filter, request: PageRequest) -> Result<Page<T>>
where
    T: Document,
    S: DocumentStore<T> + ?Sized,
{
    let total_items = store.count(filter).await?;

    let data = if request.offset() >= total_items {
        Vec::new()
    } else {
        store
            .find_page(filter, request.offset(), request.page_size())
            .await?
    };

    Ok(Page {
        data,
        pagination: PaginationMeta {
            current_page: request.page(),
            total_items,
            items_per_page: request.page_size(),
        },
    })
}
