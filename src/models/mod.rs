pub mod contracts;
pub mod owners;
pub mod payments;
pub mod properties;
pub mod tenants;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl PaginationQuery {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(20).clamp(1, 100)
    }
}

/// Page metadata returned alongside list results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub pages: u64,
}

/// Envelope for paginated list endpoints: `{"data": [...], "pagination": {...}}`.
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, query: &PaginationQuery, total: u64) -> Self {
        let limit = query.limit();
        Self {
            data,
            pagination: Pagination {
                page: query.page(),
                limit,
                total,
                pages: total.div_ceil(limit),
            },
        }
    }
}
