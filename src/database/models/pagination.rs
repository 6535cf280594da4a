use serde::{Deserialize, Serialize};

use super::ProjectSummary;
use crate::stats::filter::blank_as_none;

pub const DEFAULT_PAGE_LIMIT: u32 = 5;
pub const MAX_PAGE_LIMIT: u32 = 100;

/// `?page=&limit=` as sent by the dashboards. Missing, blank or zero values
/// fall back to page 1 and `DEFAULT_PAGE_LIMIT`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct PageRequest {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub page: Option<u32>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub limit: Option<u32>,
}

impl PageRequest {
    pub fn page(&self) -> u32 {
        self.page.filter(|page| *page >= 1).unwrap_or(1)
    }

    pub fn limit(&self) -> u32 {
        self.limit
            .filter(|limit| *limit >= 1)
            .map_or(DEFAULT_PAGE_LIMIT, |limit| limit.min(MAX_PAGE_LIMIT))
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page() - 1) * u64::from(self.limit())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u64,
    pub total_items: u64,
    pub has_next: bool,
    pub has_prev: bool,
    pub limit: u32,
}

impl Pagination {
    pub fn new(request: &PageRequest, total_items: u64) -> Self {
        let current_page = request.page();
        let limit = request.limit();
        let total_pages = total_items.div_ceil(u64::from(limit));

        Self {
            current_page,
            total_pages,
            total_items,
            has_next: u64::from(current_page) < total_pages,
            has_prev: current_page > 1,
            limit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectPage {
    pub projects: Vec<ProjectSummary>,
    pub pagination: Pagination,
}

impl ProjectPage {
    pub fn empty(request: &PageRequest) -> Self {
        Self {
            projects: Vec::new(),
            pagination: Pagination::new(request, 0),
        }
    }
}
