//! Query string extractors for list endpoints.

use chrono::{DateTime, Utc};
use jobboard_core::{JobFilter, PageRequest};
use serde::Deserialize;
use utoipa::IntoParams;

/// Query parameters for pagination. Pages start at 1.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationQuery {
    /// Page number, starting at 1.
    #[serde(default)]
    pub page: Option<u32>,
    /// Items per page (1-100, default 10).
    #[serde(default)]
    pub page_size: Option<u32>,
}

impl From<PaginationQuery> for PageRequest {
    fn from(query: PaginationQuery) -> Self {
        PageRequest::new(
            query.page.unwrap_or(1),
            query.page_size.unwrap_or(PageRequest::DEFAULT_SIZE),
        )
    }
}

/// Query parameters accepted by the job listing.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct JobListQuery {
    /// Case-insensitive substring of the title.
    pub title: Option<String>,
    /// Case-insensitive substring of the company name.
    pub company_name: Option<String>,
    /// Only jobs posted at or after this instant (RFC 3339).
    pub posted_after: Option<DateTime<Utc>>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl JobListQuery {
    /// Splits the query into a filter and a page request.
    #[must_use]
    pub fn into_parts(self) -> (JobFilter, PageRequest) {
        let page = PaginationQuery {
            page: self.page,
            page_size: self.page_size,
        };
        let filter = JobFilter {
            title: self.title,
            company_name: self.company_name,
            posted_after: self.posted_after,
        };
        (filter.normalized(), page.into())
    }
}
