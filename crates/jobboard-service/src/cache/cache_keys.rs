//! Cache key generators for consistent key naming.
//!
//! List keys carry a canonical encoding of the query: present fields sorted
//! by name as `name=value` pairs joined with `&`. Values are trimmed,
//! case-insensitive filters are lower-cased, and every byte outside
//! `[a-z0-9-._~]` is percent-escaped, so logically equal queries share one
//! key and user input can never contain a glob character.

use chrono::SecondsFormat;
use jobboard_core::{JobFilter, JobId, PageRequest};
use std::collections::BTreeMap;
use std::fmt::Write;

/// Prefix for all cache keys to namespace them.
const CACHE_PREFIX: &str = "jobboard:cache";

const JOBS: &str = "jobs";
const APPLICANTS: &str = "applicants";

/// Generate the cache key of one page of the job listing.
#[must_use]
pub fn job_list(filter: &JobFilter, page: PageRequest) -> String {
    let mut fields = page_fields(page);
    if let Some(title) = filter.title.as_deref() {
        fields.insert("title", title.trim().to_lowercase());
    }
    if let Some(company) = filter.company_name.as_deref() {
        fields.insert("company_name", company.trim().to_lowercase());
    }
    if let Some(after) = filter.posted_after {
        fields.insert("posted_after", after.to_rfc3339_opts(SecondsFormat::AutoSi, true));
    }
    format!("{}:{}:list:{}", CACHE_PREFIX, JOBS, canonical_query(&fields))
}

/// Generate the cache key of a job with its applicants.
#[must_use]
pub fn job_by_id(id: JobId) -> String {
    format!("{}:{}:id:{}", CACHE_PREFIX, JOBS, id)
}

/// Generate the cache key of one page of the applicant listing.
#[must_use]
pub fn applicant_list(page: PageRequest) -> String {
    format!("{}:{}:list:{}", CACHE_PREFIX, APPLICANTS, canonical_query(&page_fields(page)))
}

/// Pattern matching every cached job listing page.
#[must_use]
pub fn job_list_pattern() -> String {
    format!("{}:{}:list:*", CACHE_PREFIX, JOBS)
}

/// Pattern matching every job entry, listings and single jobs alike.
#[must_use]
pub fn jobs_namespace_pattern() -> String {
    format!("{}:{}:*", CACHE_PREFIX, JOBS)
}

/// Pattern matching every cached applicant listing page.
#[must_use]
pub fn applicant_list_pattern() -> String {
    format!("{}:{}:list:*", CACHE_PREFIX, APPLICANTS)
}

fn page_fields(page: PageRequest) -> BTreeMap<&'static str, String> {
    let page = PageRequest::new(page.page, page.page_size);
    let mut fields = BTreeMap::new();
    fields.insert("page", page.page.to_string());
    fields.insert("page_size", page.page_size.to_string());
    fields
}

fn canonical_query(fields: &BTreeMap<&'static str, String>) -> String {
    fields
        .iter()
        .map(|(name, value)| format!("{}={}", name, escape(value)))
        .collect::<Vec<_>>()
        .join("&")
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => out.push(char::from(byte)),
            _ => {
                let _ = write!(out, "%{:02X}", byte);
            }
        }
    }
    out
}
