// src/query/pagination.rs
use serde::Serialize;
use std::cmp::Ordering;
use std::num::NonZeroUsize;

use super::predicate::{SearchPredicate, Searchable};

/// Page size used by every list endpoint unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Requested page, as parsed from the `page` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageNumber {
    Number(usize),
    Last,
}

impl Default for PageNumber {
    fn default() -> Self {
        PageNumber::Number(1)
    }
}

impl PageNumber {
    /// Absent, non-numeric and non-positive values fall back to the first page.
    /// Digit strings too large for `usize` saturate, so they still clamp to
    /// the last page.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim) else {
            return Self::default();
        };

        if raw == "last" {
            return PageNumber::Last;
        }

        match raw.parse::<usize>() {
            Ok(n) if n >= 1 => PageNumber::Number(n),
            Err(_) if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) => {
                PageNumber::Number(usize::MAX)
            }
            _ => Self::default(),
        }
    }
}

/// Base ordering of a collection before paging.
pub enum BaseOrdering<T> {
    /// Keep the order the store yields (insertion order).
    Insertion,
    /// Stable sort by the given comparator.
    By(fn(&T, &T) -> Ordering),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub num_pages: usize,
    pub total_count: usize,
    pub page_size: usize,
    pub is_paginated: bool,
    pub has_next: bool,
    pub has_previous: bool,
}

/// A page together with the search text that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult<T> {
    #[serde(flatten)]
    pub page: Page<T>,
    pub search: String,
}

impl<T> SearchResult<T> {
    pub fn new(page: Page<T>, predicate: &SearchPredicate) -> Self {
        Self {
            page,
            search: predicate.query().unwrap_or_default().to_string(),
        }
    }
}

/// Filter, order and slice `items` into one page.
///
/// Page numbers past the end clamp to the last page; an empty result is a
/// single empty page.
pub fn list_page<T>(
    items: &[T],
    ordering: &BaseOrdering<T>,
    predicate: &SearchPredicate,
    page: PageNumber,
    page_size: NonZeroUsize,
) -> Page<T>
where
    T: Searchable + Clone,
{
    let mut filtered: Vec<&T> = items.iter().filter(|item| predicate.matches(*item)).collect();
    if let BaseOrdering::By(compare) = ordering {
        filtered.sort_by(|a, b| compare(a, b));
    }

    let size = page_size.get();
    let total_count = filtered.len();
    let num_pages = total_count.div_ceil(size).max(1);

    let number = match page {
        PageNumber::Number(n) => n.clamp(1, num_pages),
        PageNumber::Last => num_pages,
    };

    let start = ((number - 1) * size).min(total_count);
    let end = (start + size).min(total_count);

    Page {
        items: filtered[start..end].iter().map(|item| (*item).clone()).collect(),
        page: number,
        num_pages,
        total_count,
        page_size: size,
        is_paginated: total_count > size,
        has_next: number < num_pages,
        has_previous: number > 1,
    }
}
