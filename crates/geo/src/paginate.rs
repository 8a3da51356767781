//! Offset/limit pagination.
//!
//! Pagination always runs on the final, already-filtered result list. Slicing
//! the raw candidate set first would hand the radius filter a page that may
//! contain only distant listings and return a short or empty page even though
//! nearby listings exist further down.

use serde::{Deserialize, Serialize};

/// Requested page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Maximum number of items in the page
    pub limit: usize,
    /// Number of items to skip
    pub offset: usize,
}

impl PageRequest {
    /// Creates a page request.
    pub fn new(limit: usize, offset: usize) -> Self {
        Self { limit, offset }
    }

    /// Index range this request covers within a list of `len` items.
    fn range(&self, len: usize) -> std::ops::Range<usize> {
        let start = self.offset.min(len);
        let end = start.saturating_add(self.limit).min(len);
        start..end
    }
}

/// Returns `results[offset .. offset + limit]`, clamped to the list bounds.
///
/// # Example
/// ```
/// use pulperia_geo::{paginate, PageRequest};
///
/// let ranked = [1, 2, 3, 4, 5];
/// assert_eq!(paginate(&ranked, PageRequest::new(2, 1)), &[2, 3]);
/// assert!(paginate(&ranked, PageRequest::new(2, 9)).is_empty());
/// ```
pub fn paginate<T>(results: &[T], page: PageRequest) -> &[T] {
    &results[page.range(results.len())]
}

/// One page of results plus enough metadata for the client to request the next.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items in this page
    pub items: Vec<T>,
    /// Number of results before pagination
    pub total: usize,
    /// Page size that was applied
    pub limit: usize,
    /// Offset that was applied
    pub offset: usize,
    /// True if results remain after this page
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Slices `results` according to `page`, consuming the list.
    pub fn from_results(results: Vec<T>, page: PageRequest) -> Self {
        let total = results.len();
        let range = page.range(total);
        let has_more = range.end < total;

        let items: Vec<T> = results
            .into_iter()
            .skip(range.start)
            .take(range.end - range.start)
            .collect();

        tracing::debug!(
            total,
            offset = page.offset,
            limit = page.limit,
            returned = items.len(),
            "page sliced"
        );

        Self {
            items,
            total,
            limit: page.limit,
            offset: page.offset,
            has_more,
        }
    }

    /// Number of items in this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if this page has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{filter_by_distance, GeoPoint, InclusionMode, Radius};

    #[test]
    fn test_slice_middle() {
        let data: Vec<u32> = (0..10).collect();
        assert_eq!(paginate(&data, PageRequest::new(3, 4)), &[4, 5, 6]);
    }

    #[test]
    fn test_slice_past_end() {
        let data: Vec<u32> = (0..10).collect();
        assert_eq!(paginate(&data, PageRequest::new(5, 8)), &[8, 9]);
        assert!(paginate(&data, PageRequest::new(5, 10)).is_empty());
        assert!(paginate(&data, PageRequest::new(5, 50)).is_empty());
    }

    #[test]
    fn test_zero_limit() {
        let data = [1, 2, 3];
        assert!(paginate(&data, PageRequest::new(0, 0)).is_empty());
    }

    #[test]
    fn test_huge_limit_does_not_overflow() {
        let data = [1, 2, 3];
        assert_eq!(paginate(&data, PageRequest::new(usize::MAX, 1)), &[2, 3]);
    }

    #[test]
    fn test_page_envelope() {
        let data: Vec<u32> = (0..10).collect();

        let first = Page::from_results(data.clone(), PageRequest::new(4, 0));
        assert_eq!(first.items, vec![0, 1, 2, 3]);
        assert_eq!(first.total, 10);
        assert!(first.has_more);

        let last = Page::from_results(data.clone(), PageRequest::new(4, 8));
        assert_eq!(last.items, vec![8, 9]);
        assert!(!last.has_more);

        let beyond = Page::from_results(data, PageRequest::new(4, 20));
        assert!(beyond.is_empty());
        assert!(!beyond.has_more);
    }

    #[test]
    fn test_page_serializes_camel_case() {
        let page = Page::from_results(vec![1, 2, 3], PageRequest::new(2, 0));
        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(value["hasMore"], true);
        assert_eq!(value["total"], 3);
    }

    /// Paginating the raw candidates before filtering loses nearby results
    /// that sit outside the first raw page.
    #[test]
    fn test_paginate_after_filter_differs_from_before() {
        let center = GeoPoint::new(14.0818, -87.2068);
        let radius = Radius::km(2.0).unwrap();
        let candidates = vec![
            GeoPoint::new(14.50, -87.50), // far, but first in data-store order
            GeoPoint::new(14.0828, -87.2068),
            GeoPoint::new(14.0838, -87.2068),
        ];
        let page = PageRequest::new(1, 0);

        let filtered = filter_by_distance(&candidates, center, radius, InclusionMode::Strict);
        let correct = paginate(&filtered, page);

        let raw_page = paginate(&candidates, page);
        let wrong = filter_by_distance(raw_page, center, radius, InclusionMode::Strict);

        assert_eq!(correct.len(), 1);
        assert_eq!(*correct[0].candidate, candidates[1]);
        assert!(wrong.is_empty());
        assert_ne!(correct.len(), wrong.len());
    }
}
