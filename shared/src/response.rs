//! List payload and paging types
//!
//! Standardized list structures for the whole API

use serde::{Deserialize, Serialize};

/// Paging parameters as received from the query string
///
/// `page` is 0-based; the row offset is `page * page_size`.
/// A `page_size` of 0 disables paging.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Paging {
    #[serde(default, deserialize_with = "crate::serde_helpers::blank_as_none")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "crate::serde_helpers::blank_as_none")]
    pub page_size: Option<i64>,
}

/// Resolved page window (limit/offset)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub limit: i64,
    pub offset: i64,
}

impl Paging {
    /// Resolve into a limit/offset window, falling back to `default_size`
    ///
    /// Returns `None` when the effective page size is 0 (no paging).
    /// An offset past `i64::MAX` saturates, which selects an empty page.
    pub fn window(&self, default_size: i64) -> Option<PageWindow> {
        let size = self.page_size.unwrap_or(default_size);
        if size <= 0 {
            return None;
        }
        let page = self.page.unwrap_or(0).max(0);
        Some(PageWindow {
            limit: size,
            offset: page.saturating_mul(size),
        })
    }
}

/// List response payload: `{ "lists": [...], "total": n }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageData<T> {
    /// Items of the requested page
    pub lists: Vec<T>,
    /// Total number of matching live rows (ignores paging)
    pub total: i64,
}

impl<T> PageData<T> {
    pub fn new(lists: Vec<T>, total: i64) -> Self {
        Self { lists, total }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_uses_page_times_size() {
        let paging = Paging {
            page: Some(2),
            page_size: Some(10),
        };
        assert_eq!(
            paging.window(10),
            Some(PageWindow {
                limit: 10,
                offset: 20
            })
        );
    }

    #[test]
    fn test_window_defaults() {
        let paging = Paging::default();
        assert_eq!(
            paging.window(10),
            Some(PageWindow {
                limit: 10,
                offset: 0
            })
        );
    }

    #[test]
    fn test_window_disabled_by_zero_size() {
        let paging = Paging {
            page: Some(3),
            page_size: Some(0),
        };
        assert_eq!(paging.window(10), None);
        assert_eq!(Paging::default().window(0), None);
    }

    #[test]
    fn test_window_offset_saturates() {
        let paging = Paging {
            page: Some(i64::MAX),
            page_size: Some(10),
        };
        assert_eq!(
            paging.window(10),
            Some(PageWindow {
                limit: 10,
                offset: i64::MAX
            })
        );
    }
}
