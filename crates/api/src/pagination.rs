//! In-memory pagination over a fully materialized result set.
//!
//! An application-layer paging veneer, not a storage cursor: callers fetch
//! the complete filtered collection first, then slice it here.

use serde::{Deserialize, Serialize};

/// Page number and size as supplied by the client.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub page: usize,
    #[serde(default = "default_page_size")]
    pub size: usize,
}

fn default_page_size() -> usize {
    10
}

/// A page of results with position metadata and navigation links.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: PageInfo,
    pub links: PageLinks,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub number: usize,
    pub size: usize,
    pub total_elements: usize,
    pub total_pages: usize,
    pub first: bool,
    pub last: bool,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct PageLinks {
    pub first: String,
    pub last: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
}

impl<T> Page<T> {
    /// Slices `items` into the requested page.
    ///
    /// A size of zero yields zero pages and empty content rather than a
    /// division by zero; a page number past the end yields empty content
    /// with `last = true`. Links always carry the same size and base path.
    pub fn paginate(items: Vec<T>, number: usize, size: usize, base_path: &str) -> Page<T> {
        let total_elements = items.len();
        let total_pages = if size == 0 {
            0
        } else {
            total_elements.div_ceil(size)
        };

        let start = number.saturating_mul(size);
        let content = if size == 0 || start >= total_elements {
            Vec::new()
        } else {
            items
                .into_iter()
                .skip(start)
                .take(size)
                .collect()
        };

        let first = number == 0;
        let last = number + 1 >= total_pages;

        let link = |page: usize| format!("{base_path}?page={page}&size={size}");
        let links = PageLinks {
            first: link(0),
            last: link(total_pages.saturating_sub(1)),
            next: (!last).then(|| link(number + 1)),
            previous: (!first).then(|| link(number - 1)),
        };

        Page {
            content,
            page: PageInfo {
                number,
                size,
                total_elements,
                total_pages,
                first,
                last,
            },
            links,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn middle_page_slices_correctly() {
        let page = Page::paginate(items(25), 1, 10, "/api/orders");
        assert_eq!(page.content, (10..20).collect::<Vec<_>>());
        assert_eq!(
            page.page,
            PageInfo {
                number: 1,
                size: 10,
                total_elements: 25,
                total_pages: 3,
                first: false,
                last: false,
            }
        );
        assert_eq!(page.links.next.as_deref(), Some("/api/orders?page=2&size=10"));
        assert_eq!(
            page.links.previous.as_deref(),
            Some("/api/orders?page=0&size=10")
        );
    }

    #[test]
    fn first_page_of_25_by_10() {
        let page = Page::paginate(items(25), 0, 10, "/api/orders");
        assert_eq!(page.content.len(), 10);
        assert_eq!(page.page.total_pages, 3);
        assert!(page.page.first);
        assert!(!page.page.last);
        assert!(page.links.next.is_some());
        assert!(page.links.previous.is_none());
    }

    #[test]
    fn last_partial_page() {
        let page = Page::paginate(items(25), 2, 10, "/api/orders");
        assert_eq!(page.content.len(), 5);
        assert!(page.page.last);
        assert!(page.links.next.is_none());
        assert_eq!(page.links.last, "/api/orders?page=2&size=10");
    }

    #[test]
    fn page_beyond_range_is_empty_and_last() {
        let page = Page::paginate(items(5), 7, 10, "/base");
        assert!(page.content.is_empty());
        assert!(page.page.last);
        assert!(page.links.next.is_none());
        // Previous still points back, the client can navigate home.
        assert!(page.links.previous.is_some());
    }

    #[test]
    fn zero_size_yields_zero_pages_without_fault() {
        let page = Page::paginate(items(5), 0, 0, "/base");
        assert!(page.content.is_empty());
        assert_eq!(page.page.total_pages, 0);
        assert_eq!(page.page.total_elements, 5);
        assert!(page.page.last);
    }

    #[test]
    fn empty_collection() {
        let page = Page::paginate(items(0), 0, 10, "/base");
        assert!(page.content.is_empty());
        assert_eq!(page.page.total_pages, 0);
        assert!(page.page.first);
        assert!(page.page.last);
    }

    #[test]
    fn pages_partition_the_collection() {
        for (n, size) in [(25, 10), (30, 10), (1, 3), (9, 4), (100, 7)] {
            let total_pages = Page::paginate(items(n), 0, size, "/b").page.total_pages;
            let mut seen = 0;
            for p in 0..total_pages {
                let page = Page::paginate(items(n), p, size, "/b");
                assert!(page.content.len() <= size);
                seen += page.content.len();
            }
            assert_eq!(seen, n, "n={n} size={size}");
        }
    }

    #[test]
    fn serialized_field_names_are_camel_case() {
        let page = Page::paginate(items(3), 0, 2, "/b");
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["page"]["totalElements"], 3);
        assert_eq!(json["page"]["totalPages"], 2);
        assert_eq!(json["links"]["first"], "/b?page=0&size=2");
    }
}
