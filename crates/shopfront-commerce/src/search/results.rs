//! Result pages and pagination.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;

/// Pagination info for one result page.
///
/// `page` is always inside `[1, total_pages]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (1-indexed, clamped).
    pub page: usize,
    /// Items per page.
    pub per_page: usize,
    /// Number of items matching the query.
    pub total: usize,
    /// Total number of pages, at least 1.
    pub total_pages: usize,
}

impl Pagination {
    /// Create pagination info, clamping `requested` into range.
    ///
    /// `per_page` of zero is treated as one.
    pub fn new(requested: i64, per_page: usize, total: usize) -> Self {
        let per_page = per_page.max(1);
        let total_pages = total.div_ceil(per_page).max(1);
        let page = requested.clamp(1, total_pages as i64) as usize;

        Self {
            page,
            per_page,
            total,
            total_pages,
        }
    }

    /// Index of the first item on this page.
    pub fn offset(&self) -> usize {
        (self.page - 1) * self.per_page
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Get start item number (1-indexed), or 0 when nothing matched.
    pub fn start_item(&self) -> usize {
        if self.total == 0 {
            0
        } else {
            self.offset() + 1
        }
    }

    /// Get end item number.
    pub fn end_item(&self) -> usize {
        (self.page * self.per_page).min(self.total)
    }
}

/// One page of listing results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResultPage {
    /// Products on this page, in sorted order.
    pub items: Vec<Product>,
    /// Pagination info.
    pub pagination: Pagination,
}

impl ResultPage {
    pub fn current_page(&self) -> usize {
        self.pagination.page
    }

    pub fn total_pages(&self) -> usize {
        self.pagination.total_pages
    }

    pub fn total_count(&self) -> usize {
        self.pagination.total
    }

    pub fn page_size(&self) -> usize {
        self.pagination.per_page
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items on this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Listing summary line, e.g. `Showing 1-8 of 10 products`.
    pub fn summary(&self) -> String {
        let p = &self.pagination;
        if p.total == 0 {
            "No products found".to_string()
        } else {
            format!(
                "Showing {}-{} of {} products",
                p.start_item(),
                p.end_item(),
                p.total
            )
        }
    }

    /// Pager controls for this page; `None` when everything fits on one page.
    pub fn pager(&self) -> Option<Pager> {
        let p = &self.pagination;
        if p.total_pages <= 1 {
            return None;
        }

        Some(Pager {
            prev: PageButton {
                target: p.page.saturating_sub(1).max(1),
                disabled: !p.has_prev(),
            },
            pages: (1..=p.total_pages)
                .map(|target| PageButton {
                    target,
                    disabled: target == p.page,
                })
                .collect(),
            next: PageButton {
                target: (p.page + 1).min(p.total_pages),
                disabled: !p.has_next(),
            },
        })
    }
}

/// A pager button and the page it navigates to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageButton {
    pub target: usize,
    pub disabled: bool,
}

/// Prev, numbered pages, Next.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pager {
    pub prev: PageButton,
    pub pages: Vec<PageButton>,
    pub next: PageButton,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_of(requested: i64, per_page: usize, total: usize) -> ResultPage {
        ResultPage {
            items: Vec::new(),
            pagination: Pagination::new(requested, per_page, total),
        }
    }

    #[test]
    fn test_pagination_basics() {
        let p = Pagination::new(2, 10, 45);
        assert_eq!(p.total_pages, 5);
        assert!(p.has_next());
        assert!(p.has_prev());
        assert_eq!(p.offset(), 10);
    }

    #[test]
    fn test_pagination_clamps_requested_page() {
        assert_eq!(Pagination::new(0, 8, 10).page, 1);
        assert_eq!(Pagination::new(-3, 8, 10).page, 1);
        assert_eq!(Pagination::new(99, 8, 10).page, 2);
        assert_eq!(Pagination::new(i64::MAX, 8, 10).page, 2);
    }

    #[test]
    fn test_pagination_empty() {
        let p = Pagination::new(4, 8, 0);
        assert_eq!(p.total_pages, 1);
        assert_eq!(p.page, 1);
        assert_eq!(p.start_item(), 0);
        assert_eq!(p.end_item(), 0);
        assert!(!p.has_next());
        assert!(!p.has_prev());
    }

    #[test]
    fn test_pagination_item_range() {
        let p = Pagination::new(2, 8, 10);
        assert_eq!(p.start_item(), 9);
        assert_eq!(p.end_item(), 10);
    }

    #[test]
    fn test_summary() {
        assert_eq!(page_of(1, 8, 10).summary(), "Showing 1-8 of 10 products");
        assert_eq!(page_of(2, 8, 10).summary(), "Showing 9-10 of 10 products");
        assert_eq!(page_of(1, 8, 0).summary(), "No products found");
    }

    #[test]
    fn test_pager() {
        assert!(page_of(1, 8, 8).pager().is_none());
        assert!(page_of(1, 8, 0).pager().is_none());

        let pager = page_of(1, 4, 10).pager().unwrap();
        assert_eq!(pager.prev, PageButton { target: 1, disabled: true });
        assert_eq!(pager.next, PageButton { target: 2, disabled: false });
        assert_eq!(pager.pages.len(), 3);
        assert!(pager.pages[0].disabled);
        assert!(!pager.pages[1].disabled);

        let pager = page_of(3, 4, 10).pager().unwrap();
        assert_eq!(pager.prev, PageButton { target: 2, disabled: false });
        assert_eq!(pager.next, PageButton { target: 3, disabled: true });
    }
}
