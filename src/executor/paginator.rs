//! Offset pagination
//!
//! `total_pages = ceil(total / page_size)`, 0 for an empty result. A page past
//! the end is empty, not an error. The window is validated before it gets
//! here, so a zero page size is treated as an empty page.

use crate::dataset::RecordId;
use crate::query::PageWindow;

use super::result::PageResult;

/// Slices ordered results into pages
pub struct Paginator;

impl Paginator {
    /// Returns the requested page of `ordered`
    pub fn paginate(ordered: &[RecordId], window: PageWindow) -> PageResult {
        let total = ordered.len();
        let page_size = window.page_size as usize;

        let total_pages = if page_size == 0 {
            0
        } else {
            total.div_ceil(page_size)
        };

        let skip = window.offset();
        let ids = if skip >= total || page_size == 0 {
            Vec::new()
        } else {
            let end = skip.saturating_add(page_size).min(total);
            ordered[skip..end].to_vec()
        };

        PageResult {
            ids,
            total_matched: total,
            page: window.page,
            page_size: window.page_size,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_cover_all_rows() {
        let ordered: Vec<RecordId> = (0..5).collect();

        let first = Paginator::paginate(&ordered, PageWindow::new(1, 2));
        let second = Paginator::paginate(&ordered, PageWindow::new(2, 2));
        let third = Paginator::paginate(&ordered, PageWindow::new(3, 2));

        assert_eq!(first.ids, vec![0, 1]);
        assert_eq!(second.ids, vec![2, 3]);
        assert_eq!(third.ids, vec![4]);
        assert_eq!(first.total_pages, 3);
        assert_eq!(third.total_matched, 5);
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let ordered: Vec<RecordId> = (0..5).collect();
        let page = Paginator::paginate(&ordered, PageWindow::new(4, 2));
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.page, 4);
    }

    #[test]
    fn test_empty_result() {
        let page = Paginator::paginate(&[], PageWindow::default());
        assert!(page.is_empty());
        assert_eq!(page.total_matched, 0);
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn test_exact_multiple() {
        let ordered: Vec<RecordId> = (0..10).collect();
        let page = Paginator::paginate(&ordered, PageWindow::new(2, 5));
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.len(), 5);
    }
}
