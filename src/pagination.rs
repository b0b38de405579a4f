//! Page windows for list screens that slice an already fetched collection.

use serde::Serialize;

pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// Page numbers to render, `None` standing for an ellipsis.
fn page_window(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    if total_pages == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(total_pages + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = (current_page + right_current + 1).min(total_pages + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(total_pages.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=total_pages).map(Some));

    pages
}

#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<Option<usize>>,
    pub page: usize,
    /// Number of items across every page.
    pub total: usize,
}

impl<T> Paginated<T> {
    /// Slices `items` to the requested 1-based page.
    ///
    /// Page 0 is read as the first page and pages past the end as the last.
    pub fn slice(items: Vec<T>, page: usize, per_page: usize) -> Self {
        let per_page = per_page.max(1);
        let total = items.len();
        let total_pages = total.div_ceil(per_page);
        let page = page.clamp(1, total_pages.max(1));

        let items = items
            .into_iter()
            .skip((page - 1) * per_page)
            .take(per_page)
            .collect();

        Self {
            items,
            pages: page_window(total_pages, page, 2, 2, 4, 2),
            page,
            total,
        }
    }

    pub fn total_pages(&self) -> usize {
        self.pages.iter().flatten().max().copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slices_requested_page() {
        let page = Paginated::slice((1..=12).collect(), 2, 5);
        assert_eq!(page.items, vec![6, 7, 8, 9, 10]);
        assert_eq!(page.page, 2);
        assert_eq!(page.total, 12);
        assert_eq!(page.total_pages(), 3);
    }

    #[test]
    fn clamps_out_of_range_pages() {
        let last = Paginated::slice((1..=12).collect(), 9, 5);
        assert_eq!(last.items, vec![11, 12]);
        assert_eq!(last.page, 3);

        let first = Paginated::slice((1..=3).collect(), 0, 5);
        assert_eq!(first.page, 1);
        assert_eq!(first.items.len(), 3);
    }

    #[test]
    fn empty_list_has_no_pages() {
        let page = Paginated::<u8>::slice(Vec::new(), 1, 5);
        assert!(page.items.is_empty());
        assert!(page.pages.is_empty());
        assert_eq!(page.page, 1);
    }

    #[test]
    fn long_lists_get_ellipses() {
        let page = Paginated::slice((1..=200).collect::<Vec<_>>(), 10, 10);
        assert_eq!(
            page.pages,
            vec![
                Some(1),
                Some(2),
                None,
                Some(8),
                Some(9),
                Some(10),
                Some(11),
                Some(12),
                Some(13),
                Some(14),
                None,
                Some(19),
                Some(20)
            ]
        );
    }
}
