//! Pagination
//!
//! Slices query results into fixed-size, 1-based pages.

use std::num::NonZeroUsize;

/// Default number of products per listing page.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(8) {
    Some(size) => size,
    None => NonZeroUsize::MIN,
};

/// Fixed-size paginator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: NonZeroUsize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Paginator {
    /// Create a paginator with the given page size.
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self { page_size }
    }

    /// Number of items per page.
    pub fn page_size(&self) -> usize {
        self.page_size.get()
    }

    /// Number of pages needed for `total_items`; zero when there is nothing to show.
    pub fn total_pages(&self, total_items: usize) -> usize {
        total_items.div_ceil(self.page_size.get())
    }

    /// Page `number` (1-based) of `items`.
    ///
    /// Page 0 and pages past the last one are empty.
    pub fn page<'i, T>(&self, items: &'i [T], number: usize) -> Page<'i, T> {
        let size = self.page_size.get();

        let slice = number
            .checked_sub(1)
            .and_then(|index| index.checked_mul(size))
            .and_then(|start| {
                let end = start.saturating_add(size).min(items.len());
                items.get(start..end)
            })
            .unwrap_or_default();

        Page {
            number,
            items: slice,
            total_items: items.len(),
            total_pages: self.total_pages(items.len()),
        }
    }
}

/// One page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'i, T> {
    /// Requested page number
    pub number: usize,

    /// Items on this page
    pub items: &'i [T],

    /// Number of items across every page
    pub total_items: usize,

    /// Number of pages
    pub total_pages: usize,
}

impl<T> Page<'_, T> {
    /// Whether there is a page before this one.
    pub fn has_previous(&self) -> bool {
        self.number > 1 && self.total_pages > 0
    }

    /// Whether there is a page after this one.
    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    /// Whether the page holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// An entry in the page-link strip under a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    /// A clickable page number
    Page(usize),

    /// An elided run of pages
    Gap,
}

/// Page links around `current` out of `total` pages.
///
/// The first and last pages are always present, along with the neighbours
/// of `current`. Pages two away from `current` collapse into a [`PageLink::Gap`].
pub fn page_window(current: usize, total: usize) -> Vec<PageLink> {
    (1..=total)
        .filter_map(|page| {
            let distance = page.abs_diff(current);

            if page == 1 || page == total || distance <= 1 {
                Some(PageLink::Page(page))
            } else if distance == 2 {
                Some(PageLink::Gap)
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paginator(size: usize) -> Paginator {
        Paginator::new(NonZeroUsize::new(size).unwrap_or(NonZeroUsize::MIN))
    }

    #[test]
    fn default_page_size_is_eight() {
        assert_eq!(Paginator::default().page_size(), 8);
    }

    #[test]
    fn pages_slice_items() {
        let items: Vec<u32> = (1..=10).collect();
        let paginator = paginator(4);

        let first = paginator.page(&items, 1);
        let last = paginator.page(&items, 3);

        assert_eq!(first.items, &[1, 2, 3, 4]);
        assert_eq!(last.items, &[9, 10]);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.total_items, 10);
        assert!(!first.has_previous());
        assert!(first.has_next());
        assert!(last.has_previous());
        assert!(!last.has_next());
    }

    #[test]
    fn out_of_range_pages_are_empty() {
        let items: Vec<u32> = (1..=10).collect();
        let paginator = paginator(4);

        assert!(paginator.page(&items, 0).is_empty());
        assert!(paginator.page(&items, 4).is_empty());
        assert!(paginator.page(&items, usize::MAX).is_empty());
    }

    #[test]
    fn empty_input_has_no_pages() {
        let items: [u32; 0] = [];
        let page = paginator(8).page(&items, 1);

        assert_eq!(page.total_pages, 0);
        assert!(page.is_empty());
        assert!(!page.has_next());
        assert!(!page.has_previous());
    }

    #[test]
    fn window_in_the_middle_has_gaps() {
        assert_eq!(
            page_window(5, 10),
            vec![
                PageLink::Page(1),
                PageLink::Gap,
                PageLink::Page(4),
                PageLink::Page(5),
                PageLink::Page(6),
                PageLink::Gap,
                PageLink::Page(10),
            ]
        );
    }

    #[test]
    fn window_near_the_start() {
        assert_eq!(
            page_window(1, 5),
            vec![
                PageLink::Page(1),
                PageLink::Page(2),
                PageLink::Gap,
                PageLink::Page(5),
            ]
        );
    }

    #[test]
    fn window_for_no_pages_is_empty() {
        assert!(page_window(1, 0).is_empty());
    }
}
