//! Fixed-size pagination over the filtered listing set.
//!
//! [`paginate`] never fails: a requested page outside `[1, total_pages]` is
//! clamped, and an empty sequence still has one (empty) page.

/// Listings shown per grid page.
pub const PAGE_SIZE: usize = 20;

/// Direction of a page turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageNav {
    Prev,
    Next,
}

/// One page cut out of a longer sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number, already clamped.
    pub page: usize,
    /// Always at least 1.
    pub total_pages: usize,
}

impl<T> Page<T> {
    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Number of pages needed for `len` items.
///
/// ```
/// use homescout::domain::pagination::total_pages;
///
/// assert_eq!(total_pages(0, 20), 1);
/// assert_eq!(total_pages(20, 20), 1);
/// assert_eq!(total_pages(45, 20), 3);
/// ```
#[must_use]
pub const fn total_pages(len: usize, page_size: usize) -> usize {
    let size = if page_size == 0 { 1 } else { page_size };
    let pages = (len + size - 1) / size;
    if pages == 0 {
        1
    } else {
        pages
    }
}

/// Clamps a requested 1-based page into `[1, total_pages]`.
#[must_use]
pub fn clamp_page(page: usize, len: usize, page_size: usize) -> usize {
    page.clamp(1, total_pages(len, page_size))
}

/// The page after applying `nav` to `page`, or `None` when the move would
/// leave the valid range.
#[must_use]
pub fn turn(page: usize, nav: PageNav, len: usize, page_size: usize) -> Option<usize> {
    let last = total_pages(len, page_size);
    let current = page.clamp(1, last);
    match nav {
        PageNav::Prev if current > 1 => Some(current - 1),
        PageNav::Next if current < last => Some(current + 1),
        _ => None,
    }
}

/// Cuts page `page` (1-based, clamped) of `seq` into an owned [`Page`].
#[must_use]
pub fn paginate<T: Clone>(seq: &[T], page: usize, page_size: usize) -> Page<T> {
    let size = page_size.max(1);
    let total = total_pages(seq.len(), size);
    let page = page.clamp(1, total);

    let start = ((page - 1) * size).min(seq.len());
    let end = (start + size).min(seq.len());

    Page {
        items: seq[start..end].to_vec(),
        page,
        total_pages: total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forty_five_items_make_three_pages() {
        let items: Vec<u32> = (1..=45).collect();

        let first = paginate(&items, 1, PAGE_SIZE);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.items.len(), 20);
        assert!(!first.has_prev());
        assert!(first.has_next());

        let last = paginate(&items, 3, PAGE_SIZE);
        assert_eq!(last.items, (41..=45).collect::<Vec<_>>());
        assert!(last.has_prev());
        assert!(!last.has_next());
    }

    #[test]
    fn out_of_range_pages_are_clamped() {
        let items: Vec<u32> = (1..=45).collect();
        assert_eq!(paginate(&items, 0, PAGE_SIZE).page, 1);
        assert_eq!(paginate(&items, 99, PAGE_SIZE).page, 3);
        assert_eq!(clamp_page(7, 45, PAGE_SIZE), 3);
    }

    #[test]
    fn empty_sequence_has_one_empty_page() {
        let page = paginate::<u32>(&[], 4, PAGE_SIZE);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
        assert!(page.items.is_empty());
        assert!(!page.has_prev());
        assert!(!page.has_next());
    }

    #[test]
    fn turning_stops_at_the_edges() {
        assert_eq!(turn(1, PageNav::Prev, 45, PAGE_SIZE), None);
        assert_eq!(turn(1, PageNav::Next, 45, PAGE_SIZE), Some(2));
        assert_eq!(turn(3, PageNav::Next, 45, PAGE_SIZE), None);
        assert_eq!(turn(3, PageNav::Prev, 45, PAGE_SIZE), Some(2));
        assert_eq!(turn(1, PageNav::Next, 0, PAGE_SIZE), None);
    }

    mod proptest_pagination {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_pages_concatenate_to_input(
                items in proptest::collection::vec(any::<u16>(), 0..120),
                page_size in 1usize..30,
            ) {
                let total = total_pages(items.len(), page_size);
                let joined: Vec<u16> = (1..=total)
                    .flat_map(|p| paginate(&items, p, page_size).items)
                    .collect();
                prop_assert_eq!(joined, items);
            }

            #[test]
            fn prop_page_is_always_in_range(
                len in 0usize..200,
                page in 0usize..50,
                page_size in 1usize..30,
            ) {
                let items = vec![0u8; len];
                let cut = paginate(&items, page, page_size);
                prop_assert!(cut.page >= 1 && cut.page <= cut.total_pages);
                prop_assert!(cut.items.len() <= page_size);
            }
        }
    }
}
