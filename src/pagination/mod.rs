//! Pagination
//!
//! Slices a listing into 1-based pages with next/previous page tokens.

mod query;

pub use query::PageQuery;

use serde::Serialize;

/// One page of a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Number of items actually on this page
    pub size: usize,
    /// Length of the whole listing before slicing
    pub total: usize,
    pub page: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_page_token: Option<usize>,
}

impl<T> Page<T> {
    /// Replace the items while keeping the page position and tokens
    pub fn with_items<U>(self, items: Vec<U>) -> Page<U> {
        Page {
            size: items.len(),
            items,
            total: self.total,
            page: self.page,
            next_page_token: self.next_page_token,
            prev_page_token: self.prev_page_token,
        }
    }
}

/// Cut page `page` of `size` items out of `items`.
///
/// A `size` of 0 yields an empty page for any page number. Page 0 is
/// read as page 1.
pub fn paginate<T>(items: Vec<T>, size: usize, page: usize) -> Page<T> {
    let page = page.max(1);
    let total = items.len();

    let skip = (page - 1).saturating_mul(size);
    let limit = size.saturating_mul(page);

    let items: Vec<T> = items.into_iter().skip(skip).take(limit - skip).collect();

    let next_page_token = if skip.saturating_add(size) < total {
        page.checked_add(1)
    } else {
        None
    };
    let prev_page_token = (page > 1).then_some(page - 1);

    Page {
        size: items.len(),
        items,
        total,
        page,
        next_page_token,
        prev_page_token,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters() -> Vec<&'static str> {
        vec!["a", "b", "c", "d", "e"]
    }

    #[test]
    fn test_middle_page() {
        let page = paginate(letters(), 2, 2);
        assert_eq!(page.items, vec!["c", "d"]);
        assert_eq!(page.size, 2);
        assert_eq!(page.total, 5);
        assert_eq!(page.page, 2);
        assert_eq!(page.next_page_token, Some(3));
        assert_eq!(page.prev_page_token, Some(1));
    }

    #[test]
    fn test_last_page_reports_true_size() {
        let page = paginate(letters(), 2, 3);
        assert_eq!(page.items, vec!["e"]);
        assert_eq!(page.size, 1);
        assert_eq!(page.next_page_token, None);
        assert_eq!(page.prev_page_token, Some(2));
    }

    #[test]
    fn test_first_page_has_no_prev() {
        let page = paginate(letters(), 5, 1);
        assert_eq!(page.size, 5);
        assert_eq!(page.next_page_token, None);
        assert_eq!(page.prev_page_token, None);
    }

    #[test]
    fn test_page_past_end_is_empty_but_keeps_prev() {
        let page = paginate(letters(), 2, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.total, 5);
        assert_eq!(page.next_page_token, None);
        assert_eq!(page.prev_page_token, Some(9));
    }

    #[test]
    fn test_zero_size_is_always_empty() {
        for page_number in 1..4 {
            let page = paginate(letters(), 0, page_number);
            assert!(page.items.is_empty());
            assert_eq!(page.total, 5);
        }
    }

    #[test]
    fn test_page_zero_reads_as_first() {
        assert_eq!(paginate(letters(), 2, 0), paginate(letters(), 2, 1));
    }

    #[test]
    fn test_slice_length_and_tokens_hold_for_all_inputs() {
        for n in 0..12usize {
            let items: Vec<usize> = (0..n).collect();
            for size in 1..6usize {
                for page_number in 1..8usize {
                    let page = paginate(items.clone(), size, page_number);
                    let skip = (page_number - 1) * size;
                    assert_eq!(page.items.len(), size.min(n.saturating_sub(skip)));
                    assert_eq!(page.total, n);

                    let next_non_empty = !paginate(items.clone(), size, page_number + 1)
                        .items
                        .is_empty();
                    assert_eq!(page.next_page_token.is_some(), next_non_empty);
                    assert_eq!(page.prev_page_token.is_some(), page_number > 1);
                }
            }
        }
    }

    #[test]
    fn test_largest_page_number_does_not_overflow() {
        let page = paginate(vec!["a", "b"], 2, usize::MAX);
        assert!(page.items.is_empty());
        assert_eq!(page.total, 2);
        assert_eq!(page.next_page_token, None);
        assert_eq!(page.prev_page_token, Some(usize::MAX - 1));

        let empty_size = paginate(vec!["a", "b"], 0, usize::MAX);
        assert!(empty_size.items.is_empty());
        assert_eq!(empty_size.next_page_token, None);
    }

    #[test]
    fn test_with_items_keeps_position() {
        let page = paginate(letters(), 2, 2).with_items(vec![1, 2]);
        assert_eq!(page.items, vec![1, 2]);
        assert_eq!(page.total, 5);
        assert_eq!(page.next_page_token, Some(3));
        assert_eq!(page.prev_page_token, Some(1));
    }
}
