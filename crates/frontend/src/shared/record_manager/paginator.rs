//! Page window over a filtered list. Pages are 1-based.

use serde::{Deserialize, Serialize};
use std::ops::Range;
use thiserror::Error;

pub const DEFAULT_PAGE_SIZES: &[usize] = &[10, 20, 50, 100];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    #[error("Page {requested} does not exist (1..={page_count})")]
    OutOfRange { requested: usize, page_count: usize },

    #[error("Page size must be greater than zero")]
    InvalidPageSize,
}

/// Snapshot handed to the pagination controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    pub page_number: usize,
    pub page_size: usize,
    pub total_count: usize,
}

impl PageWindow {
    pub fn page_count(&self) -> usize {
        page_count(self.total_count, self.page_size)
    }
}

/// `max(1, ceil(total / size))`
pub fn page_count(total_count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    total_count.div_ceil(page_size).max(1)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    page_number: usize,
    page_size: usize,
    total_count: usize,
    page_sizes: Vec<usize>,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZES[0])
    }
}

impl Paginator {
    /// A zero page size is raised to 1
    pub fn new(page_size: usize) -> Self {
        Self {
            page_number: 1,
            page_size: page_size.max(1),
            total_count: 0,
            page_sizes: DEFAULT_PAGE_SIZES.to_vec(),
        }
    }

    /// Page-size options shown in the selector; the current size is always offered
    pub fn with_page_sizes(mut self, sizes: &[usize]) -> Self {
        let mut sizes: Vec<usize> = sizes.iter().copied().filter(|s| *s > 0).collect();
        if !sizes.contains(&self.page_size) {
            sizes.push(self.page_size);
        }
        sizes.sort_unstable();
        sizes.dedup();
        self.page_sizes = sizes;
        self
    }

    pub fn page_number(&self) -> usize {
        self.page_number
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn page_sizes(&self) -> &[usize] {
        &self.page_sizes
    }

    pub fn page_count(&self) -> usize {
        page_count(self.total_count, self.page_size)
    }

    pub fn window(&self) -> PageWindow {
        PageWindow {
            page_number: self.page_number,
            page_size: self.page_size,
            total_count: self.total_count,
        }
    }

    /// Jump to a page. Out-of-range requests change nothing.
    pub fn go_to(&mut self, page_number: usize) -> Result<(), PageError> {
        let page_count = self.page_count();
        if page_number == 0 || page_number > page_count {
            return Err(PageError::OutOfRange {
                requested: page_number,
                page_count,
            });
        }
        self.page_number = page_number;
        Ok(())
    }

    /// Change the page size and go back to the first page
    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), PageError> {
        if page_size == 0 {
            return Err(PageError::InvalidPageSize);
        }
        self.page_size = page_size;
        self.page_number = 1;
        Ok(())
    }

    /// Take a new item count and pull the page back into range.
    /// Returns true when the page number moved.
    pub fn recompute(&mut self, total_count: usize) -> bool {
        self.total_count = total_count;
        let clamped = self.page_number.clamp(1, self.page_count());
        let moved = clamped != self.page_number;
        self.page_number = clamped;
        moved
    }

    /// Index range of the current page, clamped to the data
    pub fn range(&self) -> Range<usize> {
        let start = ((self.page_number - 1) * self.page_size).min(self.total_count);
        let end = (start + self.page_size).min(self.total_count);
        start..end
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = ((self.page_number - 1) * self.page_size).min(items.len());
        let end = (start + self.page_size).min(items.len());
        &items[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 10), 1);
        assert_eq!(page_count(1, 10), 1);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
        assert_eq!(page_count(23, 10), 3);
        for size in 1..15 {
            for total in 0..60 {
                let expected = ((total as f64 / size as f64).ceil() as usize).max(1);
                assert_eq!(page_count(total, size), expected, "total={total} size={size}");
            }
        }
    }

    #[test]
    fn test_slice_bounds() {
        let items: Vec<u32> = (1..=23).collect();
        let mut p = Paginator::new(10);
        p.recompute(items.len());
        assert_eq!(p.slice(&items), &items[0..10]);
        p.go_to(3).unwrap();
        assert_eq!(p.slice(&items), &[21, 22, 23]);
        assert_eq!(p.range(), 20..23);
    }

    #[test]
    fn test_out_of_range_is_rejected_without_change() {
        let mut p = Paginator::new(10);
        p.recompute(23);
        p.go_to(2).unwrap();
        assert_eq!(
            p.go_to(4),
            Err(PageError::OutOfRange {
                requested: 4,
                page_count: 3
            })
        );
        assert!(p.go_to(0).is_err());
        assert_eq!(p.page_number(), 2);
    }

    #[test]
    fn test_page_size_change_resets_to_first_page() {
        let mut p = Paginator::new(10);
        p.recompute(50);
        p.go_to(4).unwrap();
        p.set_page_size(20).unwrap();
        assert_eq!(p.page_number(), 1);
        assert_eq!(p.set_page_size(0), Err(PageError::InvalidPageSize));
        assert_eq!(p.page_size(), 20);
    }

    #[test]
    fn test_recompute_clamps() {
        let mut p = Paginator::new(10);
        p.recompute(21);
        p.go_to(3).unwrap();
        assert!(p.recompute(20));
        assert_eq!(p.page_number(), 2);
        assert!(p.recompute(0));
        assert_eq!(p.page_number(), 1);
        assert_eq!(p.range(), 0..0);
        assert!(!p.recompute(0));
    }

    #[test]
    fn test_invariant_holds_after_any_recompute() {
        let mut p = Paginator::new(7);
        for total in [100, 3, 70, 0, 8, 64, 1] {
            p.recompute(100);
            let _ = p.go_to(p.page_count());
            p.recompute(total);
            assert!(p.page_number() >= 1);
            assert!(p.page_number() <= p.page_count());
        }
    }

    #[test]
    fn test_page_sizes_include_current() {
        let p = Paginator::new(25).with_page_sizes(&[10, 50, 0, 10]);
        assert_eq!(p.page_sizes(), &[10, 25, 50]);
        assert_eq!(Paginator::default().page_sizes(), DEFAULT_PAGE_SIZES);
    }
}
