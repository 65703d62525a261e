//! Pagination state and page slicing.

use std::ops::Range;

use crate::error::PaginationError;

/// Default page-size choices offered by a size changer.
pub const DEFAULT_PAGE_SIZE_OPTIONS: [usize; 4] = [10, 20, 50, 100];

/// Pagination state mirrored from the consumer.
///
/// Construct through [`Pagination::new`], which enforces `page_size > 0`
/// and `current >= 1`.
///
/// # Example
///
/// ```
/// use datatable_lib::query::Pagination;
///
/// let page = Pagination::new(2, 10, 25).unwrap();
/// assert_eq!(page.range(25), 10..20);
/// assert_eq!(page.total_pages(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    current: usize,
    page_size: usize,
    total: usize,
    show_size_changer: bool,
    page_size_options: Vec<usize>,
}

impl Pagination {
    /// Creates pagination state for page `current` (1-based).
    pub fn new(current: usize, page_size: usize, total: usize) -> Result<Self, PaginationError> {
        if page_size == 0 {
            return Err(PaginationError::ZeroPageSize);
        }
        if current == 0 {
            return Err(PaginationError::ZeroPage);
        }
        Ok(Self {
            current,
            page_size,
            total,
            show_size_changer: false,
            page_size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
        })
    }

    /// Shows a page-size changer offering `options`.
    pub fn with_size_changer(mut self, options: Vec<usize>) -> Self {
        self.show_size_changer = true;
        self.page_size_options = options;
        self
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn show_size_changer(&self) -> bool {
        self.show_size_changer
    }

    pub fn page_size_options(&self) -> &[usize] {
        &self.page_size_options
    }

    /// Moves to page `page`.
    pub fn set_current(&mut self, page: usize) -> Result<(), PaginationError> {
        if page == 0 {
            return Err(PaginationError::ZeroPage);
        }
        self.current = page;
        Ok(())
    }

    /// Changes the page size.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), PaginationError> {
        if page_size == 0 {
            return Err(PaginationError::ZeroPageSize);
        }
        self.page_size = page_size;
        Ok(())
    }

    pub fn set_total(&mut self, total: usize) {
        self.total = total;
    }

    /// Number of pages needed for `total` records (at least 1).
    pub fn total_pages(&self) -> usize {
        self.total.div_ceil(self.page_size).max(1)
    }

    pub fn has_prev(&self) -> bool {
        self.current > 1
    }

    pub fn has_next(&self) -> bool {
        self.current < self.total_pages()
    }

    /// Index range of the current page within `len` items.
    ///
    /// Empty (not an error) when the page starts past the end.
    pub fn range(&self, len: usize) -> Range<usize> {
        let start = (self.current - 1).saturating_mul(self.page_size);
        if start >= len {
            return len..len;
        }
        let end = start.saturating_add(self.page_size).min(len);
        start..end
    }

    /// The current page of `items`.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.range(items.len())]
    }
}
