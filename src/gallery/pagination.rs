//! Pagination engine.
//!
//! Splits the [`ImageIndex`] into fixed-size pages, reorders each page with
//! the bucket rule, and derives the navigation controls for a page.
//!
//! # Bucket Reorder
//!
//! Within a page, images are stably partitioned by `numeric_id % 3` and the
//! groups are concatenated in the order 0, 1, 2:
//!
//! ```text
//! ids:        0001 0002 0003 0004 0005 0006
//! id % 3:        1    2    0    1    2    0
//! reordered:  0003 0006 0001 0004 0002 0005
//! ```

use crate::error::PaginationError;
use crate::paths;

use super::index::{ImageIndex, ImageRecord};

/// Default number of images per page.
pub const DEFAULT_PAGE_SIZE: usize = 60;

// =============================================================================
// Paginator
// =============================================================================

/// Maps page numbers to slices of the image index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
}

impl Paginator {
    /// Create a paginator. A page size of zero is treated as one.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }

    /// Number of images per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// `ceil(total / page_size)`; zero for an empty index.
    pub fn page_count(&self, index: &ImageIndex) -> usize {
        self.page_count_for(index.len())
    }

    fn page_count_for(&self, total: usize) -> usize {
        total.div_ceil(self.page_size)
    }

    /// Return page `number`, bucket-reordered, with its navigation controls.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::InvalidPage`] when `number` is not in
    /// `[0, page_count)`. Out-of-range pages are never clamped.
    pub fn page<'a>(
        &self,
        index: &'a ImageIndex,
        number: usize,
    ) -> Result<Page<'a>, PaginationError> {
        let page_count = self.page_count(index);
        if number >= page_count {
            return Err(PaginationError::InvalidPage {
                page: number,
                page_count,
            });
        }

        let start = number * self.page_size;
        let end = (start + self.page_size).min(index.len());
        let images = bucket_reorder(&index.records()[start..end]);

        Ok(Page {
            number,
            images,
            navigation: Navigation::new(number, page_count),
        })
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

/// One display page of the gallery. Recomputed per request.
#[derive(Debug, Clone)]
pub struct Page<'a> {
    number: usize,
    images: Vec<&'a ImageRecord>,
    navigation: Navigation,
}

impl<'a> Page<'a> {
    /// Zero-based page number.
    pub fn number(&self) -> usize {
        self.number
    }

    /// Images in display order.
    pub fn images(&self) -> &[&'a ImageRecord] {
        &self.images
    }

    /// Previous/next controls for this page.
    pub fn navigation(&self) -> &Navigation {
        &self.navigation
    }
}

/// Stable partition of `records` by `numeric_id % 3`, groups in order 0, 1, 2.
pub fn bucket_reorder(records: &[ImageRecord]) -> Vec<&ImageRecord> {
    let mut buckets: [Vec<&ImageRecord>; 3] = Default::default();
    for record in records {
        buckets[(record.numeric_id() % 3) as usize].push(record);
    }

    buckets.into_iter().flatten().collect()
}

// =============================================================================
// Navigation
// =============================================================================

/// Position of a page within the gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    /// First of several pages
    FirstPage,
    /// Neither first nor last
    MiddlePage,
    /// Last of several pages
    LastPage,
    /// The only page
    SinglePage,
}

/// Destination of a navigation control, bound when the control is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    /// The gallery landing page
    Home,
    /// A specific gallery page
    Page(usize),
}

impl NavTarget {
    /// URL path this control links to.
    pub fn href(&self) -> String {
        match self {
            NavTarget::Home => paths::HOME.to_string(),
            NavTarget::Page(n) => paths::image_group(*n),
        }
    }
}

/// Previous and next controls for a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    /// Where the "previous" control leads
    pub previous: NavTarget,
    /// Where the "next" control leads
    pub next: NavTarget,
    /// Position of the page
    pub state: NavState,
}

impl Navigation {
    /// Build the controls for page `page` of `page_count`.
    ///
    /// Callers must pass `page < page_count`.
    pub fn new(page: usize, page_count: usize) -> Self {
        let is_first = page == 0;
        let is_last = page + 1 >= page_count;

        let previous = if is_first {
            NavTarget::Home
        } else {
            NavTarget::Page(page - 1)
        };
        let next = if is_last {
            NavTarget::Home
        } else {
            NavTarget::Page(page + 1)
        };
        let state = match (is_first, is_last) {
            (true, true) => NavState::SinglePage,
            (true, false) => NavState::FirstPage,
            (false, true) => NavState::LastPage,
            (false, false) => NavState::MiddlePage,
        };

        Self {
            previous,
            next,
            state,
        }
    }
}
