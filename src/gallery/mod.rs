//! Gallery layer.
//!
//! This module owns the read-only view of the photo collection: the image
//! index built once at startup and the pagination engine that slices it into
//! display pages.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │              HTTP Handlers              │
//! └────────────────────┬────────────────────┘
//!                      │  page(n)
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │              Paginator                  │
//! │  (slice → bucket reorder → navigation)  │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │              ImageIndex                 │
//! │  (sorted directory listing, immutable)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use photo_gallery::gallery::{ImageIndex, Paginator};
//!
//! let index = ImageIndex::from_paths(["a/IMG_0001.jpg", "a/IMG_0002.jpg", "a/IMG_0003.jpg"]);
//! let paginator = Paginator::new(2);
//!
//! assert_eq!(paginator.page_count(&index), 2);
//! let page = paginator.page(&index, 1).unwrap();
//! assert_eq!(page.images().len(), 1);
//! ```

mod index;
mod pagination;

pub use index::{extract_image_id, ImageIndex, ImageRecord, DEFAULT_IMAGE_ID};
pub use pagination::{
    bucket_reorder, NavState, NavTarget, Navigation, Page, Paginator, DEFAULT_PAGE_SIZE,
};
