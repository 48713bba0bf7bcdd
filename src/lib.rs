//! # Photo Gallery
//!
//! A small self-hosted photo gallery for a single shared login.
//!
//! The gallery serves compressed display copies of a photo collection in
//! fixed-size pages, and offers the full-resolution originals and a
//! pre-built archive for download.
//!
//! ## Features
//!
//! - **Shared login**: username/password pairs from a JSON file, with a
//!   signed session cookie and a redirect back to the page first requested
//! - **Pagination**: fixed page size, explicit errors for pages that do not
//!   exist, previous/next navigation that falls back to the gallery index
//! - **Bucket ordering**: each page is stably reordered by `id % 3`
//! - **Downloads**: per-image originals and a bulk archive
//!
//! ## Architecture
//!
//! - [`gallery`] - Image index and pagination engine
//! - [`session`] - Credentials, sessions, cookie signing and the session guard
//! - [`server`] - Axum-based HTTP server, routes and HTML views
//! - [`config`] - CLI and configuration types
//!
//! ## Example
//!
//! ```rust,no_run
//! use photo_gallery::{create_router, CredentialStore, ImageIndex, RouterConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let index = ImageIndex::build("images/all_photos_compress", "jpg").unwrap_or_default();
//!     let credentials = CredentialStore::load("users.json").expect("credentials");
//!
//!     let router = create_router(index, credentials, RouterConfig::new("session-secret"));
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:9000").await.unwrap();
//!     axum::serve(listener, router).await.unwrap();
//! }
//! ```

pub mod config;
pub mod error;
pub mod gallery;
pub mod paths;
pub mod server;
pub mod session;

// Re-export commonly used types
pub use config::{Cli, Command, Config};
pub use error::{AssetError, CredentialError, IndexError, PaginationError};
pub use gallery::{
    bucket_reorder, extract_image_id, ImageIndex, ImageRecord, NavState, NavTarget, Navigation,
    Page, Paginator, DEFAULT_IMAGE_ID, DEFAULT_PAGE_SIZE,
};
pub use server::{create_router, AppState, ErrorResponse, HealthResponse, RouterConfig};
pub use session::{
    decide, CredentialStore, GuardDecision, RouteKind, RouteTable, Session, SessionSigner,
    SessionStore,
};
