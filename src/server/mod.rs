//! HTTP server layer for the photo gallery.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         HTTP Layer                              │
//! │     GET /home   GET /image/image_group_{page}   GET /login      │
//! │                                                                 │
//! │  ┌─────────────┐  ┌─────────────┐  ┌──────────┐  ┌───────────┐  │
//! │  │  handlers   │  │    auth     │  │  views   │  │  routes   │  │
//! │  │ (pages,     │  │ (session    │  │  (HTML)  │  │ (router   │  │
//! │  │  downloads) │  │  guard)     │  │          │  │  config)  │  │
//! │  └─────────────┘  └─────────────┘  └──────────┘  └───────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod handlers;
pub mod routes;
pub mod views;

pub use auth::{
    login_page_handler, login_submit_handler, logout_handler, session_middleware, CurrentSession,
    LoginForm, LoginQueryParams, SESSION_COOKIE,
};
pub use handlers::{
    download_all_handler, download_archive_handler, download_image_handler, health_handler,
    home_handler, image_group_handler, landing_handler, mime_for_extension, AppState,
    ErrorResponse, GallerySettings, HealthResponse, ImageGroupPathParams,
};
pub use routes::{create_router, RouterConfig};
