//! Router configuration for the photo gallery.
//!
//! This module defines the HTTP routes and applies the session middleware.
//!
//! # Route Structure
//!
//! ```text
//! /                              - Landing page (login required)
//! /login                         - Login form (public)
//! /logout                        - Clear the session (public)
//! /home                          - Gallery index (login required)
//! /image/image_group_{page}      - Gallery page (login required)
//! /download-all                  - Bulk download page (login required)
//! /download-all/{archive}        - Pre-built archive (asset)
//! /download/{image_id}           - One original (asset)
//! /all_photos/...                - Originals mount (asset)
//! /all_photos_compress/...       - Compressed mount (asset)
//! /health                        - Health check (public)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use photo_gallery::gallery::ImageIndex;
//! use photo_gallery::server::{create_router, RouterConfig};
//! use photo_gallery::session::CredentialStore;
//!
//! let index = ImageIndex::build("images/all_photos_compress", "jpg")?;
//! let credentials = CredentialStore::load("users.json")?;
//!
//! let config = RouterConfig::new("my-session-secret").with_page_size(60);
//! let router = create_router(index, credentials, config);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:9000").await?;
//! axum::serve(listener, router).await?;
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, routing::get, Router};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::auth::{login_page_handler, login_submit_handler, logout_handler, session_middleware};
use super::handlers::{
    download_all_handler, download_archive_handler, download_image_handler, health_handler,
    home_handler, image_group_handler, landing_handler, AppState, GallerySettings,
};
use crate::config::{
    DEFAULT_ARCHIVE_NAME, DEFAULT_CACHE_MAX_AGE, DEFAULT_COLUMNS, DEFAULT_COMPRESSED_DIR,
    DEFAULT_EXTENSION, DEFAULT_ORIGINALS_DIR, DEFAULT_TITLE,
};
use crate::gallery::{ImageIndex, Paginator, DEFAULT_PAGE_SIZE};
use crate::paths;
use crate::session::{
    CredentialStore, RouteTable, SessionSigner, SessionStore, DEFAULT_MAX_SESSIONS,
    DEFAULT_SESSION_TTL,
};

// =============================================================================
// Router Configuration
// =============================================================================

/// Configuration for the HTTP router.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Secret key for signing session cookies
    pub session_secret: String,

    /// Images per gallery page
    pub page_size: usize,

    /// Image grid column count
    pub columns: u8,

    /// Title shown on every page
    pub title: String,

    /// Directory of full-resolution originals and the archive
    pub originals_dir: PathBuf,

    /// Directory of compressed display copies
    pub compressed_dir: PathBuf,

    /// Image file extension, without a leading dot
    pub extension: String,

    /// Archive file name inside `originals_dir`
    pub archive_name: String,

    /// Cache-Control max-age in seconds for downloads
    pub cache_max_age: u32,

    /// Whether static files and downloads require a login
    pub protect_assets: bool,

    /// Idle time after which a session expires
    pub session_ttl: Duration,

    /// Upper bound on stored sessions
    pub max_sessions: usize,

    /// Whether to enable request tracing
    pub enable_tracing: bool,
}

impl RouterConfig {
    /// Create a new router configuration with the given session secret.
    ///
    /// By default:
    /// - 60 images per page in 3 columns
    /// - Images under `images/all_photos` and `images/all_photos_compress`
    /// - Static files and downloads require a login
    /// - Sessions expire after a day idle, at most 10000 are kept
    /// - Tracing is enabled
    pub fn new(session_secret: impl Into<String>) -> Self {
        Self {
            session_secret: session_secret.into(),
            page_size: DEFAULT_PAGE_SIZE,
            columns: DEFAULT_COLUMNS,
            title: DEFAULT_TITLE.to_string(),
            originals_dir: PathBuf::from(DEFAULT_ORIGINALS_DIR),
            compressed_dir: PathBuf::from(DEFAULT_COMPRESSED_DIR),
            extension: DEFAULT_EXTENSION.to_string(),
            archive_name: DEFAULT_ARCHIVE_NAME.to_string(),
            cache_max_age: DEFAULT_CACHE_MAX_AGE,
            protect_assets: true,
            session_ttl: DEFAULT_SESSION_TTL,
            max_sessions: DEFAULT_MAX_SESSIONS,
            enable_tracing: true,
        }
    }

    /// Set the number of images per page.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the number of grid columns.
    pub fn with_columns(mut self, columns: u8) -> Self {
        self.columns = columns;
        self
    }

    /// Set the page title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the originals and compressed image directories.
    pub fn with_image_dirs(
        mut self,
        originals_dir: impl Into<PathBuf>,
        compressed_dir: impl Into<PathBuf>,
    ) -> Self {
        self.originals_dir = originals_dir.into();
        self.compressed_dir = compressed_dir.into();
        self
    }

    /// Set the image file extension.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Set the archive file name.
    pub fn with_archive_name(mut self, archive_name: impl Into<String>) -> Self {
        self.archive_name = archive_name.into();
        self
    }

    /// Set the Cache-Control max-age in seconds for downloads.
    pub fn with_cache_max_age(mut self, seconds: u32) -> Self {
        self.cache_max_age = seconds;
        self
    }

    /// Require a login for static files and downloads, or not.
    pub fn with_protect_assets(mut self, enabled: bool) -> Self {
        self.protect_assets = enabled;
        self
    }

    /// Set the idle session TTL and the session capacity.
    pub fn with_session_limits(mut self, ttl: Duration, max_sessions: usize) -> Self {
        self.session_ttl = ttl;
        self.max_sessions = max_sessions;
        self
    }

    /// Enable or disable request tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.enable_tracing = enabled;
        self
    }
}

// =============================================================================
// Router Builder
// =============================================================================

/// Create the main application router.
///
/// # Arguments
///
/// * `index` - The image index built at startup
/// * `credentials` - The credential store loaded at startup
/// * `config` - Router configuration
///
/// # Returns
///
/// A configured Axum router ready to be served.
pub fn create_router(index: ImageIndex, credentials: CredentialStore, config: RouterConfig) -> Router {
    let state = build_state(index, credentials, &config);

    let router = Router::new()
        .route(paths::LANDING, get(landing_handler))
        .route(
            paths::LOGIN,
            get(login_page_handler).post(login_submit_handler),
        )
        .route(paths::LOGOUT, get(logout_handler).post(logout_handler))
        .route(paths::HOME, get(home_handler))
        // Uses {group} to capture "image_group_{page}"
        .route("/image/{group}", get(image_group_handler))
        .route(paths::DOWNLOAD_ALL, get(download_all_handler))
        .route("/download-all/{archive}", get(download_archive_handler))
        .route("/download/{image_id}", get(download_image_handler))
        .route(paths::HEALTH, get(health_handler))
        .nest_service(paths::ORIGINALS_MOUNT, ServeDir::new(&config.originals_dir))
        .nest_service(paths::COMPRESSED_MOUNT, ServeDir::new(&config.compressed_dir))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ))
        .with_state(state);

    if config.enable_tracing {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

fn build_state(index: ImageIndex, credentials: CredentialStore, config: &RouterConfig) -> AppState {
    AppState {
        index: Arc::new(index),
        paginator: Paginator::new(config.page_size),
        credentials,
        sessions: SessionStore::with_limits(config.session_ttl, config.max_sessions),
        signer: SessionSigner::new(&config.session_secret),
        routes: Arc::new(RouteTable::gallery(config.protect_assets)),
        settings: Arc::new(GallerySettings {
            title: config.title.clone(),
            columns: config.columns,
            originals_dir: config.originals_dir.clone(),
            extension: config.extension.trim_start_matches('.').to_string(),
            archive_name: config.archive_name.clone(),
            cache_max_age: config.cache_max_age,
        }),
    }
}

// =============================================================================
// Tests
// =============================================================================
