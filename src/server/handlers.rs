//! HTTP request handlers for the gallery pages and downloads.
//!
//! # Endpoints
//!
//! - `GET /` - Landing page
//! - `GET /home` - Gallery index
//! - `GET /image/image_group_{page}` - One page of images
//! - `GET /download-all` - Bulk download page
//! - `GET /download/{image_id}` - Download one original
//! - `GET /download-all/{archive}` - Download the pre-built archive
//! - `GET /health` - Health check endpoint

use std::path::{Path as FsPath, PathBuf};
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
    Extension, Json,
};
use http::{header, StatusCode};
use serde::{Deserialize, Serialize};
use tokio_util::io::ReaderStream;
use tracing::{debug, error, warn};

use crate::error::{AssetError, PaginationError};
use crate::gallery::{ImageIndex, Paginator};
use crate::paths;
use crate::session::{CredentialStore, RouteTable, SessionSigner, SessionStore};

use super::auth::CurrentSession;
use super::views;

// =============================================================================
// Application State
// =============================================================================

/// Presentation and file-location settings shared by the handlers.
#[derive(Debug, Clone)]
pub struct GallerySettings {
    /// Title shown on every page
    pub title: String,

    /// Image grid column count
    pub columns: u8,

    /// Directory of full-resolution originals
    pub originals_dir: PathBuf,

    /// Image file extension, without a leading dot
    pub extension: String,

    /// Archive file name inside `originals_dir`
    pub archive_name: String,

    /// Cache-Control max-age in seconds for downloads
    pub cache_max_age: u32,
}

/// Shared application state.
///
/// The index and credentials are built once at startup and only read
/// afterwards. Sessions are the only mutable state.
#[derive(Clone)]
pub struct AppState {
    /// Sorted image index
    pub index: Arc<ImageIndex>,

    /// Page slicing
    pub paginator: Paginator,

    /// Username to password mapping
    pub credentials: CredentialStore,

    /// Per-client sessions
    pub sessions: SessionStore,

    /// Session cookie signer
    pub signer: SessionSigner,

    /// Path classification for the session guard
    pub routes: Arc<RouteTable>,

    /// Presentation and file settings
    pub settings: Arc<GallerySettings>,
}

// =============================================================================
// Request Parameters
// =============================================================================

/// Path parameters for gallery page requests.
///
/// Extracted from: `/image/{group}` where group is `image_group_{page}`
#[derive(Debug, Deserialize)]
pub struct ImageGroupPathParams {
    pub group: String,
}

impl ImageGroupPathParams {
    /// Parse the page number from the group segment.
    pub fn page(&self) -> Result<usize, PaginationError> {
        self.group
            .strip_prefix("image_group_")
            .filter(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|n| n.parse().ok())
            .ok_or_else(|| PaginationError::MalformedPage(self.group.clone()))
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// JSON error response returned for all error conditions.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error type identifier (e.g., "not_found", "invalid_page")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code (included for convenience)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl ErrorResponse {
    /// Create a new error response with status code.
    pub fn with_status(
        error: impl Into<String>,
        message: impl Into<String>,
        status: StatusCode,
    ) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status: Some(status.as_u16()),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,

    /// Number of indexed images
    pub images: usize,

    /// Number of gallery pages
    pub pages: usize,
}

// =============================================================================
// Error Mapping
// =============================================================================

/// Log an error response at a level matching its status, then build it.
fn error_response(status: StatusCode, error_type: &str, message: String) -> Response {
    if status.is_server_error() {
        error!(
            error_type = error_type,
            status = status.as_u16(),
            "Server error: {}",
            message
        );
    } else if status == StatusCode::NOT_FOUND {
        debug!(
            error_type = error_type,
            status = status.as_u16(),
            "Resource not found: {}",
            message
        );
    } else {
        warn!(
            error_type = error_type,
            status = status.as_u16(),
            "Client error: {}",
            message
        );
    }

    let body = ErrorResponse::with_status(error_type, message, status);
    (status, Json(body)).into_response()
}

/// Convert PaginationError to HTTP response.
///
/// Pages outside the gallery are never clamped: a link that points past the
/// last page surfaces as a 404 rather than silently showing another page.
impl IntoResponse for PaginationError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            PaginationError::InvalidPage { .. } => (StatusCode::NOT_FOUND, "invalid_page"),
            PaginationError::MalformedPage(_) => (StatusCode::BAD_REQUEST, "malformed_page"),
        };
        error_response(status, error_type, self.to_string())
    }
}

/// Convert AssetError to HTTP response.
impl IntoResponse for AssetError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            AssetError::InvalidImageId(_) => (StatusCode::BAD_REQUEST, "invalid_image_id"),
            AssetError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AssetError::Io { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "io_error"),
        };
        error_response(status, error_type, self.to_string())
    }
}

// =============================================================================
// Page Handlers
// =============================================================================

/// Greet the logged-in user.
///
/// # Endpoint
///
/// `GET /`
pub async fn landing_handler(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentSession>,
) -> Html<String> {
    Html(views::landing_page(
        &state.settings.title,
        &current.session.username,
    ))
}

/// List one button per gallery page.
///
/// # Endpoint
///
/// `GET /home`
pub async fn home_handler(State(state): State<AppState>) -> Html<String> {
    let page_count = state.paginator.page_count(&state.index);
    Html(views::home_page(&state.settings.title, page_count))
}

/// Render one page of images with navigation.
///
/// # Endpoint
///
/// `GET /image/image_group_{page}`
///
/// # Response
///
/// - `200 OK`: HTML page
/// - `400 Bad Request`: page segment is not a non-negative integer
/// - `404 Not Found`: page is outside `[0, page_count)`
pub async fn image_group_handler(
    State(state): State<AppState>,
    Path(params): Path<ImageGroupPathParams>,
) -> Result<Html<String>, PaginationError> {
    let number = params.page()?;
    let page = state.paginator.page(&state.index, number)?;

    Ok(Html(views::image_group_page(
        &state.settings.title,
        &page,
        state.settings.columns,
    )))
}

/// Show a random preview and the bulk download control.
///
/// # Endpoint
///
/// `GET /download-all`
pub async fn download_all_handler(State(state): State<AppState>) -> Html<String> {
    let preview = state.index.random(&mut rand::thread_rng());
    let archive_href = paths::download_archive(&state.settings.archive_name);

    Html(views::download_all_page(
        &state.settings.title,
        &archive_href,
        preview,
    ))
}

// =============================================================================
// Download Handlers
// =============================================================================

/// Serve the full-resolution original of one image as an attachment.
///
/// # Endpoint
///
/// `GET /download/{image_id}`
///
/// # Response
///
/// - `200 OK`: the file, `Content-Disposition: attachment`
/// - `400 Bad Request`: id is not four ASCII digits
/// - `404 Not Found`: no original for this id
pub async fn download_image_handler(
    State(state): State<AppState>,
    Path(image_id): Path<String>,
) -> Result<Response, AssetError> {
    if image_id.len() != 4 || !image_id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AssetError::InvalidImageId(image_id));
    }

    let file_name = format!("photo_{}.{}", image_id, state.settings.extension);
    let path = state.settings.originals_dir.join(&file_name);
    let content_type = mime_for_extension(&state.settings.extension);

    serve_attachment(&path, &file_name, content_type, state.settings.cache_max_age).await
}

/// Serve the pre-built archive of all originals.
///
/// # Endpoint
///
/// `GET /download-all/{archive}`
pub async fn download_archive_handler(
    State(state): State<AppState>,
    Path(archive): Path<String>,
) -> Result<Response, AssetError> {
    if archive != state.settings.archive_name {
        return Err(AssetError::NotFound(archive));
    }

    let path = state.settings.originals_dir.join(&archive);
    serve_attachment(&path, &archive, "application/zip", state.settings.cache_max_age).await
}

/// Stream a file from disk as a download.
async fn serve_attachment(
    path: &FsPath,
    file_name: &str,
    content_type: &'static str,
    cache_max_age: u32,
) -> Result<Response, AssetError> {
    let file = tokio::fs::File::open(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            AssetError::NotFound(file_name.to_string())
        } else {
            AssetError::Io {
                path: path.display().to_string(),
                message: e.to_string(),
            }
        }
    })?;
    let length = file
        .metadata()
        .await
        .map_err(|e| AssetError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?
        .len();

    debug!(path = %path.display(), bytes = length, "Serving download");

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, length.to_string())
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file_name),
        )
        .header(
            header::CACHE_CONTROL,
            format!("private, max-age={}", cache_max_age),
        )
        .body(Body::from_stream(ReaderStream::new(file)))
        .map_err(|e| AssetError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    Ok(response)
}

/// MIME type for an image file extension.
pub fn mime_for_extension(extension: &str) -> &'static str {
    match extension.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

// =============================================================================
// Health
// =============================================================================

/// Handle health check requests.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response
///
/// `200 OK` with JSON body:
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "images": 125,
///   "pages": 3
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        images: state.index.len(),
        pages: state.paginator.page_count(&state.index),
    })
}

// =============================================================================
// Tests
// =============================================================================
