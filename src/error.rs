use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading the credential store at startup.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// The credentials file could not be read
    #[error("Failed to read credentials file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The credentials file is not a JSON object of username to password
    #[error("Malformed credentials file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// The credentials file contains no users
    #[error("Credentials file {0} defines no users")]
    Empty(PathBuf),
}

/// Errors that can occur while building the image index.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The image directory could not be listed
    #[error("Failed to list image directory {path}: {message}")]
    Io { path: PathBuf, message: String },
}

/// Errors produced by the pagination engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginationError {
    /// Requested page lies outside `[0, page_count)`
    #[error("Invalid page: {page} (gallery has {page_count} pages)")]
    InvalidPage { page: usize, page_count: usize },

    /// Page segment is not a non-negative integer
    #[error("Malformed page segment: {0:?}")]
    MalformedPage(String),
}

/// Errors that can occur when serving a download.
#[derive(Debug, Error)]
pub enum AssetError {
    /// Image identifier is not exactly four ASCII digits
    #[error("Invalid image id: {0:?} (expected four digits)")]
    InvalidImageId(String),

    /// The referenced file does not exist
    #[error("File not found: {0}")]
    NotFound(String),

    /// The file exists but could not be read
    #[error("I/O error reading {path}: {message}")]
    Io { path: String, message: String },
}
