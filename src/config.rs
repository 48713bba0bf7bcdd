//! Configuration management for the photo gallery.
//!
//! This module provides a configuration system that supports:
//! - Command-line arguments via clap
//! - Environment variables with `GALLERY_` prefix
//! - Sensible defaults for all optional settings
//!
//! # Example
//!
//! ```ignore
//! use clap::Parser;
//! use photo_gallery::config::{Cli, Command};
//!
//! let cli = Cli::parse();
//! match cli.command {
//!     Command::Serve(config) => println!("Listening on {}", config.bind_address()),
//!     Command::Check(config) => println!("Checking {}", config.compressed_dir.display()),
//! }
//! ```
//!
//! # Environment Variables
//!
//! - `GALLERY_HOST` - Server bind address (default: 0.0.0.0)
//! - `GALLERY_PORT` - Server port (default: 9000)
//! - `GALLERY_ORIGINALS_DIR` - Full-resolution originals (default: images/all_photos)
//! - `GALLERY_COMPRESSED_DIR` - Compressed display copies (default: images/all_photos_compress)
//! - `GALLERY_EXTENSION` - Image file extension (default: jpg)
//! - `GALLERY_ARCHIVE_NAME` - Pre-built archive in the originals dir (default: photos.zip)
//! - `GALLERY_PAGE_SIZE` - Images per page (default: 60)
//! - `GALLERY_COLUMNS` - Grid columns (default: 3)
//! - `GALLERY_CREDENTIALS` - JSON file mapping usernames to passwords (required)
//! - `GALLERY_SESSION_SECRET` - Secret for signing session cookies (required)
//! - `GALLERY_TITLE` - Page title (default: Photo Album)
//! - `GALLERY_CACHE_MAX_AGE` - Cache-Control max-age for downloads (default: 3600)
//! - `GALLERY_PROTECT_ASSETS` - Require login for static files and downloads (default: true)
//! - `GALLERY_SESSION_TTL` - Idle seconds before a session expires (default: 86400)
//! - `GALLERY_MAX_SESSIONS` - Upper bound on stored sessions (default: 10000)

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::gallery::DEFAULT_PAGE_SIZE;
use crate::session::{DEFAULT_MAX_SESSIONS, DEFAULT_SESSION_TTL};

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 9000;

/// Default directory of full-resolution originals.
pub const DEFAULT_ORIGINALS_DIR: &str = "images/all_photos";

/// Default directory of compressed display copies.
pub const DEFAULT_COMPRESSED_DIR: &str = "images/all_photos_compress";

/// Default image file extension.
pub const DEFAULT_EXTENSION: &str = "jpg";

/// Default name of the pre-built archive.
pub const DEFAULT_ARCHIVE_NAME: &str = "photos.zip";

/// Default number of grid columns.
pub const DEFAULT_COLUMNS: u8 = 3;

/// Largest supported number of grid columns.
pub const MAX_COLUMNS: u8 = 12;

/// Default page title.
pub const DEFAULT_TITLE: &str = "Photo Album";

/// Default HTTP cache max-age in seconds (1 hour).
pub const DEFAULT_CACHE_MAX_AGE: u32 = 3600;

// =============================================================================
// CLI Arguments
// =============================================================================

/// Photo Gallery - a small self-hosted photo album.
#[derive(Parser, Debug, Clone)]
#[command(name = "photo-gallery")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Start the gallery server.
    Serve(Config),

    /// Validate configuration and report what would be served.
    Check(Config),
}

/// Gallery configuration shared by all commands.
#[derive(Args, Debug, Clone)]
pub struct Config {
    // =========================================================================
    // Server Configuration
    // =========================================================================
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "GALLERY_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "GALLERY_PORT")]
    pub port: u16,

    // =========================================================================
    // Image Configuration
    // =========================================================================
    /// Directory of full-resolution originals (also holds the archive).
    #[arg(long, default_value = DEFAULT_ORIGINALS_DIR, env = "GALLERY_ORIGINALS_DIR")]
    pub originals_dir: PathBuf,

    /// Directory of compressed display copies. The gallery index is built from it.
    #[arg(long, default_value = DEFAULT_COMPRESSED_DIR, env = "GALLERY_COMPRESSED_DIR")]
    pub compressed_dir: PathBuf,

    /// File extension of gallery images.
    #[arg(long, default_value = DEFAULT_EXTENSION, env = "GALLERY_EXTENSION")]
    pub extension: String,

    /// File name of the pre-built archive inside the originals directory.
    #[arg(long, default_value = DEFAULT_ARCHIVE_NAME, env = "GALLERY_ARCHIVE_NAME")]
    pub archive_name: String,

    // =========================================================================
    // Layout Configuration
    // =========================================================================
    /// Number of images per gallery page.
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE, env = "GALLERY_PAGE_SIZE")]
    pub page_size: usize,

    /// Number of columns in the image grid.
    #[arg(long, default_value_t = DEFAULT_COLUMNS, env = "GALLERY_COLUMNS")]
    pub columns: u8,

    /// Title shown on the gallery pages.
    #[arg(long, default_value = DEFAULT_TITLE, env = "GALLERY_TITLE")]
    pub title: String,

    /// HTTP Cache-Control max-age in seconds for downloads.
    #[arg(long, default_value_t = DEFAULT_CACHE_MAX_AGE, env = "GALLERY_CACHE_MAX_AGE")]
    pub cache_max_age: u32,

    // =========================================================================
    // Authentication Configuration
    // =========================================================================
    /// JSON file mapping usernames to passwords.
    #[arg(long, env = "GALLERY_CREDENTIALS")]
    pub credentials: PathBuf,

    /// Secret key for signing session cookies.
    #[arg(long, env = "GALLERY_SESSION_SECRET", hide_env_values = true)]
    pub session_secret: String,

    /// Require a login for static files and downloads, not only pages.
    #[arg(
        long,
        default_value_t = true,
        action = ArgAction::Set,
        env = "GALLERY_PROTECT_ASSETS"
    )]
    pub protect_assets: bool,

    /// Idle time in seconds after which a session expires.
    #[arg(long, default_value_t = DEFAULT_SESSION_TTL.as_secs(), env = "GALLERY_SESSION_TTL")]
    pub session_ttl: u64,

    /// Upper bound on stored sessions. Anonymous sessions are evicted first.
    #[arg(long, default_value_t = DEFAULT_MAX_SESSIONS, env = "GALLERY_MAX_SESSIONS")]
    pub max_sessions: usize,

    // =========================================================================
    // Logging Configuration
    // =========================================================================
    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.session_secret.is_empty() {
            return Err(
                "Session secret is empty. Set --session-secret or GALLERY_SESSION_SECRET"
                    .to_string(),
            );
        }

        if self.session_ttl == 0 {
            return Err("session_ttl must be greater than 0".to_string());
        }

        if self.max_sessions == 0 {
            return Err("max_sessions must be greater than 0".to_string());
        }

        if self.page_size == 0 {
            return Err("page_size must be greater than 0".to_string());
        }

        if self.columns == 0 || self.columns > MAX_COLUMNS {
            return Err(format!("columns must be between 1 and {}", MAX_COLUMNS));
        }

        let extension = self.extension();
        if extension.is_empty() || extension.contains(['/', '\\']) {
            return Err(format!("Invalid image extension: {:?}", self.extension));
        }

        if self.archive_name.is_empty() || self.archive_name.contains(['/', '\\']) {
            return Err(format!("Invalid archive name: {:?}", self.archive_name));
        }

        Ok(())
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Idle session lifetime.
    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl)
    }

    /// Image extension without a leading dot.
    pub fn extension(&self) -> &str {
        self.extension.trim_start_matches('.')
    }
}

// =============================================================================
// Tests
// =============================================================================
