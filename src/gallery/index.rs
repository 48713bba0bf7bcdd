//! Image index built from a directory listing.
//!
//! The index is constructed once before the server starts accepting requests
//! and never changes afterwards. A directory that changes on disk is only
//! picked up on restart.

use std::path::Path;

use rand::Rng;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::IndexError;

/// Identifier used when a filename has no run of four digits.
pub const DEFAULT_IMAGE_ID: &str = "0000";

// =============================================================================
// Image Record
// =============================================================================

/// A single image discovered in the compressed image directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    path: String,
    file_name: String,
    id: String,
}

impl ImageRecord {
    /// Create a record from a path string.
    ///
    /// The identifier is derived from the file name component, not the
    /// directory part of the path.
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let file_name = Path::new(&path)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.clone());
        let id = extract_image_id(&file_name);

        Self {
            path,
            file_name,
            id,
        }
    }

    /// Full path as discovered on disk.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Final path component, used to build asset URLs.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Four-digit display identifier. Not unique.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Numeric value of the identifier.
    pub fn numeric_id(&self) -> u32 {
        // extract_image_id only ever yields four ASCII digits
        self.id.parse().unwrap_or(0)
    }
}

/// Return the first run of four consecutive ASCII digits in `input`.
///
/// Falls back to [`DEFAULT_IMAGE_ID`] when no such run exists. A longer run
/// of digits yields its first four.
///
/// # Example
///
/// ```
/// use photo_gallery::gallery::extract_image_id;
///
/// assert_eq!(extract_image_id("IMG_0042.jpg"), "0042");
/// assert_eq!(extract_image_id("holiday.jpg"), "0000");
/// ```
pub fn extract_image_id(input: &str) -> String {
    input
        .as_bytes()
        .windows(4)
        .find(|window| window.iter().all(u8::is_ascii_digit))
        .and_then(|window| std::str::from_utf8(window).ok())
        .unwrap_or(DEFAULT_IMAGE_ID)
        .to_string()
}

// =============================================================================
// Image Index
// =============================================================================

/// Immutable, lexicographically sorted list of images.
#[derive(Debug, Clone, Default)]
pub struct ImageIndex {
    records: Vec<ImageRecord>,
}

impl ImageIndex {
    /// Build the index by listing `dir` for files with the given extension.
    ///
    /// Only direct children of `dir` are considered. The extension match is
    /// ASCII case-insensitive. Records are sorted by path ascending.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Io`] if the directory cannot be listed.
    pub fn build(dir: impl AsRef<Path>, extension: &str) -> Result<Self, IndexError> {
        let dir = dir.as_ref();
        let mut paths = Vec::new();

        for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true) {
            let entry = entry.map_err(|e| IndexError::Io {
                path: dir.to_path_buf(),
                message: e.to_string(),
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let matches = entry
                .path()
                .extension()
                .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(extension))
                .unwrap_or(false);
            if !matches {
                debug!(path = %entry.path().display(), "Skipping non-image file");
                continue;
            }

            // Asset URLs are built from the name, so it must be valid UTF-8
            match entry.path().to_str() {
                Some(path) => paths.push(path.to_string()),
                None => debug!(path = %entry.path().display(), "Skipping non-UTF-8 file name"),
            }
        }

        let index = Self::from_paths(paths);
        info!(
            dir = %dir.display(),
            images = index.len(),
            "Built image index"
        );
        Ok(index)
    }

    /// Build an index from an arbitrary set of paths, sorting them.
    pub fn from_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        let mut paths: Vec<String> = paths.into_iter().map(Into::into).collect();
        paths.sort();

        Self {
            records: paths.into_iter().map(ImageRecord::new).collect(),
        }
    }

    /// Number of images in the index.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the index holds no images.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in canonical order.
    pub fn records(&self) -> &[ImageRecord] {
        &self.records
    }

    /// Pick a uniformly random record, or `None` for an empty index.
    pub fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&ImageRecord> {
        if self.records.is_empty() {
            return None;
        }
        self.records.get(rng.gen_range(0..self.records.len()))
    }
}
