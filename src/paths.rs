//! URL paths served by the gallery.

/// Greeting page with the logout control.
pub const LANDING: &str = "/";

/// Login form. The only page reachable without a session.
pub const LOGIN: &str = "/login";

/// Clears the session.
pub const LOGOUT: &str = "/logout";

/// Gallery index listing one button per page.
pub const HOME: &str = "/home";

/// Bulk download page.
pub const DOWNLOAD_ALL: &str = "/download-all";

/// Prefix of gallery page paths; the page number follows directly.
pub const IMAGE_GROUP_PREFIX: &str = "/image/image_group_";

/// Per-image download endpoint prefix.
pub const DOWNLOAD_PREFIX: &str = "/download";

/// Static mount for full-resolution originals.
pub const ORIGINALS_MOUNT: &str = "/all_photos";

/// Static mount for compressed display copies.
pub const COMPRESSED_MOUNT: &str = "/all_photos_compress";

/// Health check.
pub const HEALTH: &str = "/health";

/// Path of gallery page `page`.
pub fn image_group(page: usize) -> String {
    format!("{}{}", IMAGE_GROUP_PREFIX, page)
}

/// Path that downloads the original of image `image_id`.
pub fn download_image(image_id: &str) -> String {
    format!("{}/{}", DOWNLOAD_PREFIX, image_id)
}

/// Path that downloads the pre-built archive.
pub fn download_archive(archive_name: &str) -> String {
    format!("{}/{}", DOWNLOAD_ALL, urlencoding::encode(archive_name))
}

/// URL of a compressed display copy.
pub fn compressed_image(file_name: &str) -> String {
    format!("{}/{}", COMPRESSED_MOUNT, urlencoding::encode(file_name))
}
