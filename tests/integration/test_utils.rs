//! Shared fixtures for the integration tests.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use photo_gallery::{create_router, CredentialStore, ImageIndex, RouterConfig};

pub const TEST_SECRET: &str = "test-secret-key-for-session-signing";
pub const TEST_USER: &str = "guest";
pub const TEST_PASSWORD: &str = "correct horse";

/// Bytes written for every original, so downloads can be checked.
pub fn original_bytes(id: usize) -> Vec<u8> {
    format!("original-{:04}", id).into_bytes()
}

pub const ARCHIVE_BYTES: &[u8] = b"PK\x03\x04fake-archive";

/// A gallery on disk plus a router serving it.
pub struct TestGallery {
    pub dir: TempDir,
    pub router: Router,
}

impl TestGallery {
    /// Gallery with `count` images and default settings.
    pub fn new(count: usize) -> Self {
        Self::with_config(count, |config| config)
    }

    /// Gallery with `count` images and a customised router configuration.
    pub fn with_config<F>(count: usize, customise: F) -> Self
    where
        F: FnOnce(RouterConfig) -> RouterConfig,
    {
        let dir = tempfile::tempdir().unwrap();
        let originals = dir.path().join("all_photos");
        let compressed = dir.path().join("all_photos_compress");
        fs::create_dir_all(&originals).unwrap();
        fs::create_dir_all(&compressed).unwrap();

        for id in 1..=count {
            fs::write(compressed.join(format!("IMG_{:04}.jpg", id)), b"small").unwrap();
            fs::write(originals.join(format!("photo_{:04}.jpg", id)), original_bytes(id)).unwrap();
        }
        fs::write(originals.join("photos.zip"), ARCHIVE_BYTES).unwrap();

        let index = ImageIndex::build(&compressed, "jpg").unwrap();
        let credentials = CredentialStore::new(HashMap::from([(
            TEST_USER.to_string(),
            TEST_PASSWORD.to_string(),
        )]));
        let config = customise(
            RouterConfig::new(TEST_SECRET)
                .with_image_dirs(originals, compressed)
                .with_tracing(false),
        );

        Self {
            router: create_router(index, credentials, config),
            dir,
        }
    }

    pub fn originals_dir(&self) -> PathBuf {
        self.dir.path().join("all_photos")
    }

    /// Send a GET request, optionally carrying a session cookie.
    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.router
            .clone()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    /// Send a form-encoded POST request, optionally carrying a session cookie.
    pub async fn post_form(&self, uri: &str, form: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.router
            .clone()
            .oneshot(builder.body(Body::from(form.to_string())).unwrap())
            .await
            .unwrap()
    }

    /// Log in from a fresh client and return its session cookie.
    pub async fn login(&self) -> String {
        let response = self
            .post_form("/login", &login_form(TEST_USER, TEST_PASSWORD), None)
            .await;
        assert_eq!(location(&response), Some("/"));
        session_cookie(&response).expect("login should issue a session cookie")
    }
}

/// URL-encoded login form body.
pub fn login_form(username: &str, password: &str) -> String {
    format!(
        "username={}&password={}",
        urlencoding::encode(username),
        urlencoding::encode(password)
    )
}

/// The `name=value` part of the session cookie set by a response.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("gallery_session="))
        .and_then(|value| value.split(';').next())
        .map(str::to_string)
}

/// The redirect target of a response.
pub fn location(response: &Response<Body>) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
}

/// Collect a response body as UTF-8 text.
pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Collect a response body as raw bytes.
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}
