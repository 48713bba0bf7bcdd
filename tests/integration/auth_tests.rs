//! Session guard and login flow tests.

use std::time::Duration;

use axum::http::StatusCode;

use super::test_utils::{
    body_string, location, login_form, session_cookie, TestGallery, TEST_PASSWORD, TEST_USER,
};

// =============================================================================
// Guard
// =============================================================================

#[tokio::test]
async fn test_unauthenticated_page_redirects_to_login() {
    let gallery = TestGallery::new(3);

    for path in ["/", "/home", "/download-all", "/image/image_group_0"] {
        let response = gallery.get(path, None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "path {}", path);
        assert_eq!(location(&response), Some("/login"), "path {}", path);
    }
}

#[tokio::test]
async fn test_malformed_page_is_not_remembered() {
    let gallery = TestGallery::new(3);

    let response = gallery.get("/image/image_group_abc", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(session_cookie(&response).is_none());

    let response = gallery.get("/home", None).await;
    let cookie = session_cookie(&response).unwrap();

    // Not a gallery page, so it must not replace the remembered /home
    let response = gallery.get("/image/image_group_abc", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = gallery
        .post_form("/login", &login_form(TEST_USER, TEST_PASSWORD), Some(&cookie))
        .await;
    assert_eq!(location(&response), Some("/home"));
}

#[tokio::test]
async fn test_login_page_is_public() {
    let gallery = TestGallery::new(3);

    let response = gallery.get("/login", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    // Nothing stored for this client yet, so no cookie is issued
    assert!(session_cookie(&response).is_none());

    let body = body_string(response).await;
    assert!(body.contains(r#"action="/login""#));
    assert!(!body.contains("Wrong username or password"));
}

#[tokio::test]
async fn test_health_is_public() {
    let gallery = TestGallery::new(125);

    let response = gallery.get("/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["images"], 125);
    assert_eq!(json["pages"], 3);
}

// =============================================================================
// Login
// =============================================================================

#[tokio::test]
async fn test_login_returns_to_requested_page() {
    let gallery = TestGallery::new(3);

    // The guard remembers /home and hands out a cookie to carry it
    let response = gallery.get("/home", None).await;
    assert_eq!(location(&response), Some("/login"));
    let cookie = session_cookie(&response).expect("guard should issue a session cookie");

    let response = gallery
        .post_form("/login", &login_form(TEST_USER, TEST_PASSWORD), Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/home"));

    let response = gallery.get("/home", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_without_referrer_lands_on_root() {
    let gallery = TestGallery::new(3);
    let cookie = gallery.login().await;

    let response = gallery.get("/", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains(&format!("Hello {}!", TEST_USER)));
}

#[tokio::test]
async fn test_login_page_redirects_when_authenticated() {
    let gallery = TestGallery::new(3);
    let cookie = gallery.login().await;

    let response = gallery.get("/login", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/"));
}

#[tokio::test]
async fn test_wrong_password_leaves_session_unauthenticated() {
    let gallery = TestGallery::new(3);

    let response = gallery.get("/home", None).await;
    let cookie = session_cookie(&response).unwrap();

    let response = gallery
        .post_form("/login", &login_form(TEST_USER, "wrong"), Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/login?error=1"));

    let response = gallery.get("/login?error=1", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response)
        .await
        .contains("Wrong username or password"));

    let response = gallery.get("/home", Some(&cookie)).await;
    assert_eq!(location(&response), Some("/login"));
}

#[tokio::test]
async fn test_unknown_user_is_rejected() {
    let gallery = TestGallery::new(3);

    let response = gallery
        .post_form("/login", &login_form("stranger", TEST_PASSWORD), None)
        .await;
    assert_eq!(location(&response), Some("/login?error=1"));
    assert!(session_cookie(&response).is_none());
}

// =============================================================================
// Logout and cookies
// =============================================================================

#[tokio::test]
async fn test_logout_clears_session() {
    let gallery = TestGallery::new(3);
    let cookie = gallery.login().await;

    let response = gallery.post_form("/logout", "", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/login"));

    // The old cookie still verifies but its session is gone
    let response = gallery.get("/home", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/login"));
}

#[tokio::test]
async fn test_logout_via_get() {
    let gallery = TestGallery::new(3);
    let cookie = gallery.login().await;

    let response = gallery.get("/logout", Some(&cookie)).await;
    assert_eq!(location(&response), Some("/login"));

    let response = gallery.get("/", Some(&cookie)).await;
    assert_eq!(location(&response), Some("/login"));
}

#[tokio::test]
async fn test_tampered_cookie_is_ignored() {
    let gallery = TestGallery::new(3);
    let cookie = gallery.login().await;

    let (name_and_id, signature) = cookie.rsplit_once('.').unwrap();
    let flipped = if signature.starts_with('0') { "1" } else { "0" };
    let tampered = format!("{}.{}{}", name_and_id, flipped, &signature[1..]);

    let response = gallery.get("/home", Some(&tampered)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/login"));

    // A fresh session was issued in place of the rejected one
    let replacement = session_cookie(&response).unwrap();
    assert_ne!(replacement, cookie);
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let gallery = TestGallery::new(3);
    let cookie = gallery.login().await;

    let response = gallery.get("/home", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = gallery.get("/home", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

// =============================================================================
// Session lifetime
// =============================================================================

#[tokio::test]
async fn test_idle_session_expires() {
    let gallery = TestGallery::with_config(3, |config| {
        config.with_session_limits(Duration::from_millis(100), 100)
    });
    let cookie = gallery.login().await;

    let response = gallery.get("/home", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);

    tokio::time::sleep(Duration::from_millis(250)).await;

    let response = gallery.get("/home", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/login"));
}

#[tokio::test]
async fn test_anonymous_flood_keeps_logged_in_session() {
    let gallery = TestGallery::with_config(3, |config| {
        config.with_session_limits(Duration::from_secs(3600), 8)
    });
    let cookie = gallery.login().await;

    // Each cookieless page hit stores a referrer for a new session
    for _ in 0..200 {
        let response = gallery.get("/", None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }

    let response = gallery.get("/home", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
}
