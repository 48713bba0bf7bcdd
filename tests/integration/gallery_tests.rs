//! Gallery page and pagination tests.

use axum::http::StatusCode;

use super::test_utils::{body_string, TestGallery};

#[tokio::test]
async fn test_home_lists_one_button_per_page() {
    let gallery = TestGallery::new(125);
    let cookie = gallery.login().await;

    let response = gallery.get("/home", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    for n in 0..3 {
        assert!(body.contains(&format!(r#"href="/image/image_group_{}""#, n)));
    }
    assert!(!body.contains("/image/image_group_3"));
    assert!(body.contains(r#"href="/download-all""#));
}

#[tokio::test]
async fn test_empty_gallery_has_no_pages() {
    let gallery = TestGallery::new(0);
    let cookie = gallery.login().await;

    let body = body_string(gallery.get("/home", Some(&cookie)).await).await;
    assert!(!body.contains("/image/image_group_"));

    let response = gallery.get("/image/image_group_0", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_pages_cover_every_image_once() {
    let gallery = TestGallery::new(125);
    let cookie = gallery.login().await;

    let mut seen = Vec::new();
    for n in 0..3 {
        let response = gallery
            .get(&format!("/image/image_group_{}", n), Some(&cookie))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        seen.extend(
            body.match_indices("ID: ")
                .map(|(i, _)| body[i + 4..i + 8].to_string()),
        );
    }

    seen.sort();
    let expected: Vec<String> = (1..=125).map(|id| format!("{:04}", id)).collect();
    assert_eq!(seen, expected);
}

#[tokio::test]
async fn test_last_page_holds_the_remainder() {
    let gallery = TestGallery::new(125);
    let cookie = gallery.login().await;

    let body = body_string(gallery.get("/image/image_group_2", Some(&cookie)).await).await;
    assert_eq!(body.matches("ID: ").count(), 5);
    for id in 121..=125 {
        assert!(body.contains(&format!("ID: {:04}", id)));
    }
}

#[tokio::test]
async fn test_page_is_ordered_by_bucket() {
    let gallery = TestGallery::new(6);
    let cookie = gallery.login().await;

    let body = body_string(gallery.get("/image/image_group_0", Some(&cookie)).await).await;
    let order: Vec<&str> = body
        .match_indices("ID: ")
        .map(|(i, _)| &body[i + 4..i + 8])
        .collect();
    assert_eq!(order, ["0003", "0006", "0001", "0004", "0002", "0005"]);
}

#[tokio::test]
async fn test_navigation_links() {
    let gallery = TestGallery::new(125);
    let cookie = gallery.login().await;

    let first = body_string(gallery.get("/image/image_group_0", Some(&cookie)).await).await;
    assert!(first.contains(r#"href="/home""#));
    assert!(first.contains(r#"href="/image/image_group_1""#));

    let middle = body_string(gallery.get("/image/image_group_1", Some(&cookie)).await).await;
    assert!(middle.contains(r#"href="/image/image_group_0""#));
    assert!(middle.contains(r#"href="/image/image_group_2""#));

    let last = body_string(gallery.get("/image/image_group_2", Some(&cookie)).await).await;
    assert!(last.contains(r#"href="/image/image_group_1""#));
    assert!(last.contains(r#"href="/home""#));
    assert!(!last.contains("/image/image_group_3"));
}

#[tokio::test]
async fn test_out_of_range_page_is_not_found() {
    let gallery = TestGallery::new(125);
    let cookie = gallery.login().await;

    let response = gallery.get("/image/image_group_3", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(json["error"], "invalid_page");
    assert_eq!(json["status"], 404);
}

#[tokio::test]
async fn test_malformed_page_is_bad_request() {
    let gallery = TestGallery::new(125);
    let cookie = gallery.login().await;

    for path in ["/image/image_group_x", "/image/image_group_-1", "/image/other_1"] {
        let response = gallery.get(path, Some(&cookie)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "path {}", path);
    }
}

#[tokio::test]
async fn test_download_all_page_shows_archive_and_preview() {
    let gallery = TestGallery::new(4);
    let cookie = gallery.login().await;

    let response = gallery.get("/download-all", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains(r#"href="/download-all/photos.zip""#));
    assert!(body.contains(r#"class="preview" src="/all_photos_compress/IMG_000"#));
}

#[tokio::test]
async fn test_download_all_page_without_images() {
    let gallery = TestGallery::new(0);
    let cookie = gallery.login().await;

    let body = body_string(gallery.get("/download-all", Some(&cookie)).await).await;
    assert!(body.contains(r#"href="/download-all/photos.zip""#));
    assert!(!body.contains(r#"class="preview""#));
}

#[tokio::test]
async fn test_custom_page_size_and_title() {
    let gallery = TestGallery::with_config(10, |config| {
        config.with_page_size(4).with_columns(2).with_title("Reunion")
    });
    let cookie = gallery.login().await;

    let home = body_string(gallery.get("/home", Some(&cookie)).await).await;
    assert!(home.contains("<h1>Reunion</h1>"));
    assert!(home.contains("/image/image_group_2"));
    assert!(!home.contains("/image/image_group_3"));

    let page = body_string(gallery.get("/image/image_group_1", Some(&cookie)).await).await;
    assert!(page.contains("columns: 2;"));
    assert_eq!(page.matches("ID: ").count(), 4);
}
