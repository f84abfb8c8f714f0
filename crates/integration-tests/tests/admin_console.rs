//! Integration tests for the admin console surface: login, bearer token
//! guards and image uploads.

use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use serde_json::{Value, json};

use goatique_integration_tests::{ADMIN_PASSWORD, TestContext};

const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x01];

/// Attempt a login, returning the raw response.
async fn login(ctx: &TestContext, body: &Value) -> reqwest::Response {
    ctx.client
        .post(ctx.url("/api/admin/login"))
        .json(body)
        .send()
        .await
        .expect("Failed to send login")
}

// ============================================================================
// Login Tests
// ============================================================================

#[tokio::test]
async fn test_login_issues_a_working_token() {
    let ctx = TestContext::new().await;
    ctx.provision_admin().await;

    let resp = login(&ctx, &json!({"username": "admin", "password": ADMIN_PASSWORD})).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse login response");
    assert_eq!(body["success"], json!(true));
    let token = body["token"].as_str().expect("Login response missing token");

    let resp = ctx
        .client
        .get(ctx.url("/api/orders"))
        .bearer_auth(token)
        .send()
        .await
        .expect("Failed to list orders");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let ctx = TestContext::new().await;
    ctx.provision_admin().await;

    // Wrong password and unknown user read the same from outside.
    let resp = login(&ctx, &json!({"username": "admin", "password": "wrong"})).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = resp.json().await.expect("Failed to parse error");
    assert_eq!(body["error"], "Invalid credentials");

    let resp = login(&ctx, &json!({"username": "ghost", "password": ADMIN_PASSWORD})).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = resp.json().await.expect("Failed to parse error");
    assert_eq!(body["error"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_username_defaults_to_admin() {
    let ctx = TestContext::new().await;
    ctx.provision_admin().await;

    let resp = login(&ctx, &json!({"password": ADMIN_PASSWORD})).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = login(&ctx, &json!({"username": "", "password": ADMIN_PASSWORD})).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

// ============================================================================
// Token Guard Tests
// ============================================================================

#[tokio::test]
async fn test_admin_routes_reject_bad_tokens() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .get(ctx.url("/api/orders"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = resp.json().await.expect("Failed to parse error");
    assert_eq!(body["error"], "Missing authorization header");

    let resp = ctx
        .client
        .get(ctx.url("/api/orders"))
        .header("authorization", "Basic cGlnZW9u")
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = resp.json().await.expect("Failed to parse error");
    assert_eq!(body["error"], "Invalid authorization header");

    let resp = ctx
        .client
        .get(ctx.url("/api/orders"))
        .bearer_auth("not-a-jwt")
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = resp.json().await.expect("Failed to parse error");
    assert_eq!(body["error"], "Invalid token");
}

// ============================================================================
// Upload Tests
// ============================================================================

#[tokio::test]
async fn test_upload_stores_file_and_serves_it() {
    let ctx = TestContext::new().await;
    let token = ctx.admin_token().await;

    let part = Part::bytes(PNG_BYTES.to_vec()).file_name("goat photo.png");
    let resp = ctx
        .client
        .post(ctx.url("/api/upload"))
        .bearer_auth(&token)
        .multipart(Form::new().part("image", part))
        .send()
        .await
        .expect("Failed to upload");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse upload response");
    let url = body["url"].as_str().expect("Upload response missing url");
    assert!(url.contains("/uploads/"), "Unexpected upload url: {url}");

    let stored_name = url.rsplit('/').next().expect("Upload url has no file name");
    assert!(stored_name.ends_with("goat_photo.png"));

    let on_disk = tokio::fs::read(ctx.upload_dir.join(stored_name))
        .await
        .expect("Uploaded file missing on disk");
    assert_eq!(on_disk, PNG_BYTES);

    let resp = ctx
        .client
        .get(ctx.url(&format!("/uploads/{stored_name}")))
        .send()
        .await
        .expect("Failed to fetch upload");
    assert_eq!(resp.status(), StatusCode::OK);
    let served = resp.bytes().await.expect("Failed to read upload body");
    assert_eq!(served.as_ref(), PNG_BYTES);
}

#[tokio::test]
async fn test_upload_requires_admin() {
    let ctx = TestContext::new().await;

    let part = Part::bytes(PNG_BYTES.to_vec()).file_name("goat.png");
    let resp = ctx
        .client
        .post(ctx.url("/api/upload"))
        .multipart(Form::new().part("image", part))
        .send()
        .await
        .expect("Failed to send upload");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_upload_without_image_field_is_rejected() {
    let ctx = TestContext::new().await;
    let token = ctx.admin_token().await;

    let part = Part::bytes(PNG_BYTES.to_vec()).file_name("goat.png");
    let resp = ctx
        .client
        .post(ctx.url("/api/upload"))
        .bearer_auth(&token)
        .multipart(Form::new().part("document", part))
        .send()
        .await
        .expect("Failed to send upload");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = resp.json().await.expect("Failed to parse error");
    assert_eq!(body["error"], "No file uploaded");
}
