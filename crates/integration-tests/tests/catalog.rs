//! Integration tests for the catalog: products, site content and blog
//! posts, including the admin guards on their write endpoints.

use reqwest::StatusCode;
use serde_json::{Value, json};

use goatique_integration_tests::TestContext;

/// Draft body for the reference soap.
fn soap_draft() -> Value {
    json!({
        "name": "Goat Milk & Saffron Soap",
        "slug": "goat-milk-saffron-soap",
        "description": "Luxurious handmade soap.",
        "price": 450.0,
        "stock": 100,
        "category": "Soaps",
        "images": ["https://example.com/soap.jpg"],
        "is_featured": true
    })
}

/// Create a product as admin, returning its id.
async fn create_product(ctx: &TestContext, token: &str, draft: &Value) -> i64 {
    let resp = ctx
        .client
        .post(ctx.url("/api/products"))
        .bearer_auth(token)
        .json(draft)
        .send()
        .await
        .expect("Failed to create product");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse create response");
    assert_eq!(body["success"], json!(true));
    body["id"].as_i64().expect("Create response missing id")
}

// ============================================================================
// Health Tests
// ============================================================================

#[tokio::test]
async fn test_health_endpoints() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .get(ctx.url("/health"))
        .send()
        .await
        .expect("Failed to check health");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.expect("Failed to read body"), "ok");

    let resp = ctx
        .client
        .get(ctx.url("/health/ready"))
        .send()
        .await
        .expect("Failed to check readiness");
    assert_eq!(resp.status(), StatusCode::OK);
}

// ============================================================================
// Product Tests
// ============================================================================

#[tokio::test]
async fn test_product_listing_starts_empty() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .get(ctx.url("/api/products"))
        .send()
        .await
        .expect("Failed to list products");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse listing");
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_product_create_and_fetch_by_slug() {
    let ctx = TestContext::new().await;
    let token = ctx.admin_token().await;

    let id = create_product(&ctx, &token, &soap_draft()).await;

    let resp = ctx
        .client
        .get(ctx.url("/api/products/goat-milk-saffron-soap"))
        .send()
        .await
        .expect("Failed to fetch product");
    assert_eq!(resp.status(), StatusCode::OK);

    let product: Value = resp.json().await.expect("Failed to parse product");
    assert_eq!(product["id"].as_i64(), Some(id));
    assert_eq!(product["name"], "Goat Milk & Saffron Soap");
    assert_eq!(product["price"], json!(450.0));
    assert_eq!(product["sale_price"], Value::Null);
    assert_eq!(product["is_featured"], json!(true));
    assert_eq!(product["images"], json!(["https://example.com/soap.jpg"]));

    let resp = ctx
        .client
        .get(ctx.url("/api/products"))
        .send()
        .await
        .expect("Failed to list products");
    let listing: Value = resp.json().await.expect("Failed to parse listing");
    assert_eq!(listing.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_unknown_product_slug_is_not_found() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .get(ctx.url("/api/products/no-such-soap"))
        .send()
        .await
        .expect("Failed to fetch product");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = resp.json().await.expect("Failed to parse error");
    assert_eq!(body["error"], "Product not found");
}

#[tokio::test]
async fn test_product_create_requires_admin() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .post(ctx.url("/api/products"))
        .json(&soap_draft())
        .send()
        .await
        .expect("Failed to send create");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = resp.json().await.expect("Failed to parse error");
    assert_eq!(body["error"], "Missing authorization header");
}

#[tokio::test]
async fn test_product_update_and_delete() {
    let ctx = TestContext::new().await;
    let token = ctx.admin_token().await;

    let id = create_product(&ctx, &token, &soap_draft()).await;

    let mut updated = soap_draft();
    updated["price"] = json!(500.0);
    updated["sale_price"] = json!(449.0);
    let resp = ctx
        .client
        .put(ctx.url(&format!("/api/products/{id}")))
        .bearer_auth(&token)
        .json(&updated)
        .send()
        .await
        .expect("Failed to update product");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = ctx
        .client
        .get(ctx.url("/api/products/goat-milk-saffron-soap"))
        .send()
        .await
        .expect("Failed to fetch product");
    let product: Value = resp.json().await.expect("Failed to parse product");
    assert_eq!(product["price"], json!(500.0));
    assert_eq!(product["sale_price"], json!(449.0));

    let resp = ctx
        .client
        .delete(ctx.url(&format!("/api/products/{id}")))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to delete product");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = ctx
        .client
        .get(ctx.url("/api/products/goat-milk-saffron-soap"))
        .send()
        .await
        .expect("Failed to fetch product");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_slug_is_rejected() {
    let ctx = TestContext::new().await;
    let token = ctx.admin_token().await;

    create_product(&ctx, &token, &soap_draft()).await;

    let resp = ctx
        .client
        .post(ctx.url("/api/products"))
        .bearer_auth(&token)
        .json(&soap_draft())
        .send()
        .await
        .expect("Failed to send create");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = resp.json().await.expect("Failed to parse error");
    assert_eq!(body["error"], "product slug already exists");
}

#[tokio::test]
async fn test_update_with_invalid_id_is_rejected() {
    let ctx = TestContext::new().await;
    let token = ctx.admin_token().await;

    let resp = ctx
        .client
        .put(ctx.url("/api/products/not-a-number"))
        .bearer_auth(&token)
        .json(&soap_draft())
        .send()
        .await
        .expect("Failed to send update");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = resp.json().await.expect("Failed to parse error");
    assert_eq!(body["error"], "Invalid product id");

    let resp = ctx
        .client
        .put(ctx.url("/api/products/9999"))
        .bearer_auth(&token)
        .json(&soap_draft())
        .send()
        .await
        .expect("Failed to send update");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Content Tests
// ============================================================================

#[tokio::test]
async fn test_content_defaults_to_empty_object() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .get(ctx.url("/api/content/homepage_hero"))
        .send()
        .await
        .expect("Failed to fetch content");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse content");
    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn test_content_upsert_round_trips() {
    let ctx = TestContext::new().await;
    let token = ctx.admin_token().await;

    let hero = json!({"headline": "Pure. Ethical. Empowering.", "cta_text": "Shop Now"});
    let resp = ctx
        .client
        .post(ctx.url("/api/content/homepage_hero"))
        .bearer_auth(&token)
        .json(&json!({"value": hero}))
        .send()
        .await
        .expect("Failed to upsert content");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = ctx
        .client
        .get(ctx.url("/api/content/homepage_hero"))
        .send()
        .await
        .expect("Failed to fetch content");
    let body: Value = resp.json().await.expect("Failed to parse content");
    assert_eq!(body, hero);
}

#[tokio::test]
async fn test_content_upsert_requires_admin() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .post(ctx.url("/api/content/homepage_hero"))
        .json(&json!({"value": {"headline": "Anyone home?"}}))
        .send()
        .await
        .expect("Failed to send upsert");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Blog Post Tests
// ============================================================================

#[tokio::test]
async fn test_blog_post_lifecycle() {
    let ctx = TestContext::new().await;
    let token = ctx.admin_token().await;

    let draft = json!({
        "title": "Why Goat Milk?",
        "slug": "why-goat-milk",
        "content": "Goat milk is rich in lactic acid and vitamin A.",
        "author": "SEWA Team",
        "published": true
    });
    let resp = ctx
        .client
        .post(ctx.url("/api/posts"))
        .bearer_auth(&token)
        .json(&draft)
        .send()
        .await
        .expect("Failed to create post");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse create response");
    let id = body["id"].as_i64().expect("Create response missing id");

    let resp = ctx
        .client
        .get(ctx.url("/api/posts/why-goat-milk"))
        .send()
        .await
        .expect("Failed to fetch post");
    assert_eq!(resp.status(), StatusCode::OK);
    let post: Value = resp.json().await.expect("Failed to parse post");
    assert_eq!(post["title"], "Why Goat Milk?");
    assert_eq!(post["published"], json!(true));

    let mut updated = draft.clone();
    updated["title"] = json!("Why Goat Milk? An Update");
    let resp = ctx
        .client
        .put(ctx.url(&format!("/api/posts/{id}")))
        .bearer_auth(&token)
        .json(&updated)
        .send()
        .await
        .expect("Failed to update post");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = ctx
        .client
        .delete(ctx.url(&format!("/api/posts/{id}")))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to delete post");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = ctx
        .client
        .get(ctx.url("/api/posts/why-goat-milk"))
        .send()
        .await
        .expect("Failed to fetch post");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
