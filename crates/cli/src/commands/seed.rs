//! Seed the database with the reference catalog and content documents.
//!
//! # Usage
//!
//! ```bash
//! goatique seed
//! ```
//!
//! Safe to run repeatedly: products are only inserted into an empty
//! catalog, and content documents are never overwritten once present.
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` - `SQLite` connection string (default `sqlite:goatique.db`)

use serde_json::json;
use thiserror::Error;

use goatique_server::db::{self, ContentRepository, ProductRepository, RepositoryError};
use goatique_server::models::ProductDraft;

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Database connection error.
    #[error("Database connection error: {0}")]
    Connection(#[from] sqlx::Error),

    /// Repository operation failed.
    #[error("Database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Insert the reference products and content documents.
///
/// # Errors
///
/// Returns `SeedError` if the connection cannot be opened or a write
/// fails.
pub async fn run() -> Result<(), SeedError> {
    dotenvy::dotenv().ok();

    let database_url = super::database_url();
    tracing::info!(url = %database_url, "Connecting to database...");
    let pool = db::create_pool(&database_url).await?;

    seed_content(&ContentRepository::new(&pool)).await?;
    seed_products(&ProductRepository::new(&pool)).await?;

    tracing::info!("Seeding complete!");
    Ok(())
}

/// Insert the content documents that do not exist yet.
async fn seed_content(repo: &ContentRepository<'_>) -> Result<(), SeedError> {
    let documents = [
        (
            "homepage_hero",
            json!({
                "headline": "Pure. Ethical. Empowering.",
                "subheadline": "Handmade goat milk skincare crafted by rural women artisans.",
                "cta_text": "Shop Now"
            }),
        ),
        (
            "site_branding",
            json!({"logo": "", "favicon": "", "heroImage": ""}),
        ),
    ];

    for (key, value) in documents {
        if repo.get(key).await?.is_some() {
            tracing::info!(key, "Content already present, skipping");
            continue;
        }
        repo.upsert(key, &value).await?;
        tracing::info!(key, "Content seeded");
    }

    Ok(())
}

/// Insert the reference products when the catalog is empty.
async fn seed_products(repo: &ProductRepository<'_>) -> Result<(), SeedError> {
    if !repo.list().await?.is_empty() {
        tracing::info!("Products already seeded, skipping");
        return Ok(());
    }

    for draft in reference_products() {
        let id = repo.create(&draft).await?;
        tracing::info!(product_id = %id, name = %draft.name, "Product seeded");
    }

    Ok(())
}

/// The three reference products.
fn reference_products() -> Vec<ProductDraft> {
    vec![
        ProductDraft {
            name: "Goat Milk & Saffron Soap".to_owned(),
            slug: "goat-milk-saffron-soap".to_owned(),
            description: Some(
                "Luxurious handmade soap enriched with pure goat milk and Kashmiri \
                 saffron. Brightens skin and provides deep hydration."
                    .to_owned(),
            ),
            price: 450.0,
            sale_price: None,
            stock: 100,
            category: Some("Soaps".to_owned()),
            images: vec![
                "https://images.unsplash.com/photo-1600857062241-98e5b4f9c199?auto=format&fit=crop&q=80&w=800"
                    .to_owned(),
            ],
            ingredients: Some("Goat Milk, Saffron, Coconut Oil, Olive Oil, Lye".to_owned()),
            benefits: Some("Brightening, Moisturizing, Anti-aging".to_owned()),
            is_featured: true,
        },
        ProductDraft {
            name: "Lavender & Chamomile Body Butter".to_owned(),
            slug: "lavender-chamomile-body-butter".to_owned(),
            description: Some(
                "Rich, creamy body butter that soothes sensitive skin and promotes \
                 relaxation."
                    .to_owned(),
            ),
            price: 850.0,
            sale_price: Some(799.0),
            stock: 50,
            category: Some("Body Care".to_owned()),
            images: vec![
                "https://images.unsplash.com/photo-1556228578-0d85b1a4d571?auto=format&fit=crop&q=80&w=800"
                    .to_owned(),
            ],
            ingredients: Some(
                "Shea Butter, Goat Milk, Lavender Oil, Chamomile Extract".to_owned(),
            ),
            benefits: Some("Calming, Deep Hydration, Soothing".to_owned()),
            is_featured: true,
        },
        ProductDraft {
            name: "Charcoal Detox Face Bar".to_owned(),
            slug: "charcoal-detox-face-bar".to_owned(),
            description: Some(
                "Activated charcoal draws out impurities while goat milk nourishes.".to_owned(),
            ),
            price: 350.0,
            sale_price: None,
            stock: 75,
            category: Some("Face Care".to_owned()),
            images: vec![
                "https://images.unsplash.com/photo-1607006411565-b6d39785890c?auto=format&fit=crop&q=80&w=800"
                    .to_owned(),
            ],
            ingredients: Some("Activated Charcoal, Goat Milk, Tea Tree Oil".to_owned()),
            benefits: Some("Detoxifying, Acne Control, Balancing".to_owned()),
            is_featured: false,
        },
    ]
}
