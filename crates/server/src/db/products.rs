//! Product repository for catalog database operations.

use chrono::NaiveDateTime;
use sqlx::SqlitePool;

use goatique_core::ProductId;

use super::{RepositoryError, map_unique_violation};
use crate::models::{Product, ProductDraft};

/// Raw products row. `images` stays JSON text until conversion.
#[derive(sqlx::FromRow)]
struct ProductRow {
    id: ProductId,
    name: String,
    slug: String,
    description: Option<String>,
    price: f64,
    sale_price: Option<f64>,
    stock: i64,
    category: Option<String>,
    images: Option<String>,
    ingredients: Option<String>,
    benefits: Option<String>,
    is_featured: bool,
    created_at: NaiveDateTime,
}

impl ProductRow {
    fn into_product(self) -> Result<Product, RepositoryError> {
        let images = parse_images(self.id, self.images.as_deref())?;
        Ok(Product {
            id: self.id,
            name: self.name,
            slug: self.slug,
            description: self.description,
            price: self.price,
            sale_price: self.sale_price,
            stock: self.stock,
            category: self.category,
            images,
            ingredients: self.ingredients,
            benefits: self.benefits,
            is_featured: self.is_featured,
            created_at: self.created_at,
        })
    }
}

fn parse_images(id: ProductId, raw: Option<&str>) -> Result<Vec<String>, RepositoryError> {
    match raw {
        None | Some("") => Ok(Vec::new()),
        Some(text) => serde_json::from_str(text).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid images JSON for product {id}: {e}"))
        }),
    }
}

fn encode_images(images: &[String]) -> Result<String, RepositoryError> {
    serde_json::to_string(images)
        .map_err(|e| RepositoryError::DataCorruption(format!("failed to encode images: {e}")))
}

/// Repository for catalog database operations.
pub struct ProductRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all products, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored image list is invalid.
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, slug, description, price, sale_price, stock, category,
                   images, ingredients, benefits, is_featured, created_at
            FROM products
            ORDER BY created_at DESC, id DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(ProductRow::into_product).collect()
    }

    /// Get a product by its URL slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, slug, description, price, sale_price, stock, category,
                   images, ingredients, benefits, is_featured, created_at
            FROM products
            WHERE slug = ?
            ",
        )
        .bind(slug)
        .fetch_optional(self.pool)
        .await?;

        match row {
            Some(r) => Ok(Some(r.into_product()?)),
            None => Ok(None),
        }
    }

    /// Create a new product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the slug already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, draft: &ProductDraft) -> Result<ProductId, RepositoryError> {
        let images = encode_images(&draft.images)?;
        let result = sqlx::query(
            r"
            INSERT INTO products (name, slug, description, price, sale_price, stock,
                                  category, images, ingredients, benefits, is_featured)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(&draft.name)
        .bind(&draft.slug)
        .bind(&draft.description)
        .bind(draft.price)
        .bind(draft.sale_price)
        .bind(draft.stock)
        .bind(&draft.category)
        .bind(&images)
        .bind(&draft.ingredients)
        .bind(&draft.benefits)
        .bind(draft.is_featured)
        .execute(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "product slug already exists"))?;

        Ok(ProductId::new(result.last_insert_rowid()))
    }

    /// Replace all editable fields of a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no product has this id.
    /// Returns `RepositoryError::Conflict` if the new slug already exists.
    pub async fn update(&self, id: ProductId, draft: &ProductDraft) -> Result<(), RepositoryError> {
        let images = encode_images(&draft.images)?;
        let result = sqlx::query(
            r"
            UPDATE products
            SET name = ?, slug = ?, description = ?, price = ?, sale_price = ?,
                stock = ?, category = ?, images = ?, ingredients = ?, benefits = ?,
                is_featured = ?
            WHERE id = ?
            ",
        )
        .bind(&draft.name)
        .bind(&draft.slug)
        .bind(&draft.description)
        .bind(draft.price)
        .bind(draft.sale_price)
        .bind(draft.stock)
        .bind(&draft.category)
        .bind(&images)
        .bind(&draft.ingredients)
        .bind(&draft.benefits)
        .bind(draft.is_featured)
        .bind(id)
        .execute(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "product slug already exists"))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Delete a product. Deleting an unknown id is a no-op.
    ///
    /// Orders keep their item snapshots, so this never touches order history.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::test_support::test_pool;

    fn draft(name: &str, slug: &str, price: f64) -> ProductDraft {
        ProductDraft {
            name: name.to_owned(),
            slug: slug.to_owned(),
            description: Some("Handmade goat milk soap".to_owned()),
            price,
            sale_price: None,
            stock: 100,
            category: Some("Soaps".to_owned()),
            images: vec!["https://example.com/soap.jpg".to_owned()],
            ingredients: None,
            benefits: None,
            is_featured: false,
        }
    }

    #[tokio::test]
    async fn create_and_fetch_by_slug() {
        let pool = test_pool().await;
        let repo = ProductRepository::new(&pool);

        let id = repo
            .create(&draft("Goat Milk & Saffron Soap", "goat-milk-saffron-soap", 450.0))
            .await
            .unwrap();

        let product = repo
            .get_by_slug("goat-milk-saffron-soap")
            .await
            .unwrap()
            .expect("product should exist");
        assert_eq!(product.id, id);
        assert_eq!(product.name, "Goat Milk & Saffron Soap");
        assert_eq!(product.images, vec!["https://example.com/soap.jpg".to_owned()]);
    }

    #[tokio::test]
    async fn unknown_slug_returns_none() {
        let pool = test_pool().await;
        let repo = ProductRepository::new(&pool);

        assert!(repo.get_by_slug("no-such-soap").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_slug_is_a_conflict() {
        let pool = test_pool().await;
        let repo = ProductRepository::new(&pool);

        repo.create(&draft("First", "same-slug", 100.0)).await.unwrap();
        let err = repo.create(&draft("Second", "same-slug", 200.0)).await.unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn update_replaces_fields_and_missing_id_is_not_found() {
        let pool = test_pool().await;
        let repo = ProductRepository::new(&pool);

        let id = repo.create(&draft("Soap", "soap", 450.0)).await.unwrap();

        let mut updated = draft("Soap", "soap", 450.0);
        updated.sale_price = Some(399.0);
        updated.is_featured = true;
        repo.update(id, &updated).await.unwrap();

        let product = repo.get_by_slug("soap").await.unwrap().unwrap();
        assert_eq!(product.sale_price, Some(399.0));
        assert!(product.is_featured);

        let err = repo
            .update(ProductId::new(9999), &updated)
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn delete_removes_product_and_ignores_unknown_ids() {
        let pool = test_pool().await;
        let repo = ProductRepository::new(&pool);

        let id = repo.create(&draft("Soap", "soap", 450.0)).await.unwrap();
        repo.delete(id).await.unwrap();
        assert!(repo.get_by_slug("soap").await.unwrap().is_none());

        repo.delete(ProductId::new(9999)).await.unwrap();
    }
}
