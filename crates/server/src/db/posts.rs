//! Blog post repository.

use sqlx::SqlitePool;

use goatique_core::PostId;

use super::{RepositoryError, map_unique_violation};
use crate::models::{Post, PostDraft};

/// Repository for blog post database operations.
pub struct PostRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PostRepository<'a> {
    /// Create a new post repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all posts, newest first. Drafts are included.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Post>, RepositoryError> {
        let posts = sqlx::query_as::<_, Post>(
            r"
            SELECT id, title, slug, content, excerpt, image, author, published, created_at
            FROM posts
            ORDER BY created_at DESC, id DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(posts)
    }

    /// Get a post by its URL slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Post>, RepositoryError> {
        let post = sqlx::query_as::<_, Post>(
            r"
            SELECT id, title, slug, content, excerpt, image, author, published, created_at
            FROM posts
            WHERE slug = ?
            ",
        )
        .bind(slug)
        .fetch_optional(self.pool)
        .await?;
        Ok(post)
    }

    /// Create a new post.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the slug already exists.
    pub async fn create(&self, draft: &PostDraft) -> Result<PostId, RepositoryError> {
        let result = sqlx::query(
            r"
            INSERT INTO posts (title, slug, content, excerpt, image, author, published)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(&draft.title)
        .bind(&draft.slug)
        .bind(&draft.content)
        .bind(&draft.excerpt)
        .bind(&draft.image)
        .bind(&draft.author)
        .bind(draft.published)
        .execute(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "post slug already exists"))?;

        Ok(PostId::new(result.last_insert_rowid()))
    }

    /// Replace all fields of a post.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no post has this id.
    /// Returns `RepositoryError::Conflict` if the new slug already exists.
    pub async fn update(&self, id: PostId, draft: &PostDraft) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE posts
            SET title = ?, slug = ?, content = ?, excerpt = ?, image = ?,
                author = ?, published = ?
            WHERE id = ?
            ",
        )
        .bind(&draft.title)
        .bind(&draft.slug)
        .bind(&draft.content)
        .bind(&draft.excerpt)
        .bind(&draft.image)
        .bind(&draft.author)
        .bind(draft.published)
        .bind(id)
        .execute(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "post slug already exists"))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Delete a post. Deleting an unknown id is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: PostId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(())
    }
}
