//! Blog post model.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use goatique_core::PostId;

/// A blog post. Unpublished posts are drafts visible in the admin console.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub image: Option<String>,
    pub author: Option<String>,
    pub published: bool,
    pub created_at: NaiveDateTime,
}

/// Editable post fields, used for both create and update.
#[derive(Debug, Clone, Deserialize)]
pub struct PostDraft {
    pub title: String,
    pub slug: String,
    pub content: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub published: bool,
}
