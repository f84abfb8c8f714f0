//! Catalog product model.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use goatique_core::ProductId;

/// A catalog product.
///
/// `images` is stored as a JSON array in the database and parsed by the
/// repository; the remaining fields map 1:1 onto columns.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub price: f64,
    pub sale_price: Option<f64>,
    pub stock: i64,
    pub category: Option<String>,
    pub images: Vec<String>,
    pub ingredients: Option<String>,
    pub benefits: Option<String>,
    pub is_featured: bool,
    pub created_at: NaiveDateTime,
}

impl Product {
    /// Price a storefront client should charge for one unit.
    ///
    /// The sale price wins over the regular price when set.
    #[must_use]
    pub fn effective_price(&self) -> f64 {
        self.sale_price.unwrap_or(self.price)
    }
}

/// Editable product fields, used for both create and update.
///
/// Admin clients that only send the basic fields get the same defaults the
/// schema applies (no sale, not featured).
#[derive(Debug, Clone, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub sale_price: Option<f64>,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub ingredients: Option<String>,
    #[serde(default)]
    pub benefits: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price: f64, sale_price: Option<f64>) -> Product {
        Product {
            id: ProductId::new(1),
            name: "Goat Milk & Saffron Soap".to_owned(),
            slug: "goat-milk-saffron-soap".to_owned(),
            description: None,
            price,
            sale_price,
            stock: 100,
            category: Some("Soaps".to_owned()),
            images: vec![],
            ingredients: None,
            benefits: None,
            is_featured: true,
            created_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn effective_price_prefers_sale_price() {
        assert!((product(850.0, Some(799.0)).effective_price() - 799.0).abs() < f64::EPSILON);
    }

    #[test]
    fn effective_price_falls_back_to_regular_price() {
        assert!((product(450.0, None).effective_price() - 450.0).abs() < f64::EPSILON);
    }
}
