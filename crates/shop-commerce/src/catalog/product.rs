//! Product and review types, decoded from the catalog API.

use crate::ids::{ProductId, ReviewId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product in the catalog. Read-only once fetched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product title.
    pub title: String,
    /// Full description.
    #[serde(default)]
    pub description: String,
    /// Original price.
    pub price: f64,
    /// Price after discount; equal to `price` when there is none.
    pub discounted_price: f64,
    /// Average rating, 0 to 5.
    #[serde(default)]
    pub rating: f64,
    /// Primary image.
    pub image: ProductImage,
    /// Tags, in the order the catalog lists them.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Customer reviews.
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl Product {
    /// Create a product with no discount, image alt, tags or reviews.
    pub fn new(id: impl Into<ProductId>, title: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            price,
            discounted_price: price,
            rating: 0.0,
            image: ProductImage::default(),
            tags: Vec::new(),
            reviews: Vec::new(),
        }
    }

    /// Set the discounted price.
    pub fn with_discounted_price(mut self, discounted_price: f64) -> Self {
        self.discounted_price = discounted_price;
        self
    }

    /// Add a tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Original price as money.
    pub fn price(&self) -> Money {
        Money::from_decimal(self.price)
    }

    /// Price the customer pays.
    pub fn sale_price(&self) -> Money {
        Money::from_decimal(self.discounted_price)
    }

    /// Check if the product is sold below its original price.
    pub fn has_discount(&self) -> bool {
        self.discounted_price < self.price
    }

    /// Whole-percent discount, or `None` when there is no valid discount.
    ///
    /// A discounted price above the original never yields a percentage.
    pub fn discount_percentage(&self) -> Option<u32> {
        if !self.has_discount() || self.price <= 0.0 || self.discounted_price < 0.0 {
            return None;
        }
        let pct = ((self.price - self.discounted_price) / self.price * 100.0).round();
        Some(pct as u32)
    }

    /// Alt text for the image, falling back to the title.
    pub fn image_alt(&self) -> &str {
        match self.image.alt.as_deref() {
            Some(alt) if !alt.trim().is_empty() => alt,
            _ => &self.title,
        }
    }

    /// Number of reviews.
    pub fn review_count(&self) -> usize {
        self.reviews.len()
    }

    /// Case-insensitive match of an already lowercased needle against the
    /// title or any tag.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(needle))
    }
}

/// A product image.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductImage {
    /// Image URL.
    pub url: String,
    /// Alt text for accessibility.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

/// A customer review.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub id: ReviewId,
    pub username: String,
    pub rating: f64,
    #[serde(default)]
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG_JSON: &str = r#"{
        "id": "f99cafd2-bd40-4694-8b33-a6052f36b435",
        "title": "Vaporeon Plush",
        "description": "Soft and water resistant.",
        "price": 129.99,
        "discountedPrice": 103.99,
        "image": { "url": "https://example.com/vaporeon.jpg", "alt": "" },
        "rating": 4.5,
        "tags": ["plush", "water"],
        "reviews": [
            { "id": "r1", "username": "Ash", "rating": 5, "description": "Great!" }
        ]
    }"#;

    #[test]
    fn test_decode_catalog_shape() {
        let product: Product = serde_json::from_str(CATALOG_JSON).unwrap();
        assert_eq!(product.title, "Vaporeon Plush");
        assert_eq!(product.sale_price().amount_cents, 10399);
        assert_eq!(product.tags, vec!["plush", "water"]);
        assert_eq!(product.review_count(), 1);
        assert_eq!(product.reviews[0].rating, 5.0);
    }

    #[test]
    fn test_decode_minimal_record() {
        let product: Product = serde_json::from_str(
            r#"{"id":"a","title":"Eevee","price":10,"discountedPrice":10,"image":{"url":""}}"#,
        )
        .unwrap();
        assert!(product.tags.is_empty());
        assert!(product.reviews.is_empty());
        assert_eq!(product.image_alt(), "Eevee");
    }

    #[test]
    fn test_discount_percentage() {
        let product = Product::new("b", "Flareon", 12.0).with_discounted_price(8.0);
        assert!(product.has_discount());
        assert_eq!(product.discount_percentage(), Some(33));

        let full_price = Product::new("a", "Eevee", 10.0);
        assert!(!full_price.has_discount());
        assert_eq!(full_price.discount_percentage(), None);
    }

    #[test]
    fn test_discount_percentage_skips_inverted_prices() {
        let odd = Product::new("c", "Jolteon", 10.0).with_discounted_price(15.0);
        assert_eq!(odd.discount_percentage(), None);

        let free = Product::new("d", "Umbreon", 0.0).with_discounted_price(-1.0);
        assert_eq!(free.discount_percentage(), None);
    }

    #[test]
    fn test_image_alt_prefers_explicit_text() {
        let mut product = Product::new("a", "Eevee", 10.0);
        product.image.alt = Some("An Eevee figure".into());
        assert_eq!(product.image_alt(), "An Eevee figure");
    }
}
