//! Cart state and line item types.

use crate::catalog::Product;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One row of the cart. Persisted as `{"id": ..., "quantity": ...}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartLineItem {
    /// Product in the catalog. Not checked against the catalog on write.
    #[serde(rename = "id")]
    pub product_id: ProductId,
    /// Always at least 1.
    pub quantity: u32,
}

impl CartLineItem {
    pub fn new(product_id: impl Into<ProductId>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}

/// Line items in insertion order, at most one per product.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct CartState {
    items: Vec<CartLineItem>,
}

impl CartState {
    /// An empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cart from persisted rows.
    ///
    /// Returns `None` if the rows break the cart's invariants: a zero
    /// quantity or the same product listed twice.
    pub fn from_items(items: Vec<CartLineItem>) -> Option<Self> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if item.quantity == 0 || !seen.insert(&item.product_id) {
                return None;
            }
        }
        Some(Self { items })
    }

    /// Add one unit of `product_id`, appending a new line if it is not
    /// already in the cart.
    pub fn add(&mut self, product_id: &ProductId) {
        if let Some(existing) = self.items.iter_mut().find(|i| &i.product_id == product_id) {
            existing.quantity = existing.quantity.saturating_add(1);
            return;
        }
        self.items.push(CartLineItem::new(product_id.clone(), 1));
    }

    /// Remove the line for `product_id`. Returns whether a line was removed.
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.product_id != product_id);
        self.items.len() < len_before
    }

    /// Set the quantity for `product_id`.
    ///
    /// A quantity of zero or less removes the line. Returns `false`, leaving
    /// the cart untouched, if the product is not in the cart.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove(product_id);
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        match self.items.iter_mut().find(|i| &i.product_id == product_id) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Remove all lines.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of all quantities.
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Number of distinct products.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Get the line for a product.
    pub fn get(&self, product_id: &ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|i| &i.product_id == product_id)
    }

    /// Join lines to catalog products for display.
    pub fn lines<'a>(&'a self, catalog: &'a [Product]) -> Vec<CartLine<'a>> {
        self.items
            .iter()
            .map(|item| CartLine {
                item,
                product: catalog.iter().find(|p| p.id == item.product_id),
            })
            .collect()
    }

    /// Sum of discounted price times quantity over lines whose product is
    /// in `catalog`. Lines for unknown products contribute nothing.
    pub fn subtotal(&self, catalog: &[Product]) -> Money {
        self.lines(catalog)
            .iter()
            .filter_map(CartLine::line_total)
            .sum()
    }
}

/// A cart line joined with its catalog product, if the catalog has it.
#[derive(Debug, Clone, Copy)]
pub struct CartLine<'a> {
    pub item: &'a CartLineItem,
    pub product: Option<&'a Product>,
}

impl CartLine<'_> {
    /// Discounted price times quantity, when the product is known.
    pub fn line_total(&self) -> Option<Money> {
        self.product.map(|p| p.sale_price() * self.item.quantity)
    }
}

/// Accessible label for the header cart badge.
pub fn cart_badge_label(total_items: u64) -> String {
    let suffix = if total_items == 1 { "" } else { "s" };
    format!("Cart with {} item{}", total_items, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ProductId {
        ProductId::new(s)
    }

    #[test]
    fn test_add_same_product_increments() {
        let mut cart = CartState::new();
        for _ in 0..4 {
            cart.add(&id("a"));
        }
        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(cart.total_items(), 4);
        assert_eq!(cart.get(&id("a")).map(|i| i.quantity), Some(4));
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = CartState::new();
        cart.add(&id("b"));
        cart.add(&id("b"));
        cart.add(&id("a"));

        assert_eq!(
            cart.items(),
            &[CartLineItem::new("b", 2), CartLineItem::new("a", 1)]
        );
        assert_eq!(cart.total_items(), 3);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cart = CartState::new();
        cart.add(&id("a"));
        let before = cart.clone();

        assert!(!cart.remove(&id("zzz")));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_set_quantity() {
        let mut cart = CartState::new();
        cart.add(&id("a"));
        cart.add(&id("b"));

        assert!(cart.set_quantity(&id("a"), 5));
        assert_eq!(cart.total_items(), 6);

        assert!(cart.set_quantity(&id("b"), 0));
        assert!(cart.get(&id("b")).is_none());

        assert!(cart.set_quantity(&id("a"), -3));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_absent_is_noop() {
        let mut cart = CartState::new();
        cart.add(&id("a"));
        let before = cart.clone();

        assert!(!cart.set_quantity(&id("zzz"), 7));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_from_items_rejects_broken_invariants() {
        assert!(CartState::from_items(vec![CartLineItem::new("a", 0)]).is_none());
        assert!(CartState::from_items(vec![
            CartLineItem::new("a", 1),
            CartLineItem::new("a", 2),
        ])
        .is_none());
        assert!(CartState::from_items(vec![CartLineItem::new("a", 2)]).is_some());
    }

    #[test]
    fn test_persisted_shape() {
        let mut cart = CartState::new();
        cart.add(&id("a"));
        assert_eq!(
            serde_json::to_string(&cart).unwrap(),
            r#"[{"id":"a","quantity":1}]"#
        );
    }

    #[test]
    fn test_subtotal_uses_discounted_price_and_skips_unknown() {
        let catalog = vec![
            Product::new("a", "Eevee", 10.0),
            Product::new("b", "Flareon", 12.0).with_discounted_price(8.0),
        ];
        let mut cart = CartState::new();
        cart.add(&id("b"));
        cart.add(&id("b"));
        cart.add(&id("a"));
        cart.add(&id("gone"));

        assert_eq!(cart.subtotal(&catalog), Money::new(2600));

        let lines = cart.lines(&catalog);
        assert_eq!(lines.len(), 3);
        assert!(lines[2].product.is_none());
        assert_eq!(lines[0].line_total(), Some(Money::new(1600)));
    }

    #[test]
    fn test_badge_label() {
        assert_eq!(cart_badge_label(1), "Cart with 1 item");
        assert_eq!(cart_badge_label(0), "Cart with 0 items");
        assert_eq!(cart_badge_label(3), "Cart with 3 items");
    }
}
