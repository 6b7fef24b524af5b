//! Simulated checkout.
//!
//! No payment is taken. Completing checkout records what was bought,
//! empties the cart and tells the shopper.

use serde::Serialize;
use shop_cache::KeyValueStore;

use crate::cart::{CartLineItem, CartStore};
use crate::catalog::Product;
use crate::money::Money;
use crate::notify::{NotificationChannel, NotificationHandle};

/// Shown once checkout completes.
pub const CHECKOUT_SUCCESS_MESSAGE: &str = "Checkout successful!";

/// What was in the cart when checkout completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutReceipt {
    pub items: Vec<CartLineItem>,
    pub total_items: u64,
    pub subtotal: Money,
}

/// Complete checkout: empty the cart, record what it held, and notify.
///
/// Call exactly once per successful checkout.
pub fn complete_checkout<S: KeyValueStore>(
    cart: &CartStore<S>,
    catalog: &[Product],
    notifications: &NotificationChannel,
) -> (CheckoutReceipt, NotificationHandle) {
    let bought = cart.take();
    let receipt = CheckoutReceipt {
        items: bought.items().to_vec(),
        total_items: bought.total_items(),
        subtotal: bought.subtotal(catalog),
    };

    tracing::info!(
        total_items = receipt.total_items,
        subtotal = %receipt.subtotal,
        "checkout completed"
    );

    let handle = notifications.success(CHECKOUT_SUCCESS_MESSAGE);
    (receipt, handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_cache::MemoryStore;
    use std::sync::Arc;

    #[test]
    fn test_checkout_clears_and_notifies() {
        let backing = Arc::new(MemoryStore::new());
        let cart = CartStore::open(Arc::clone(&backing));
        let catalog = vec![Product::new("b", "Flareon", 12.0).with_discounted_price(8.0)];
        cart.add_item(&catalog[0]);
        cart.add_item(&catalog[0]);

        let channel = NotificationChannel::default();
        let (receipt, handle) = complete_checkout(&cart, &catalog, &channel);

        assert_eq!(receipt.total_items, 2);
        assert_eq!(receipt.subtotal, Money::new(1600));
        assert_eq!(receipt.items, vec![CartLineItem::new("b", 2)]);

        assert!(cart.is_empty());
        assert_eq!(backing.get("cart").unwrap().as_deref(), Some("[]"));

        let shown = channel.current().unwrap();
        assert_eq!(shown.message, CHECKOUT_SUCCESS_MESSAGE);
        assert_eq!(shown.handle(), handle);
    }
}
