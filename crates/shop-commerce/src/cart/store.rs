//! Session-scoped cart store with write-through persistence.

use std::sync::{Mutex, MutexGuard, PoisonError};

use shop_cache::{Cache, KeyValueStore};

use crate::cart::{CartLine, CartLineItem, CartState};
use crate::catalog::Product;
use crate::ids::ProductId;
use crate::money::Money;

/// Storage key the cart is kept under.
pub const DEFAULT_CART_KEY: &str = "cart";

/// Shown after a product is added.
pub const ADDED_TO_CART_MESSAGE: &str = "Added to cart";

/// The cart for one session.
///
/// Built explicitly and handed to whatever renders pages; there is no
/// global instance. On construction the store rehydrates from `S`. Every
/// mutation rewrites the whole cart to `S` before returning, while still
/// holding the state lock, so readers never see memory and storage
/// disagree. Storage failures are logged and swallowed: the in-memory cart
/// stays authoritative for the session.
pub struct CartStore<S> {
    cache: Cache<S>,
    key: String,
    state: Mutex<CartState>,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Open the cart stored under [`DEFAULT_CART_KEY`].
    pub fn open(store: S) -> Self {
        Self::open_with_key(store, DEFAULT_CART_KEY)
    }

    /// Open the cart stored under `key`.
    ///
    /// A missing, unreadable or malformed value yields an empty cart.
    pub fn open_with_key(store: S, key: impl Into<String>) -> Self {
        let cache = Cache::new(store);
        let key = key.into();
        let state = rehydrate(&cache, &key);
        tracing::debug!(
            key = %key,
            lines = state.unique_item_count(),
            "cart rehydrated"
        );
        Self {
            cache,
            key,
            state: Mutex::new(state),
        }
    }

    /// Add one unit of `product`.
    pub fn add_item(&self, product: &Product) {
        self.mutate(|cart| {
            cart.add(&product.id);
        });
        tracing::debug!(product = %product.id, "added to cart");
    }

    /// Remove the line for `product_id`. Absent ids are a no-op.
    pub fn remove_item(&self, product_id: &ProductId) -> bool {
        let removed = self.mutate(|cart| cart.remove(product_id));
        tracing::debug!(product = %product_id, removed, "removed from cart");
        removed
    }

    /// Set a line's quantity; zero or less removes it.
    ///
    /// Returns `false` and changes nothing if the product is not in the cart.
    pub fn set_quantity(&self, product_id: &ProductId, quantity: i64) -> bool {
        let changed = self.mutate(|cart| cart.set_quantity(product_id, quantity));
        tracing::debug!(product = %product_id, quantity, changed, "cart quantity set");
        changed
    }

    /// Empty the cart and persist the empty list.
    pub fn clear(&self) {
        self.mutate(CartState::clear);
        tracing::debug!("cart cleared");
    }

    /// Empty the cart and return what it held.
    ///
    /// Swap and persist happen under one lock, so a concurrent add lands
    /// either in the returned state or in the fresh cart, never in neither.
    pub fn take(&self) -> CartState {
        let taken = self.mutate(std::mem::take);
        tracing::debug!(lines = taken.unique_item_count(), "cart taken");
        taken
    }

    /// Sum of all quantities.
    pub fn total_items(&self) -> u64 {
        self.lock().total_items()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copy of the line items in insertion order.
    pub fn line_items(&self) -> Vec<CartLineItem> {
        self.lock().items().to_vec()
    }

    /// Copy of the whole cart.
    pub fn snapshot(&self) -> CartState {
        self.lock().clone()
    }

    /// Subtotal of the cart priced against `catalog`.
    pub fn subtotal(&self, catalog: &[Product]) -> Money {
        self.lock().subtotal(catalog)
    }

    /// Run `f` over the cart joined with `catalog`.
    pub fn with_lines<R>(&self, catalog: &[Product], f: impl FnOnce(&[CartLine<'_>]) -> R) -> R {
        let state = self.lock();
        let lines = state.lines(catalog);
        f(&lines)
    }

    /// The storage key in use.
    pub fn key(&self) -> &str {
        &self.key
    }

    fn lock(&self) -> MutexGuard<'_, CartState> {
        // A panic mid-mutation leaves a valid CartState behind; keep using it.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn mutate<R>(&self, f: impl FnOnce(&mut CartState) -> R) -> R {
        let mut state = self.lock();
        let result = f(&mut state);
        self.persist(&state);
        result
    }

    fn persist(&self, state: &CartState) {
        if let Err(e) = self.cache.set(&self.key, state) {
            tracing::warn!(key = %self.key, error = %e, "failed to persist cart");
        }
    }
}

fn rehydrate<S: KeyValueStore>(cache: &Cache<S>, key: &str) -> CartState {
    match cache.get::<Vec<CartLineItem>>(key) {
        Ok(Some(items)) => CartState::from_items(items).unwrap_or_else(|| {
            tracing::warn!(key, "persisted cart breaks invariants; starting empty");
            CartState::new()
        }),
        Ok(None) => CartState::new(),
        Err(e) => {
            tracing::warn!(key, error = %e, "discarding unreadable cart");
            CartState::new()
        }
    }
}
