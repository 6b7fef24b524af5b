//! Shopping cart module.
//!
//! [`CartState`] is the plain line-item list with its invariants.
//! [`CartStore`] owns one state for a session and keeps it persisted.

mod cart;
mod store;

pub use cart::{cart_badge_label, CartLine, CartLineItem, CartState};
pub use store::{CartStore, ADDED_TO_CART_MESSAGE, DEFAULT_CART_KEY};
