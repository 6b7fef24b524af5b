//! Storefront domain logic.
//!
//! - **Catalog**: product model and the remote catalog client
//! - **Cart**: line items and the persisted, session-scoped cart store
//! - **Search**: filtering and sorting the product listing
//! - **Notify**: auto-dismissing toast messages
//! - **Contact**: contact form validation
//! - **Checkout**: simulated checkout that empties the cart
//!
//! # Example
//!
//! ```rust,ignore
//! use shop_commerce::prelude::*;
//! use shop_cache::FileStore;
//!
//! let catalog = CatalogClient::new(DEFAULT_CATALOG_URL);
//! let products = catalog.list_products().await?;
//!
//! let cart = CartStore::open(FileStore::open(".shop/storage.json")?);
//! let view = filter_and_sort(&products, "plush", SortOption::PriceAsc);
//! if let Some(first) = view.first() {
//!     cart.add_item(first);
//! }
//! println!("{}", cart_badge_label(cart.total_items()));
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod contact;
pub mod notify;
pub mod search;

pub use error::CommerceError;
pub use ids::*;
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::Money;

    // Catalog
    pub use crate::catalog::{
        CatalogClient, PageLoader, PageState, PageTicket, Product, ProductImage, Review,
        DEFAULT_CATALOG_URL,
    };

    // Cart
    pub use crate::cart::{
        cart_badge_label, CartLine, CartLineItem, CartState, CartStore, ADDED_TO_CART_MESSAGE,
    };

    // Checkout
    pub use crate::checkout::{complete_checkout, CheckoutReceipt, CHECKOUT_SUCCESS_MESSAGE};

    // Contact
    pub use crate::contact::{ContactField, ContactForm, Validation};

    // Notifications
    pub use crate::notify::{Notification, NotificationChannel, NotificationHandle, NotificationKind};

    // Search
    pub use crate::search::{filter_and_sort, ListingParams, SortOption};
}
