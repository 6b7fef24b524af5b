//! Product catalog module.
//!
//! Contains the product model, the remote catalog client and the load state
//! pages keep while a fetch is in flight.

mod client;
mod page;
mod product;

pub use client::{CatalogClient, DEFAULT_CATALOG_URL};
pub use page::{PageLoader, PageState, PageTicket};
pub use product::{Product, ProductImage, Review};
