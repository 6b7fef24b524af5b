//! End-to-end flow through the public API: browse, filter, add to cart,
//! reopen the session, check out.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use shop_cache::{FileStore, KeyValueStore};
use shop_commerce::prelude::*;
use shop_data::{FetchClient, FetchError, RequestBuilder, Response, Transport};

const BASE: &str = "https://catalog.test/online-shop";

const CATALOG: &str = r#"{
    "data": [
        {
            "id": "a",
            "title": "Eevee",
            "description": "The evolution pokemon.",
            "price": 10,
            "discountedPrice": 10,
            "image": { "url": "https://img.test/eevee.jpg", "alt": "Eevee" },
            "rating": 5,
            "tags": ["normal"],
            "reviews": []
        },
        {
            "id": "b",
            "title": "Flareon",
            "description": "Fire type.",
            "price": 12,
            "discountedPrice": 8,
            "image": { "url": "https://img.test/flareon.jpg" },
            "rating": 4,
            "tags": ["fire"],
            "reviews": [
                { "id": "r1", "username": "misty", "rating": 3, "description": "Too warm." }
            ]
        }
    ],
    "meta": { "isFirstPage": true, "isLastPage": true }
}"#;

struct FakeCatalog;

#[async_trait]
impl Transport for FakeCatalog {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        let body = match request.url() {
            url if url == BASE => CATALOG.to_string(),
            url if url == format!("{}/b", BASE) => {
                let all: serde_json::Value = serde_json::from_str(CATALOG).unwrap();
                serde_json::json!({ "data": all["data"][1] }).to_string()
            }
            _ => return Ok(Response::new(404, HashMap::new(), b"{}".to_vec())),
        };
        Ok(Response::new(200, HashMap::new(), body.into_bytes()))
    }
}

fn catalog_client() -> CatalogClient {
    CatalogClient::with_http(FetchClient::with_transport(Arc::new(FakeCatalog)).with_base_url(BASE))
}

#[tokio::test]
async fn test_browse_add_reopen_and_checkout() {
    let dir = tempfile::tempdir().unwrap();
    let storage_path = dir.path().join("storage.json");
    let client = catalog_client();

    // Home page: load listing.
    let mut home = PageLoader::new();
    let ticket = home.begin();
    home.settle(ticket, client.list_products().await);
    let products = home.state().ready().cloned().expect("catalog loaded");

    let params = ListingParams::new().with_sort(SortOption::PriceAsc);
    let ordered: Vec<&str> = params.apply(&products).iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ordered, vec!["b", "a"]);

    // Detail page: add Flareon twice and Eevee once.
    let flareon = client.get_product(&ProductId::new("b")).await.unwrap();
    assert_eq!(flareon.discount_percentage(), Some(33));

    let notifications = NotificationChannel::new(Duration::from_secs(3));
    {
        let cart = CartStore::open(FileStore::open(&storage_path).unwrap());
        cart.add_item(&flareon);
        cart.add_item(&flareon);
        cart.add_item(&products[0]);
        notifications.success(ADDED_TO_CART_MESSAGE);
        assert_eq!(cart.total_items(), 3);
    }

    // New session: cart comes back from disk in the same order.
    let cart = CartStore::open(FileStore::open(&storage_path).unwrap());
    assert_eq!(
        cart.line_items(),
        vec![CartLineItem::new("b", 2), CartLineItem::new("a", 1)]
    );
    assert_eq!(cart.subtotal(&products), Money::new(2600));
    assert_eq!(cart_badge_label(cart.total_items()), "Cart with 3 items");

    // Checkout success page.
    let (receipt, _) = complete_checkout(&cart, &products, &notifications);
    assert_eq!(receipt.total_items, 3);
    assert!(cart.is_empty());
    assert_eq!(
        notifications.current().map(|n| n.message),
        Some(CHECKOUT_SUCCESS_MESSAGE.to_string())
    );

    let reopened = FileStore::open(&storage_path).unwrap();
    assert_eq!(reopened.get("cart").unwrap().as_deref(), Some("[]"));
}

#[tokio::test]
async fn test_missing_product_renders_single_error() {
    let client = catalog_client();
    let mut detail: PageLoader<Product> = PageLoader::new();
    let ticket = detail.begin();
    detail.settle(ticket, client.get_product(&ProductId::new("nope")).await);

    assert_eq!(detail.state().error(), Some("Product not found"));
}

#[test]
fn test_corrupt_storage_file_starts_empty_cart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::write(&path, "garbage").unwrap();

    let cart = CartStore::open(FileStore::open(&path).unwrap());
    assert!(cart.is_empty());

    cart.add_item(&Product::new("a", "Eevee", 10.0));
    let reopened = CartStore::open(FileStore::open(&path).unwrap());
    assert_eq!(reopened.total_items(), 1);
}
