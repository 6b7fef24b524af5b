//! Checkout success page.

use anyhow::{bail, Result};
use shop_commerce::prelude::*;

use crate::context::Context;

/// Complete checkout: empty the cart and confirm.
pub async fn run(ctx: &Context) -> Result<()> {
    let cart = ctx.cart()?;
    if cart.is_empty() {
        bail!("Your cart is empty.");
    }

    // A failed catalog load still lets checkout complete, just without prices.
    let products = match ctx.load_products().await {
        Ok(products) => products,
        Err(e) => {
            ctx.output.warn(&format!("{:#}", e));
            Vec::new()
        }
    };

    let (receipt, _) = complete_checkout(&cart, &products, &ctx.notifications);

    if ctx.output.is_json() {
        ctx.output.json(&receipt);
        return Ok(());
    }

    ctx.flush_notification();
    ctx.output.kv("Items", &receipt.total_items.to_string());
    if !products.is_empty() {
        ctx.output.kv("Total", &receipt.subtotal.to_string());
    }
    ctx.output.kv("Cart", &cart_badge_label(cart.total_items()));
    Ok(())
}
