//! Cart page and cart edits.

use anyhow::{bail, Result};
use dialoguer::Confirm;
use serde::Serialize;
use shop_cache::FileStore;
use shop_commerce::prelude::*;

use super::{CartArgs, CartCommand};
use crate::context::Context;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => show(ctx).await,
        CartCommand::Add { id } => add(&id, ctx).await,
        CartCommand::Remove { id } => remove(&id, ctx),
        CartCommand::Set { id, quantity } => set(&id, quantity, ctx),
        CartCommand::Clear { yes } => clear(yes, ctx),
    }
}

#[derive(Serialize)]
struct CartView {
    items: Vec<CartLineItem>,
    total_items: u64,
    badge: String,
    subtotal: Option<Money>,
}

async fn show(ctx: &Context) -> Result<()> {
    let cart = ctx.cart()?;

    if cart.is_empty() {
        if ctx.output.is_json() {
            ctx.output.json(&CartView {
                items: Vec::new(),
                total_items: 0,
                badge: cart_badge_label(0),
                subtotal: Some(Money::zero()),
            });
        } else {
            ctx.output.header(&cart_badge_label(0));
            ctx.output.info("Your cart is empty.");
        }
        return Ok(());
    }

    // Prices come from the live catalog; the cart only stores ids.
    let products = match ctx.load_products().await {
        Ok(products) => Some(products),
        Err(e) => {
            ctx.output.warn(&format!("{:#}", e));
            None
        }
    };

    if ctx.output.is_json() {
        ctx.output.json(&CartView {
            items: cart.line_items(),
            total_items: cart.total_items(),
            badge: cart_badge_label(cart.total_items()),
            subtotal: products.as_deref().map(|p| cart.subtotal(p)),
        });
        return Ok(());
    }

    ctx.output.header(&cart_badge_label(cart.total_items()));
    print_lines(&cart, products.as_deref().unwrap_or_default(), ctx);
    if let Some(products) = products.as_deref() {
        ctx.output.kv("Subtotal", &cart.subtotal(products).to_string());
    }
    Ok(())
}

fn print_lines(cart: &CartStore<FileStore>, products: &[Product], ctx: &Context) {
    cart.with_lines(products, |lines| {
        for line in lines {
            let title = line
                .product
                .map(|p| p.title.as_str())
                .unwrap_or(line.item.product_id.as_str());
            let total = line
                .line_total()
                .map(|m| m.to_string())
                .unwrap_or_else(|| "-".to_string());
            ctx.output.table_row(
                &[title, &format!("x{}", line.item.quantity), &total],
                &[28, 5, 0],
            );
        }
    });
}

async fn add(id: &str, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let product = catalog
        .get_product(&ProductId::new(id))
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;

    let cart = ctx.cart()?;
    cart.add_item(&product);
    ctx.notifications.success(ADDED_TO_CART_MESSAGE);

    ctx.output.debug(&format!("{} now in cart", product.title));
    report_badge(&cart, ctx);
    Ok(())
}

fn remove(id: &str, ctx: &Context) -> Result<()> {
    let cart = ctx.cart()?;
    if !cart.remove_item(&ProductId::new(id)) {
        bail!("{} is not in the cart", id);
    }
    ctx.output.success(&format!("Removed {}", id));
    report_badge(&cart, ctx);
    Ok(())
}

fn set(id: &str, quantity: i64, ctx: &Context) -> Result<()> {
    let cart = ctx.cart()?;
    if !cart.set_quantity(&ProductId::new(id), quantity) {
        bail!("{} is not in the cart", id);
    }
    if quantity <= 0 {
        ctx.output.success(&format!("Removed {}", id));
    } else {
        ctx.output.success(&format!("Set {} to {}", id, quantity));
    }
    report_badge(&cart, ctx);
    Ok(())
}

fn clear(yes: bool, ctx: &Context) -> Result<()> {
    let cart = ctx.cart()?;
    if cart.is_empty() {
        ctx.output.info("Your cart is empty.");
        return Ok(());
    }

    if !yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove all {} items?", cart.total_items()))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Cart left unchanged");
            return Ok(());
        }
    }

    cart.clear();
    ctx.output.success("Cart cleared");
    report_badge(&cart, ctx);
    Ok(())
}

/// Badge after an edit, plus any toast the edit raised.
fn report_badge(cart: &CartStore<FileStore>, ctx: &Context) {
    if ctx.output.is_json() {
        let mut view = serde_json::json!({
            "items": cart.line_items(),
            "total_items": cart.total_items(),
        });
        if let Some(toast) = ctx.take_notification() {
            view["notification"] = serde_json::json!(toast);
        }
        ctx.output.json(&view);
    } else {
        ctx.flush_notification();
        ctx.output.kv("Cart", &cart_badge_label(cart.total_items()));
    }
}
