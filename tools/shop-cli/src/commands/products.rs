//! Product listing and detail pages.

use anyhow::Result;
use console::style;
use serde::Serialize;
use shop_commerce::prelude::*;

use super::{ProductArgs, ProductsArgs};
use crate::context::Context;
use crate::output::{price_label, rating_stars};

/// Product page as JSON; a toast raised by `--add` rides along.
#[derive(Serialize)]
struct ProductView<'a> {
    #[serde(flatten)]
    product: &'a Product,
    #[serde(skip_serializing_if = "Option::is_none")]
    notification: Option<Notification>,
}

#[derive(Serialize)]
struct ListingView<'a> {
    query: &'a str,
    sort: SortOption,
    products: Vec<&'a Product>,
}

/// Home page: the filtered, sorted product grid.
pub async fn list(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let products = ctx.load_products().await?;
    let params = ListingParams::new()
        .with_query(args.query.clone())
        .with_sort(args.sort);
    let view = params.apply(&products);

    tracing::debug!(
        total = products.len(),
        shown = view.len(),
        sort = %args.sort,
        "rendered listing"
    );

    if ctx.output.is_json() {
        ctx.output.json(&ListingView {
            query: &args.query,
            sort: args.sort,
            products: view,
        });
        return Ok(());
    }

    ctx.output.header(&format!("Products ({})", args.sort.display_name()));
    if view.is_empty() {
        ctx.output.info("No products found.");
        return Ok(());
    }

    for product in view {
        ctx.output.table_row(
            &[
                product.id.as_str(),
                &product.title,
                &rating_stars(product.rating),
                &price_label(product),
            ],
            &[38, 28, 5, 0],
        );
    }
    Ok(())
}

/// Product page: one product with its reviews.
pub async fn show(args: ProductArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let id = ProductId::new(args.id);

    let spinner = ctx.output.spinner("Loading product...");
    let mut page = PageLoader::new();
    let ticket = page.begin();
    page.settle(ticket, catalog.get_product(&id).await);
    spinner.finish_and_clear();

    let product = match page.into_state() {
        PageState::Ready(product) => product,
        PageState::Failed(message) => anyhow::bail!(message),
        _ => anyhow::bail!("Product not found"),
    };

    if args.add {
        let cart = ctx.cart()?;
        cart.add_item(&product);
        ctx.notifications.success(ADDED_TO_CART_MESSAGE);
    }

    if ctx.output.is_json() {
        ctx.output.json(&ProductView {
            product: &product,
            notification: ctx.take_notification(),
        });
        return Ok(());
    }

    ctx.output.header(&product.title);
    ctx.output.kv("Price", &price_label(&product));
    ctx.output.kv(
        "Rating",
        &format!("{} ({:.1})", rating_stars(product.rating), product.rating),
    );
    if !product.tags.is_empty() {
        ctx.output.kv("Tags", &product.tags.join(", "));
    }
    ctx.output.kv("Image", &format!("{} ({})", product.image.url, product.image_alt()));
    if !product.description.is_empty() {
        ctx.output.info("");
        ctx.output.info(&product.description);
    }

    ctx.output.header(&format!("Reviews ({})", product.review_count()));
    if product.reviews.is_empty() {
        ctx.output.info("No reviews yet.");
    }
    for review in &product.reviews {
        ctx.output.list_item(&format!(
            "{} {}: {}",
            rating_stars(review.rating),
            style(&review.username).bold(),
            review.description
        ));
    }

    ctx.flush_notification();
    Ok(())
}
