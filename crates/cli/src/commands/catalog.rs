//! Catalog inspection commands.

use bazaar_storefront::catalog::{ListingQuery, Product};

use super::{CommandError, Context};

/// One line per product.
fn product_line(product: &Product) -> String {
    let stock = if product.stock_status.is_available() {
        ""
    } else {
        "  (out of stock)"
    };
    format!(
        "{:>5}  {:<32} {:>12}  {}{stock}",
        product.id,
        product.name,
        product.price.display(),
        product.path()
    )
}

/// Print a page of the product listing.
#[allow(clippy::print_stdout)]
pub fn list(ctx: &Context, category: Option<String>, page: usize) {
    let listing = ctx.catalog.listing(&ListingQuery {
        category,
        q: None,
        page: Some(page),
    });

    for product in &listing.items {
        println!("{}", product_line(product));
    }
    println!(
        "page {}/{} ({} products)",
        listing.page,
        listing.total_pages.max(1),
        listing.total_items
    );
}

/// Print products matching a header search.
#[allow(clippy::print_stdout)]
pub fn search(ctx: &Context, query: &str) {
    let results = ctx.catalog.search(query);
    if results.is_empty() {
        println!("No products match \"{query}\"");
        return;
    }
    for product in results {
        println!("{}", product_line(product));
    }
}

/// Print one product and record it as viewed.
///
/// # Errors
///
/// Returns `CommandError::ProductNotFound` for an unknown slug.
#[allow(clippy::print_stdout)]
pub fn show(ctx: &Context, slug: &str) -> Result<(), CommandError> {
    let product = ctx
        .catalog
        .find_by_slug(slug)
        .ok_or_else(|| CommandError::ProductNotFound(slug.to_string()))?;

    println!("{}", product.name);
    println!("  id:       {}", product.id);
    println!("  price:    {}", product.price.display());
    println!("  category: {}", product.category);
    println!("  image:    {}", product.primary_image());
    if product.requires_size() {
        println!("  sizes:    XS S M L XL XXL");
    }
    if let Some(description) = &product.description {
        println!();
        println!("{description}");
    }

    ctx.recent.record_product(product)?;
    Ok(())
}
