//! Cart commands.

use bazaar_core::{ProductId, Size};
use bazaar_storefront::models::CartItem;

use super::{CommandError, Context};

/// Print the cart and its checkout summary.
///
/// # Errors
///
/// Returns `CommandError::Cart` if the cart cannot be read.
#[allow(clippy::print_stdout)]
pub fn list(ctx: &Context) -> Result<(), CommandError> {
    let summary = ctx.cart.summary(&ctx.shipping)?;
    if summary.items.is_empty() {
        println!("Cart is empty");
        return Ok(());
    }

    print_lines(&summary.items);
    println!();
    println!("  subtotal  {}", summary.subtotal);
    println!("  shipping  {}", summary.shipping);
    println!("  total     {}", summary.total);
    if let Some(remaining) = summary.remaining_for_free_shipping {
        println!("  {remaining} more for free shipping");
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_lines(items: &[CartItem]) {
    for (index, item) in items.iter().enumerate() {
        let size = item
            .selected_size
            .map_or_else(String::new, |size| format!(" [{size}]"));
        println!(
            "{index:>3}  {}{size} x{}  {}",
            item.name,
            item.quantity,
            item.line_total()
        );
    }
}

/// Add a product to the cart.
///
/// With `quick`, sized products go in without a size, as from a listing card.
///
/// # Errors
///
/// Returns `CommandError` for an unknown product, an invalid size, or a cart failure.
pub fn add(
    ctx: &Context,
    product_id: i64,
    quantity: u32,
    size: Option<&str>,
    quick: bool,
) -> Result<(), CommandError> {
    let product = ctx
        .catalog
        .find_by_id(ProductId::new(product_id))
        .ok_or_else(|| CommandError::ProductNotFound(product_id.to_string()))?;
    if quick {
        print_lines(&ctx.cart.quick_add(product, quantity)?);
        return Ok(());
    }
    let size = size
        .map(str::parse::<Size>)
        .transpose()
        .map_err(|e| CommandError::InvalidSize(e.to_string()))?;

    let items = ctx.cart.add(product, quantity, size)?;
    print_lines(&items);
    Ok(())
}

/// Which line operation to apply.
#[derive(Debug, Clone, Copy)]
pub enum LineAction {
    Increase,
    Decrease,
    Remove,
}

/// Change one cart line by index.
///
/// # Errors
///
/// Returns `CommandError::Cart` for a bad index or a cart failure.
pub fn update(ctx: &Context, action: LineAction, index: usize) -> Result<(), CommandError> {
    let items = match action {
        LineAction::Increase => ctx.cart.increase(index)?,
        LineAction::Decrease => ctx.cart.decrease(index)?.items,
        LineAction::Remove => ctx.cart.remove(index)?,
    };
    print_lines(&items);
    Ok(())
}

/// Empty the cart.
///
/// # Errors
///
/// Returns `CommandError::Cart` if the cart cannot be written.
pub fn clear(ctx: &Context) -> Result<(), CommandError> {
    ctx.cart.clear()?;
    tracing::info!("Cart cleared");
    Ok(())
}
