//! Recently viewed commands.

use super::{CommandError, Context};

/// Print the recently viewed list.
///
/// # Errors
///
/// Returns `CommandError::Storage` if the data directory cannot be read.
#[allow(clippy::print_stdout)]
pub fn list(ctx: &Context) -> Result<(), CommandError> {
    let entries = ctx.recent.list()?;
    if entries.is_empty() {
        println!("Nothing viewed yet");
    }
    for entry in entries {
        println!("{:>5}  {:<32} /products/{}", entry.id, entry.name, entry.slug);
    }
    Ok(())
}

/// Forget the recently viewed list.
///
/// # Errors
///
/// Returns `CommandError::Storage` if the data directory cannot be written.
pub fn clear(ctx: &Context) -> Result<(), CommandError> {
    ctx.recent.clear()?;
    tracing::info!("Recently viewed list cleared");
    Ok(())
}
