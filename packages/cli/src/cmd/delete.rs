use anyhow::{Context, Result};

use crate::context::AppContext;

pub async fn run(ctx: &AppContext, id: &str) -> Result<()> {
    if !ctx.quiet && !ctx.confirm(&format!("Delete list {}?", id), false)? {
        ctx.print_warning("Cancelled");
        return Ok(());
    }

    ctx.client
        .delete_list(id)
        .await
        .context("Failed to delete list")?;

    ctx.print_success("✓ List deleted");
    Ok(())
}
