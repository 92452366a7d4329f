//! Non-interactive item commands.

use anyhow::{bail, Context, Result};

use crate::context::AppContext;
use crate::render::print_list;

/// Item URLs must be absolute http(s) links.
pub fn check_item_url(url: &str) -> Result<()> {
    if !url.trim().starts_with("http") {
        bail!("올바른 URL을 입력해주세요. (http:// 또는 https://로 시작)");
    }
    Ok(())
}

pub async fn add(
    ctx: &AppContext,
    id: &str,
    url: &str,
    comment: Option<&str>,
    high: bool,
) -> Result<()> {
    check_item_url(url)?;

    let priority = if high { Some(1) } else { None };
    let list = ctx
        .client
        .add_item(id, url.trim(), comment, priority)
        .await
        .context("Failed to add item")?;

    if let Some(item) = list.items.last() {
        ctx.print_success(&format!("✓ Added {}", item.title));
    }
    if !ctx.quiet {
        print_list(&list);
    }
    Ok(())
}

pub async fn remove(ctx: &AppContext, id: &str, item_id: &str) -> Result<()> {
    let list = ctx
        .client
        .remove_item(id, item_id)
        .await
        .context("Failed to remove item")?;

    ctx.print_success("✓ Item removed");
    if !ctx.quiet {
        print_list(&list);
    }
    Ok(())
}
