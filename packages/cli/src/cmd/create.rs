use anyhow::{Context, Result};
use colored::Colorize;
use wishpocket_client::CreateListRequest;

use crate::context::AppContext;

pub async fn run(
    ctx: &AppContext,
    owner: String,
    birthday: String,
    password: Option<String>,
) -> Result<()> {
    let request = CreateListRequest {
        owner,
        birthday,
        password,
    };

    let list = ctx
        .client
        .create_list(&request)
        .await
        .context("Failed to create list")?;

    ctx.print_success(&format!("✓ Created {}'s wishlist", list.owner));
    println!("{} {}", "id:   ".dimmed(), list.id);
    println!("{} {}", "edit: ".dimmed(), ctx.edit_link(&list.id));
    println!("{} {}", "share:".dimmed(), ctx.share_link(&list.id).bright_green());
    Ok(())
}
