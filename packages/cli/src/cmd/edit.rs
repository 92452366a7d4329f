//! Interactive list editor.

use anyhow::{Context, Result};
use colored::Colorize;
use console::Term;
use dialoguer::{Input, Select};
use wishpocket_client::WishList;

use crate::cmd::items::check_item_url;
use crate::context::AppContext;
use crate::render::{item_label, print_list};

pub async fn run(ctx: &AppContext, id: &str) -> Result<()> {
    let term = Term::stdout();
    let mut list = ctx
        .client
        .get_list(id)
        .await
        .with_context(|| format!("Failed to load list {}", id))?;

    loop {
        print_list(&list);
        println!();

        let options = vec![
            "➕ Add item by URL",
            "🗑  Remove item",
            "🔗 Show share link",
            "🔄 Reload",
            "🛑 Exit",
        ];

        let selection = Select::with_theme(&ctx.theme())
            .with_prompt("What would you like to do?")
            .items(&options)
            .default(0)
            .interact_on(&term)?;

        match selection {
            0 => {
                if let Some(updated) = add_item(ctx, &list).await? {
                    list = updated;
                }
            }
            1 => {
                if let Some(updated) = remove_item(ctx, &list).await? {
                    list = updated;
                }
            }
            2 => {
                ctx.print_header("Share this link");
                println!("{}", ctx.share_link(&list.id).bright_green());
            }
            3 => {
                list = ctx
                    .client
                    .get_list(&list.id)
                    .await
                    .context("Failed to reload list")?;
            }
            4 => {
                println!("{}", "👋 Goodbye!".bright_blue());
                break;
            }
            _ => unreachable!(),
        }
    }

    Ok(())
}

async fn add_item(ctx: &AppContext, list: &WishList) -> Result<Option<WishList>> {
    let url: String = Input::with_theme(&ctx.theme())
        .with_prompt("Product URL")
        .interact_text()?;

    if let Err(e) = check_item_url(&url) {
        ctx.print_warning(&e.to_string());
        return Ok(None);
    }

    let comment: String = Input::with_theme(&ctx.theme())
        .with_prompt("Comment (optional)")
        .allow_empty(true)
        .interact_text()?;
    let comment = Some(comment.trim()).filter(|c| !c.is_empty());

    println!("{}", "상품 정보를 가져오는 중...".dimmed());
    match ctx.client.add_item(&list.id, url.trim(), comment, None).await {
        Ok(updated) => {
            if let Some(item) = updated.items.last() {
                ctx.print_success(&format!("✓ Added {}", item.title));
            }
            Ok(Some(updated))
        }
        Err(e) => {
            ctx.print_warning(&format!("상품 정보를 가져오지 못했습니다: {}", e));
            Ok(None)
        }
    }
}

async fn remove_item(ctx: &AppContext, list: &WishList) -> Result<Option<WishList>> {
    if list.items.is_empty() {
        ctx.print_warning("Nothing to remove");
        return Ok(None);
    }

    let labels: Vec<String> = list.items.iter().map(item_label).collect();
    let index = Select::with_theme(&ctx.theme())
        .with_prompt("Which item?")
        .items(&labels)
        .default(0)
        .interact()?;

    let item = &list.items[index];
    if !ctx.confirm(&format!("이 상품을 삭제할까요? {}", item.title), false)? {
        return Ok(None);
    }

    let updated = ctx
        .client
        .remove_item(&list.id, &item.id)
        .await
        .context("Failed to remove item")?;
    ctx.print_success("✓ Item removed");
    Ok(Some(updated))
}
