use anyhow::{Context, Result};

use crate::context::AppContext;
use crate::render::print_list;

pub async fn run(ctx: &AppContext, id: &str) -> Result<()> {
    let list = ctx
        .client
        .get_list(id)
        .await
        .with_context(|| format!("Failed to load list {}", id))?;

    print_list(&list);
    Ok(())
}
