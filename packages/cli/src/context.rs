//! Application context with shared state and utilities

use anyhow::Result;
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm};
use wishpocket_client::{edit_link, share_link, WishPocketClient};

/// Application context passed to all commands
pub struct AppContext {
    pub client: WishPocketClient,
    pub share_base: String,
    pub quiet: bool,
}

impl AppContext {
    pub fn new(client: WishPocketClient, share_base: String, quiet: bool) -> Self {
        Self {
            client,
            share_base,
            quiet,
        }
    }

    pub fn share_link(&self, id: &str) -> String {
        share_link(&self.share_base, id)
    }

    pub fn edit_link(&self, id: &str) -> String {
        edit_link(&self.share_base, id)
    }

    pub fn theme(&self) -> ColorfulTheme {
        ColorfulTheme::default()
    }

    pub fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        if self.quiet {
            return Ok(default);
        }
        Ok(Confirm::with_theme(&self.theme())
            .with_prompt(prompt)
            .default(default)
            .interact()?)
    }

    pub fn print_header(&self, msg: &str) {
        if !self.quiet {
            println!();
            println!("{}", style(msg).bold());
        }
    }

    pub fn print_success(&self, msg: &str) {
        if !self.quiet {
            println!("{}", style(msg).green());
        }
    }

    pub fn print_warning(&self, msg: &str) {
        if !self.quiet {
            println!("{}", style(msg).yellow());
        }
    }
}
