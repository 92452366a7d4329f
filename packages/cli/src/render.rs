//! Plain-text rendering of lists and items.

use colored::Colorize;
use wishpocket_client::{WishItem, WishList};

/// `"129000"` -> `"₩129,000"`. Non-numeric prices are shown as-is.
pub fn format_price(price: &str) -> String {
    let digits = price.trim();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return digits.to_string();
    }

    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return "₩0".to_string();
    }

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("₩{}", grouped)
}

pub fn print_list(list: &WishList) {
    println!();
    println!(
        "{} {}",
        format!("🎁 {}의 위시리스트", list.owner).bright_cyan().bold(),
        format!("({})", list.birthday).dimmed()
    );

    if list.items.is_empty() {
        println!("{}", "  아직 담긴 상품이 없습니다.".dimmed());
        return;
    }

    for (index, item) in list.items.iter().enumerate() {
        print_item(index + 1, item);
    }
}

fn print_item(number: usize, item: &WishItem) {
    let marker = if item.is_high_priority() { "★" } else { " " };
    println!();
    println!("{} {}. {}", marker.yellow(), number, item.title.bold());

    let mut meta = vec![format_price(&item.price).bright_white().to_string()];
    if !item.site_name.is_empty() {
        meta.push(item.site_name.dimmed().to_string());
    }
    println!("     {}", meta.join("  ·  "));

    if let Some(comment) = &item.comment {
        println!("     {}", format!("\"{}\"", comment).italic());
    }
    println!("     {}", item.url.blue().underline());
}

/// One-line label used in selection menus.
pub fn item_label(item: &WishItem) -> String {
    format!("{} ({})", item.title, format_price(&item.price))
}
