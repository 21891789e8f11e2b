use std::path::Path;

use quotebook_core::models::category_label;

use crate::commands::common::open_local_quote_book;
use crate::error::CliError;

pub fn run_categories(json: bool, db_path: &Path) -> Result<(), CliError> {
    let book = open_local_quote_book(db_path)?;
    let categories = book.categories();

    if json {
        println!("{}", serde_json::to_string_pretty(&categories)?);
        return Ok(());
    }

    let selected = book.current_filter();
    for category in &categories {
        let marker = if selected.as_str() == category.as_str() { "*" } else { " " };
        println!("{marker} {category:<16} {}", category_label(category));
    }

    Ok(())
}
