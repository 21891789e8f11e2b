use std::path::Path;

use quotebook_core::models::CategoryFilter;

use crate::commands::common::open_local_quote_book;
use crate::error::CliError;

/// Print the saved filter, or replace it when `category` is given
pub fn run_filter(category: Option<&str>, db_path: &Path) -> Result<(), CliError> {
    let book = open_local_quote_book(db_path)?;

    if let Some(value) = category {
        let filter = CategoryFilter::parse(value);
        if let CategoryFilter::Category(name) = &filter {
            if !book.categories().contains(name) {
                tracing::warn!("No quotes in category '{name}' yet");
            }
        }
        book.select_filter(&filter)?;
    }

    println!("{}", book.current_filter());
    Ok(())
}
