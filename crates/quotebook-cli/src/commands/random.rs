use std::path::Path;

use quotebook_core::models::CategoryFilter;

use crate::commands::common::{format_quote_card, open_local_quote_book};
use crate::error::CliError;

/// Show a random quote. An explicit category also becomes the saved filter.
pub fn run_random(category: Option<&str>, json: bool, db_path: &Path) -> Result<(), CliError> {
    let book = open_local_quote_book(db_path)?;
    let filter = match category {
        Some(value) => {
            let filter = CategoryFilter::parse(value);
            book.select_filter(&filter)?;
            filter
        }
        None => book.current_filter(),
    };

    match book.random_quote_in(&filter)? {
        Some(quote) if json => println!("{}", serde_json::to_string_pretty(&quote)?),
        Some(quote) => println!("{}", format_quote_card(&quote)),
        None => println!("No quotes available for this category."),
    }

    Ok(())
}
