use std::path::Path;

use quotebook_core::models::CategoryFilter;

use crate::commands::common::{format_quote_lines, open_local_quote_book, quote_to_list_item};
use crate::error::CliError;

pub fn run_list(category: Option<&str>, json: bool, db_path: &Path) -> Result<(), CliError> {
    let book = open_local_quote_book(db_path)?;
    let filter = category.map_or(CategoryFilter::All, CategoryFilter::parse);

    // Positions stay those of the full store so `delete` and `publish` accept them.
    let matching: Vec<_> = book
        .store()
        .quotes()
        .iter()
        .enumerate()
        .filter(|(_, quote)| filter.matches(quote))
        .map(|(index, quote)| (index + 1, quote))
        .collect();

    if json {
        let items = matching
            .iter()
            .map(|(position, quote)| quote_to_list_item(*position, quote))
            .collect::<Vec<_>>();
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    if matching.is_empty() {
        println!("No quotes found.");
        return Ok(());
    }

    for line in format_quote_lines(matching) {
        println!("{line}");
    }

    Ok(())
}
