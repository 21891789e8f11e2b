use std::path::Path;


use crate::commands::common::{format_quote_card, open_local_quote_book};
use crate::error::CliError;

pub fn run_add(
    text_parts: &[String],
    category: &str,
    author: Option<&str>,
    db_path: &Path,
) -> Result<(), CliError> {
    let text = text_parts.join(" ");

    let mut book = open_local_quote_book(db_path)?;
    let quote = book.add_quote(&text, category, author)?;

    println!("{}", format_quote_card(quote));
    Ok(())
}
