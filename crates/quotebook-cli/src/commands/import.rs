use std::path::Path;


use crate::commands::common::open_local_quote_book;
use crate::error::CliError;

pub fn run_import(path: &Path, db_path: &Path) -> Result<(), CliError> {
    let raw = std::fs::read_to_string(path)?;

    let mut book = open_local_quote_book(db_path)?;
    let added = book.import_json(&raw)?;

    println!("Quotes imported successfully! ({added} added)");
    Ok(())
}
