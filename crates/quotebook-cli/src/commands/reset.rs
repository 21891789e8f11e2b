use std::path::Path;


use crate::commands::common::open_local_quote_book;
use crate::error::CliError;

pub fn run_reset(db_path: &Path) -> Result<(), CliError> {
    let mut book = open_local_quote_book(db_path)?;
    book.reset()?;

    println!("Restored {} default quotes", book.store().len());
    Ok(())
}
