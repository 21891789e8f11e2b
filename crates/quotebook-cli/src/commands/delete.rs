use std::path::Path;


use crate::commands::common::{open_local_quote_book, position_to_index};
use crate::error::CliError;

pub fn run_delete(position: usize, db_path: &Path) -> Result<(), CliError> {
    let index = position_to_index(position)?;
    let mut book = open_local_quote_book(db_path)?;
    let removed = book.delete_quote(index)?;

    println!("Deleted {removed}");
    Ok(())
}
