use std::path::Path;

use quotebook_core::config::SyncConfig;

use crate::commands::common::{open_quote_book, position_to_index};
use crate::error::CliError;

pub async fn run_publish(
    position: usize,
    db_path: &Path,
    config: &SyncConfig,
) -> Result<(), CliError> {
    let index = position_to_index(position)?;
    let book = open_quote_book(db_path, config)?;
    let response = book.publish(index).await?;

    println!("{response}");
    Ok(())
}
