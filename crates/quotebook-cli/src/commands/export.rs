use std::path::Path;

use quotebook_core::export::EXPORT_FILE_NAME;

use crate::commands::common::open_local_quote_book;
use crate::error::CliError;

pub fn run_export(
    output_path: Option<&Path>,
    to_stdout: bool,
    db_path: &Path,
) -> Result<(), CliError> {
    let book = open_local_quote_book(db_path)?;
    let rendered = book.export_json()?;

    if to_stdout {
        println!("{rendered}");
        return Ok(());
    }

    let path = output_path.unwrap_or_else(|| Path::new(EXPORT_FILE_NAME));
    std::fs::write(path, rendered)?;
    println!("{}", path.display());
    Ok(())
}
