//! JSON import and export of the quote collection.

use crate::error::{Error, Result};
use crate::models::Quote;

/// File name offered for exports
pub const EXPORT_FILE_NAME: &str = "quotes.json";

/// Render quotes as a pretty-printed JSON array.
pub fn render_json_export(quotes: &[Quote]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(quotes)
}

/// Parse an imported file as a JSON array of quotes.
///
/// Any malformed entry rejects the whole file; entries are not checked
/// against existing quotes.
pub fn parse_json_import(raw: &str) -> Result<Vec<Quote>> {
    serde_json::from_str(raw).map_err(|error| Error::ImportParse(error.to_string()))
}
