//! Quote identity policy used to match local and remote records

use crate::models::Quote;

/// Decides whether two quotes are the same record.
///
/// Detection and merging only ever go through this trait, so the text-based
/// policy can be replaced by a real identifier later.
pub trait QuoteIdentity: Send + Sync {
    fn same_quote(&self, a: &Quote, b: &Quote) -> bool;
}

/// Quotes are the same when their text matches ignoring case
#[derive(Debug, Clone, Copy, Default)]
pub struct CaseInsensitiveText;

impl QuoteIdentity for CaseInsensitiveText {
    fn same_quote(&self, a: &Quote, b: &Quote) -> bool {
        a.text.to_lowercase() == b.text.to_lowercase()
    }
}
