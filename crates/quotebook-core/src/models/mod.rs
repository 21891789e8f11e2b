//! Data models for quotebook

mod conflict;
mod filter;
mod quote;

pub use conflict::{ConflictRecord, Resolution, ResolutionStrategy};
pub use filter::CategoryFilter;
pub use quote::{category_label, default_quotes, Quote, UNKNOWN_AUTHOR};
