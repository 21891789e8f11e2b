//! Persistence layer for quotebook

mod connection;
mod migrations;
mod provider;

pub use connection::Database;
pub use provider::{
    MemoryProvider, PersistenceProvider, LAST_CATEGORY_KEY, LAST_VIEWED_KEY, QUOTES_KEY,
};
