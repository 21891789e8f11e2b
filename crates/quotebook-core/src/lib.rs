//! quotebook-core - Core library for quotebook
//!
//! This crate contains the quote model, the persisted store, and the remote
//! reconciliation flow used by every quotebook client.

pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod state;
pub mod store;
pub mod sync;
pub mod util;

pub use error::{Error, Result};
pub use models::{ConflictRecord, Quote, ResolutionStrategy};
pub use store::Store;
