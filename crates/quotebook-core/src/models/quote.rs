//! Quote model

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// Author label shown when a quote carries no author
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// A quote in the book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Quote content, also the identity key for sync matching
    pub text: String,
    /// Category label
    pub category: String,
    /// Optional author
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Remote record identifier (remote-derived quotes only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
}

impl Quote {
    /// Create a quote with the given text and category
    #[must_use]
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
            author: None,
            id: None,
        }
    }

    /// Attach an author
    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Attach a remote identifier
    #[must_use]
    pub const fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    /// Build a quote from user input.
    ///
    /// Text and category must both be non-blank. Values are kept as entered;
    /// a blank author is treated as absent.
    pub fn from_input(text: &str, category: &str, author: Option<&str>) -> Result<Self> {
        if text.trim().is_empty() || category.trim().is_empty() {
            return Err(Error::Validation(
                "both a quote and a category are required".to_string(),
            ));
        }

        let mut quote = Self::new(text, category);
        quote.author = author
            .filter(|author| !author.trim().is_empty())
            .map(ToString::to_string);
        Ok(quote)
    }

    /// Author name, falling back to "Unknown"
    #[must_use]
    pub fn author_or_unknown(&self) -> &str {
        self.author.as_deref().unwrap_or(UNKNOWN_AUTHOR)
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.text)
    }
}

/// Quotes a brand-new book starts with.
#[must_use]
pub fn default_quotes() -> Vec<Quote> {
    vec![
        Quote::new(
            "The only way to do great work is to love what you do.",
            "inspiration",
        ),
        Quote::new(
            "Life is what happens when you're busy making other plans.",
            "life",
        ),
        Quote::new(
            "The future belongs to those who believe in the beauty of their dreams.",
            "motivation",
        ),
        Quote::new(
            "It is during our darkest moments that we must focus to see the light.",
            "inspiration",
        ),
        Quote::new("Be yourself; everyone else is already taken.", "wisdom"),
        Quote::new(
            "In three words I can sum up everything I've learned about life: it goes on.",
            "life",
        ),
    ]
}

/// Capitalize the first character of a category for display.
#[must_use]
pub fn category_label(category: &str) -> String {
    let mut chars = category.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
