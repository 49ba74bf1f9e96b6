//! Remote listing sources feeding raw items into [`Vacancy::from_source_item`].
//!
//! [`Vacancy::from_source_item`]: crate::vacancy::Vacancy::from_source_item

pub mod hh;

use serde_json::Value;

pub use hh::HeadHunterClient;

/// Anything able to pull raw listing items for a search query.
pub trait VacancySource {
    /// Returns up to `pages` pages of up to `per_page` items, stopping early
    /// when the source reports fewer pages. Items keep the source's shape.
    fn fetch(&self, query: &str, per_page: u32, pages: u32) -> Result<Vec<Value>, SourceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("listing request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("listing source answered {status} for {url}")]
    Status { status: u16, url: String },
    #[error("listing runtime unavailable: {0}")]
    Runtime(String),
}
