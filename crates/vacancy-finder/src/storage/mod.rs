//! Durable vacancy collections keyed by posting URL.

mod json;
mod memory;

use std::path::PathBuf;

use crate::vacancy::{PersistedVacancy, Vacancy};

pub use json::JsonVacancyStore;
pub use memory::InMemoryVacancyStore;

/// Storage abstraction so the shell can run against the JSON file or an
/// in-memory collection.
pub trait VacancyStore {
    /// Replaces the entry sharing the vacancy's URL in place, or appends.
    fn add_or_update(&self, vacancy: &Vacancy) -> Result<(), StoreError>;
    /// Returns stored vacancies in storage order, optionally filtered.
    fn list(&self, predicate: Option<&dyn Fn(&Vacancy) -> bool>)
        -> Result<Vec<Vacancy>, StoreError>;
    /// Removes every matching entry; `true` when anything was removed.
    fn delete(&self, identifier: &VacancyIdentifier) -> Result<bool, StoreError>;
}

/// Selects the entries removed by [`VacancyStore::delete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VacancyIdentifier {
    Url(String),
    Title(String),
    /// Free-form text typed by a user: matches either the URL or the title.
    UrlOrTitle(String),
}

impl VacancyIdentifier {
    pub(crate) fn matches(&self, url: Option<&str>, title: Option<&str>) -> bool {
        match self {
            VacancyIdentifier::Url(value) => url == Some(value.as_str()),
            VacancyIdentifier::Title(value) => title == Some(value.as_str()),
            VacancyIdentifier::UrlOrTitle(value) => {
                url == Some(value.as_str()) || title == Some(value.as_str())
            }
        }
    }

    pub(crate) fn matches_entry(&self, entry: &PersistedVacancy) -> bool {
        self.matches(Some(&entry.url), Some(&entry.title))
    }
}

impl From<&Vacancy> for VacancyIdentifier {
    fn from(vacancy: &Vacancy) -> Self {
        VacancyIdentifier::Url(vacancy.url().to_string())
    }
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to access vacancy store {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize vacancies: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
