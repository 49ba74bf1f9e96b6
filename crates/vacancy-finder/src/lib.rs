//! Job-posting retrieval, normalization and a JSON-backed vacancy store.

pub mod config;
pub mod error;
pub mod sources;
pub mod storage;
pub mod telemetry;
pub mod vacancy;

pub use sources::{HeadHunterClient, SourceError, VacancySource};
pub use storage::{
    InMemoryVacancyStore, JsonVacancyStore, StoreError, VacancyIdentifier, VacancyStore,
};
pub use vacancy::{PersistedVacancy, SortOrder, Vacancy};
