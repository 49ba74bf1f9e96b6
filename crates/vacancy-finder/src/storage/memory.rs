use std::sync::{Mutex, MutexGuard};

use super::{StoreError, VacancyIdentifier, VacancyStore};
use crate::vacancy::{PersistedVacancy, Vacancy};

/// Process-local store with the same upsert and delete semantics as
/// [`JsonVacancyStore`](super::JsonVacancyStore). Only the persisted fields
/// are kept, so listed vacancies carry no source payload.
#[derive(Debug, Default)]
pub struct InMemoryVacancyStore {
    entries: Mutex<Vec<PersistedVacancy>>,
}

impl InMemoryVacancyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entries(&self) -> Result<MutexGuard<'_, Vec<PersistedVacancy>>, StoreError> {
        self.entries
            .lock()
            .map_err(|_| StoreError::Unavailable("store mutex poisoned".to_string()))
    }
}

impl VacancyStore for InMemoryVacancyStore {
    fn add_or_update(&self, vacancy: &Vacancy) -> Result<(), StoreError> {
        let mut entries = self.entries()?;
        let entry = vacancy.to_persisted_form();
        match entries.iter_mut().find(|existing| existing.url == entry.url) {
            Some(existing) => *existing = entry,
            None => entries.push(entry),
        }
        Ok(())
    }

    fn list(
        &self,
        predicate: Option<&dyn Fn(&Vacancy) -> bool>,
    ) -> Result<Vec<Vacancy>, StoreError> {
        let entries = self.entries()?;
        Ok(entries
            .iter()
            .cloned()
            .map(Vacancy::from)
            .filter(|vacancy| predicate.map_or(true, |predicate| predicate(vacancy)))
            .collect())
    }

    fn delete(&self, identifier: &VacancyIdentifier) -> Result<bool, StoreError> {
        let mut entries = self.entries()?;
        let before = entries.len();
        entries.retain(|entry| !identifier.matches_entry(entry));
        Ok(entries.len() < before)
    }
}
