use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info, warn};

use super::{StoreError, VacancyIdentifier, VacancyStore};
use crate::vacancy::Vacancy;

/// Vacancy store backed by a single pretty-printed JSON array.
///
/// Every operation reads the whole file and, when it changes anything,
/// rewrites the whole file. No handle is kept open between calls and nothing
/// guards against a second process writing the same file.
#[derive(Debug, Clone)]
pub struct JsonVacancyStore {
    path: PathBuf,
}

impl JsonVacancyStore {
    /// Opens the store, creating an empty collection when the file is
    /// missing. An existing file is left untouched.
    pub fn open<P: Into<PathBuf>>(path: P) -> Result<Self, StoreError> {
        let store = Self { path: path.into() };

        if !store.path.exists() {
            if let Some(parent) = store
                .path
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
            {
                fs::create_dir_all(parent).map_err(|source| store.io_error(source))?;
            }
            store.write_entries(&[])?;
            info!(path = %store.path.display(), "created empty vacancy store");
        }

        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Unreadable content degrades to an empty collection.
    fn read_entries(&self) -> Result<Vec<Value>, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(self.io_error(source)),
        };

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Array(entries)) => Ok(entries),
            Ok(_) => {
                warn!(path = %self.path.display(), "vacancy store is not a JSON array; treating as empty");
                Ok(Vec::new())
            }
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "vacancy store is unreadable; treating as empty");
                Ok(Vec::new())
            }
        }
    }

    fn write_entries(&self, entries: &[Value]) -> Result<(), StoreError> {
        let mut body = serde_json::to_string_pretty(entries)?;
        body.push('\n');
        fs::write(&self.path, body).map_err(|source| self.io_error(source))
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl VacancyStore for JsonVacancyStore {
    fn add_or_update(&self, vacancy: &Vacancy) -> Result<(), StoreError> {
        let mut entries = self.read_entries()?;
        let entry = serde_json::to_value(vacancy.to_persisted_form())?;

        match entries
            .iter()
            .position(|existing| entry_text(existing, "url") == Some(vacancy.url()))
        {
            Some(index) => {
                entries[index] = entry;
                debug!(url = vacancy.url(), "updated stored vacancy");
            }
            None => {
                entries.push(entry);
                debug!(url = vacancy.url(), "appended vacancy");
            }
        }

        self.write_entries(&entries)
    }

    fn list(
        &self,
        predicate: Option<&dyn Fn(&Vacancy) -> bool>,
    ) -> Result<Vec<Vacancy>, StoreError> {
        let entries = self.read_entries()?;
        let vacancies = entries
            .iter()
            .filter(|entry| entry.is_object())
            .map(Vacancy::from_persisted_entry);

        Ok(match predicate {
            Some(predicate) => vacancies.filter(|vacancy| predicate(vacancy)).collect(),
            None => vacancies.collect(),
        })
    }

    fn delete(&self, identifier: &VacancyIdentifier) -> Result<bool, StoreError> {
        let mut entries = self.read_entries()?;
        let before = entries.len();

        entries.retain(|entry| {
            !identifier.matches(entry_text(entry, "url"), entry_text(entry, "title"))
        });
        self.write_entries(&entries)?;

        let removed = before - entries.len();
        info!(removed, remaining = entries.len(), "deleted vacancies");
        Ok(removed > 0)
    }
}

fn entry_text<'a>(entry: &'a Value, key: &str) -> Option<&'a str> {
    entry.get(key).and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> JsonVacancyStore {
        JsonVacancyStore::open(dir.path().join("vacancies.json")).expect("store opens")
    }

    fn python_dev() -> Vacancy {
        Vacancy::new("Python Dev", "url1", "desc python")
            .with_salary(Some(100_000), Some(150_000))
            .with_currency("RUR")
    }

    #[test]
    fn open_creates_empty_array() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);
        let body = fs::read_to_string(store.path()).expect("file created");
        assert_eq!(body.trim(), "[]");
    }

    #[test]
    fn open_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("deeper").join("store.json");
        let store = JsonVacancyStore::open(&path).expect("store opens");
        assert!(store.path().exists());
    }

    #[test]
    fn open_keeps_existing_content() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("vacancies.json");
        fs::write(&path, "not json at all").expect("seed file");

        let store = JsonVacancyStore::open(&path).expect("store opens");
        assert_eq!(
            fs::read_to_string(store.path()).expect("file readable"),
            "not json at all"
        );
    }

    #[test]
    fn corrupt_file_reads_as_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("vacancies.json");
        fs::write(&path, "{\"title\": ").expect("seed file");
        let store = JsonVacancyStore::open(&path).expect("store opens");

        assert!(store.list(None).expect("list recovers").is_empty());

        fs::write(&path, b"\xff\xfe\x00").expect("seed binary");
        assert!(store.list(None).expect("list recovers").is_empty());

        fs::write(&path, "{\"title\": \"object, not array\"}").expect("seed object");
        assert!(store.list(None).expect("list recovers").is_empty());
    }

    #[test]
    fn update_replaces_in_place() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);

        store.add_or_update(&python_dev()).expect("add first");
        store
            .add_or_update(&Vacancy::new("QA", "url2", "testing"))
            .expect("add second");
        store
            .add_or_update(&Vacancy::new("Senior Python Dev", "url1", "updated"))
            .expect("update first");

        let stored = store.list(None).expect("list");
        let titles: Vec<&str> = stored.iter().map(Vacancy::title).collect();
        assert_eq!(titles, vec!["Senior Python Dev", "QA"]);
        assert_eq!(stored[0].salary_from(), 0);
    }

    #[test]
    fn delete_by_title_and_unknown_identifier() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);
        store.add_or_update(&python_dev()).expect("add");

        let missing = VacancyIdentifier::Title("Rust Dev".to_string());
        assert!(!store.delete(&missing).expect("delete runs"));
        assert_eq!(store.list(None).expect("list").len(), 1);

        let title = VacancyIdentifier::Title("Python Dev".to_string());
        assert!(store.delete(&title).expect("delete runs"));
        assert!(store.list(None).expect("list").is_empty());
    }

    #[test]
    fn non_ascii_text_is_written_unescaped() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);
        store
            .add_or_update(&Vacancy::new("Разработчик", "https://hh.ru/vacancy/5", "Опыт"))
            .expect("add");

        let body = fs::read_to_string(store.path()).expect("readable");
        assert!(body.contains("Разработчик"));
        assert!(!body.contains("\\u"));
    }

    #[test]
    fn unknown_entries_survive_rewrites() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("vacancies.json");
        fs::write(&path, "[42, {\"title\": \"Kept\", \"url\": \"k\", \"note\": \"x\"}]")
            .expect("seed file");
        let store = JsonVacancyStore::open(&path).expect("store opens");

        store
            .add_or_update(&Vacancy::new("New", "n", ""))
            .expect("add");

        let raw: Value =
            serde_json::from_str(&fs::read_to_string(&path).expect("readable")).expect("json");
        let entries = raw.as_array().expect("array");
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0], Value::from(42));
        assert_eq!(entries[1]["note"], "x");

        let listed = store.list(None).expect("list");
        assert_eq!(listed.len(), 2);
    }
}
