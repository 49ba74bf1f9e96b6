use std::io::{self, BufRead, Write};

use tracing::{info, warn};
use vacancy_finder::error::AppError;
use vacancy_finder::vacancy::{filter_by_keywords, filter_by_salary_range, top_by_salary};
use vacancy_finder::{StoreError, Vacancy, VacancyIdentifier, VacancySource, VacancyStore};

use crate::render::{link_line, salary_line, write_vacancies};

/// Page settings applied to every fetch started from the menu.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FetchSettings {
    pub(crate) per_page: u32,
    pub(crate) pages: u32,
}

/// Fetches listings for `query`, normalizes them and upserts each one.
/// Returns how many vacancies were written.
pub(crate) fn import_vacancies(
    source: &dyn VacancySource,
    store: &dyn VacancyStore,
    query: &str,
    settings: FetchSettings,
) -> Result<usize, AppError> {
    let raw = source.fetch(query, settings.per_page, settings.pages)?;
    let vacancies = Vacancy::from_source_items(&raw);
    for vacancy in &vacancies {
        store.add_or_update(vacancy)?;
    }
    info!(query, saved = vacancies.len(), "imported vacancies");
    Ok(vacancies.len())
}

pub(crate) fn top_vacancies(
    store: &dyn VacancyStore,
    count: usize,
) -> Result<Vec<Vacancy>, StoreError> {
    Ok(top_by_salary(&store.list(None)?, count))
}

pub(crate) fn search_vacancies<S: AsRef<str>>(
    store: &dyn VacancyStore,
    keywords: &[S],
) -> Result<Vec<Vacancy>, StoreError> {
    Ok(filter_by_keywords(&store.list(None)?, keywords))
}

/// Zero bounds count as "no bound", matching how the menu has always read
/// an empty salary field.
pub(crate) fn vacancies_in_salary_range(
    store: &dyn VacancyStore,
    min: Option<u64>,
    max: Option<u64>,
) -> Result<Vec<Vacancy>, StoreError> {
    let min = min.filter(|bound| *bound > 0);
    let max = max.filter(|bound| *bound > 0);
    Ok(filter_by_salary_range(&store.list(None)?, min, max))
}

pub(crate) fn delete_vacancy(store: &dyn VacancyStore, identifier: &str) -> Result<bool, StoreError> {
    store.delete(&VacancyIdentifier::UrlOrTitle(identifier.trim().to_string()))
}

pub(crate) fn deletion_message(removed: bool) -> &'static str {
    if removed {
        "Deleted."
    } else {
        "Not found."
    }
}

/// Blank input means "no bound".
fn parse_bound(raw: &str) -> Result<Option<u64>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<u64>()
        .map(Some)
        .map_err(|_| format!("'{raw}' is not a valid salary"))
}

/// Interactive menu reading choices line by line until "7" or end of input.
pub(crate) struct Shell<'a, R, W> {
    store: &'a dyn VacancyStore,
    source: &'a dyn VacancySource,
    settings: FetchSettings,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub(crate) fn new(
        store: &'a dyn VacancyStore,
        source: &'a dyn VacancySource,
        settings: FetchSettings,
        input: R,
        output: W,
    ) -> Self {
        Self {
            store,
            source,
            settings,
            input,
            output,
        }
    }

    pub(crate) fn run(&mut self) -> Result<(), AppError> {
        writeln!(self.output, "=== hh.ru vacancy search ===")?;

        loop {
            self.print_menu()?;
            let Some(choice) = self.prompt("Choose an action: ")? else {
                break;
            };

            match choice.as_str() {
                "1" => self.fetch()?,
                "2" => self.show_saved()?,
                "3" => self.show_top()?,
                "4" => self.search()?,
                "5" => self.salary_range()?,
                "6" => self.delete()?,
                "7" => break,
                _ => writeln!(self.output, "Unknown choice.")?,
            }
        }

        Ok(())
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "1. Fetch vacancies from hh.ru")?;
        writeln!(self.output, "2. Show saved vacancies")?;
        writeln!(self.output, "3. Top N by salary")?;
        writeln!(self.output, "4. Filter by keywords")?;
        writeln!(self.output, "5. Filter by salary range")?;
        writeln!(self.output, "6. Delete a vacancy")?;
        writeln!(self.output, "7. Exit")
    }

    /// `None` once the input is exhausted.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn fetch(&mut self) -> Result<(), AppError> {
        let Some(query) = self.prompt("Search query: ")? else {
            return Ok(());
        };

        match import_vacancies(self.source, self.store, &query, self.settings) {
            Ok(saved) => writeln!(self.output, "Saved {saved} vacancies.")?,
            Err(AppError::Source(err)) => {
                warn!(error = %err, "fetch failed");
                writeln!(self.output, "Fetch failed: {err}")?;
            }
            Err(err) => return Err(err),
        }
        Ok(())
    }

    fn show_saved(&mut self) -> Result<(), AppError> {
        let vacancies = self.store.list(None)?;
        write_vacancies(&mut self.output, &vacancies, salary_line)?;
        Ok(())
    }

    fn show_top(&mut self) -> Result<(), AppError> {
        let Some(raw) = self.prompt("How many: ")? else {
            return Ok(());
        };

        match raw.parse::<usize>() {
            Ok(count) => {
                let vacancies = top_vacancies(self.store, count)?;
                write_vacancies(&mut self.output, &vacancies, salary_line)?;
            }
            Err(_) => writeln!(self.output, "'{raw}' is not a valid number.")?,
        }
        Ok(())
    }

    fn search(&mut self) -> Result<(), AppError> {
        let Some(raw) = self.prompt("Keywords: ")? else {
            return Ok(());
        };

        let keywords: Vec<&str> = raw.split_whitespace().collect();
        let vacancies = search_vacancies(self.store, &keywords)?;
        write_vacancies(&mut self.output, &vacancies, link_line)?;
        Ok(())
    }

    fn salary_range(&mut self) -> Result<(), AppError> {
        let Some(raw_min) = self.prompt("Minimum salary: ")? else {
            return Ok(());
        };
        let Some(raw_max) = self.prompt("Maximum salary: ")? else {
            return Ok(());
        };

        match (parse_bound(&raw_min), parse_bound(&raw_max)) {
            (Ok(min), Ok(max)) => {
                let vacancies = vacancies_in_salary_range(self.store, min, max)?;
                write_vacancies(&mut self.output, &vacancies, salary_line)?;
            }
            (Err(message), _) | (_, Err(message)) => writeln!(self.output, "{message}")?,
        }
        Ok(())
    }

    fn delete(&mut self) -> Result<(), AppError> {
        let Some(identifier) = self.prompt("URL or title to delete: ")? else {
            return Ok(());
        };

        let removed = delete_vacancy(self.store, &identifier)?;
        writeln!(self.output, "{}", deletion_message(removed))?;
        Ok(())
    }
}
