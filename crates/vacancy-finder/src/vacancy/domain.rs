use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A normalized job posting.
///
/// Text fields are trimmed and salary bounds are never negative. When a
/// posting names only one bound, the other one is filled with the same value
/// so the posting reports a flat figure. Equality and ordering compare the
/// [`average_salary`](Vacancy::average_salary) only.
#[derive(Debug, Clone)]
pub struct Vacancy {
    title: String,
    url: String,
    description: String,
    employer: Option<String>,
    salary_from: u64,
    salary_to: u64,
    currency: Option<String>,
    raw: Option<Value>,
}

/// On-disk shape of a [`Vacancy`]. The source payload is never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedVacancy {
    pub title: String,
    pub url: String,
    pub description: String,
    pub employer: Option<String>,
    pub salary_from: u64,
    pub salary_to: u64,
    pub currency: Option<String>,
}

impl Vacancy {
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: trimmed(title.into()),
            url: trimmed(url.into()),
            description: trimmed(description.into()),
            employer: None,
            salary_from: 0,
            salary_to: 0,
            currency: None,
            raw: None,
        }
    }

    pub fn with_employer(mut self, employer: impl Into<String>) -> Self {
        self.employer = Some(employer.into());
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn with_raw(mut self, raw: Value) -> Self {
        self.raw = Some(raw);
        self
    }

    /// Sets both salary bounds. Missing or negative bounds become zero.
    pub fn with_salary(mut self, salary_from: Option<i64>, salary_to: Option<i64>) -> Self {
        let (from, to) = normalize_bounds(
            clamp_salary(salary_from.unwrap_or(0)),
            clamp_salary(salary_to.unwrap_or(0)),
        );
        self.salary_from = from;
        self.salary_to = to;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn employer(&self) -> Option<&str> {
        self.employer.as_deref()
    }

    pub fn salary_from(&self) -> u64 {
        self.salary_from
    }

    pub fn salary_to(&self) -> u64 {
        self.salary_to
    }

    pub fn currency(&self) -> Option<&str> {
        self.currency.as_deref()
    }

    pub fn raw(&self) -> Option<&Value> {
        self.raw.as_ref()
    }

    pub fn average_salary(&self) -> f64 {
        match (self.salary_from, self.salary_to) {
            (0, 0) => 0.0,
            (from, 0) => from as f64,
            (0, to) => to as f64,
            (from, to) => (from as f64 + to as f64) / 2.0,
        }
    }

    pub fn to_persisted_form(&self) -> PersistedVacancy {
        PersistedVacancy {
            title: self.title.clone(),
            url: self.url.clone(),
            description: self.description.clone(),
            employer: self.employer.clone(),
            salary_from: self.salary_from,
            salary_to: self.salary_to,
            currency: self.currency.clone(),
        }
    }

    /// Builds a record from one hh.ru listing item. Missing or mistyped
    /// fields fall back to their defaults; the item itself is kept as `raw`.
    pub fn from_source_item(item: &Value) -> Self {
        let url = match text_field(item, "alternate_url") {
            url if url.is_empty() => text_field(item, "url"),
            url => url,
        };

        let employer = item
            .get("employer")
            .and_then(|employer| employer.get("name"))
            .and_then(Value::as_str)
            .map(str::to_string);

        let description = match item.get("snippet") {
            Some(snippet) => match text_field(snippet, "requirement") {
                requirement if requirement.is_empty() => text_field(snippet, "responsibility"),
                requirement => requirement,
            },
            None => String::new(),
        };

        let (salary_from, salary_to, currency) = match item.get("salary") {
            Some(salary) if salary.is_object() => (
                salary_field(salary, "from"),
                salary_field(salary, "to"),
                optional_text_field(salary, "currency"),
            ),
            _ => (0, 0, None),
        };

        let (salary_from, salary_to) = normalize_bounds(salary_from, salary_to);

        Self {
            title: text_field(item, "name"),
            url,
            description,
            employer,
            salary_from,
            salary_to,
            currency,
            raw: Some(item.clone()),
        }
    }

    pub fn from_source_items(items: &[Value]) -> Vec<Self> {
        items.iter().map(Self::from_source_item).collect()
    }

    /// Rebuilds a record from a stored entry, reading only the persisted keys.
    pub fn from_persisted_entry(entry: &Value) -> Self {
        let (salary_from, salary_to) = normalize_bounds(
            salary_field(entry, "salary_from"),
            salary_field(entry, "salary_to"),
        );

        Self {
            title: text_field(entry, "title"),
            url: text_field(entry, "url"),
            description: text_field(entry, "description"),
            employer: optional_text_field(entry, "employer"),
            salary_from,
            salary_to,
            currency: optional_text_field(entry, "currency"),
            raw: None,
        }
    }
}

impl From<PersistedVacancy> for Vacancy {
    fn from(value: PersistedVacancy) -> Self {
        let (salary_from, salary_to) = normalize_bounds(value.salary_from, value.salary_to);
        Self {
            title: trimmed(value.title),
            url: trimmed(value.url),
            description: trimmed(value.description),
            employer: value.employer,
            salary_from,
            salary_to,
            currency: value.currency,
            raw: None,
        }
    }
}

impl PartialEq for Vacancy {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Vacancy {}

impl PartialOrd for Vacancy {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Vacancy {
    fn cmp(&self, other: &Self) -> Ordering {
        self.average_salary().total_cmp(&other.average_salary())
    }
}

fn trimmed(value: String) -> String {
    value.trim().to_string()
}

fn clamp_salary(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

fn normalize_bounds(from: u64, to: u64) -> (u64, u64) {
    match (from, to) {
        (0, to) if to > 0 => (to, to),
        (from, 0) if from > 0 => (from, from),
        bounds => bounds,
    }
}

fn text_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(|text| text.trim().to_string())
        .unwrap_or_default()
}

fn optional_text_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

fn salary_field(value: &Value, key: &str) -> u64 {
    value.get(key).map(coerce_salary).unwrap_or(0)
}

/// Integers pass through, floats truncate, numeric strings parse; anything
/// else is zero. Negative results clamp to zero.
fn coerce_salary(value: &Value) -> u64 {
    match value {
        Value::Number(number) => {
            if let Some(unsigned) = number.as_u64() {
                unsigned
            } else if let Some(signed) = number.as_i64() {
                clamp_salary(signed)
            } else {
                number.as_f64().map(float_salary).unwrap_or(0)
            }
        }
        Value::String(text) => {
            let text = text.trim();
            if let Ok(signed) = text.parse::<i64>() {
                clamp_salary(signed)
            } else {
                text.parse::<f64>().map(float_salary).unwrap_or(0)
            }
        }
        _ => 0,
    }
}

fn float_salary(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.trunc() as u64
    } else {
        0
    }
}
