//! Pure queries over in-memory vacancy lists. Every function returns a new
//! list and leaves its input untouched.

use super::domain::Vacancy;

/// Direction for [`sort_by_salary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Descending,
    Ascending,
}

/// Keeps vacancies whose title or description contains any of the keywords,
/// ignoring case. An empty keyword list keeps everything.
pub fn filter_by_keywords<S: AsRef<str>>(vacancies: &[Vacancy], keywords: &[S]) -> Vec<Vacancy> {
    if keywords.is_empty() {
        return vacancies.to_vec();
    }

    let needles: Vec<String> = keywords
        .iter()
        .map(|keyword| keyword.as_ref().to_lowercase())
        .collect();

    vacancies
        .iter()
        .filter(|vacancy| {
            let title = vacancy.title().to_lowercase();
            let description = vacancy.description().to_lowercase();
            needles
                .iter()
                .any(|needle| title.contains(needle.as_str()) || description.contains(needle.as_str()))
        })
        .cloned()
        .collect()
}

/// Keeps vacancies whose average salary lies within `[min, max]`. `None`
/// leaves that side open; `Some(0)` is a real bound.
pub fn filter_by_salary_range(
    vacancies: &[Vacancy],
    min: Option<u64>,
    max: Option<u64>,
) -> Vec<Vacancy> {
    vacancies
        .iter()
        .filter(|vacancy| {
            let average = vacancy.average_salary();
            min.map_or(true, |min| average >= min as f64)
                && max.map_or(true, |max| average <= max as f64)
        })
        .cloned()
        .collect()
}

/// Stable sort by average salary; equal salaries keep their input order.
pub fn sort_by_salary(vacancies: &[Vacancy], order: SortOrder) -> Vec<Vacancy> {
    let mut sorted = vacancies.to_vec();
    match order {
        SortOrder::Ascending => sorted.sort_by(|a, b| a.cmp(b)),
        SortOrder::Descending => sorted.sort_by(|a, b| b.cmp(a)),
    }
    sorted
}

pub fn top_by_salary(vacancies: &[Vacancy], count: usize) -> Vec<Vacancy> {
    let mut sorted = sort_by_salary(vacancies, SortOrder::Descending);
    sorted.truncate(count);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_vacancies() -> Vec<Vacancy> {
        vec![
            Vacancy::new("Python Dev", "url1", "desc python")
                .with_salary(Some(100_000), Some(150_000))
                .with_currency("RUR"),
            Vacancy::new("QA", "url2", "testing").with_salary(Some(50_000), Some(70_000)),
            Vacancy::new("Team Lead", "url3", "people management")
                .with_salary(Some(130_000), None),
        ]
    }

    fn titles(vacancies: &[Vacancy]) -> Vec<&str> {
        vacancies.iter().map(Vacancy::title).collect()
    }

    #[test]
    fn keyword_filter_is_case_insensitive_substring() {
        let vacancies = sample_vacancies();
        let filtered = filter_by_keywords(&vacancies, &["PYTHON"]);
        assert_eq!(titles(&filtered), vec!["Python Dev"]);

        let filtered = filter_by_keywords(&vacancies, &["test"]);
        assert_eq!(titles(&filtered), vec!["QA"]);
    }

    #[test]
    fn keyword_filter_ors_keywords_across_title_and_description() {
        let vacancies = sample_vacancies();
        let filtered = filter_by_keywords(&vacancies, &["lead", "testing"]);
        assert_eq!(titles(&filtered), vec!["QA", "Team Lead"]);
    }

    #[test]
    fn keyword_filter_handles_cyrillic() {
        let vacancies = vec![Vacancy::new("Разработчик Rust", "u", "Опыт от 3 лет")];
        let filtered = filter_by_keywords(&vacancies, &["РАЗРАБОТЧИК"]);
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn empty_keywords_return_input() {
        let vacancies = sample_vacancies();
        let keywords: [&str; 0] = [];
        let filtered = filter_by_keywords(&vacancies, &keywords);
        assert_eq!(titles(&filtered), titles(&vacancies));

        assert!(filter_by_keywords(&[], &["python"]).is_empty());
    }

    #[test]
    fn salary_range_is_inclusive() {
        let vacancies = sample_vacancies();
        let filtered = filter_by_salary_range(&vacancies, Some(90_000), Some(130_000));
        assert_eq!(titles(&filtered), vec!["Python Dev", "Team Lead"]);
    }

    #[test]
    fn salary_range_open_bounds() {
        let vacancies = sample_vacancies();
        assert_eq!(filter_by_salary_range(&vacancies, None, None).len(), 3);
        assert_eq!(
            titles(&filter_by_salary_range(&vacancies, None, Some(60_000))),
            vec!["QA"]
        );
        assert_eq!(
            titles(&filter_by_salary_range(&vacancies, Some(126_000), None)),
            vec!["Team Lead"]
        );
    }

    #[test]
    fn zero_max_is_a_real_bound() {
        let vacancies = vec![
            Vacancy::new("Unpaid", "u0", ""),
            Vacancy::new("Paid", "u1", "").with_salary(Some(10), None),
        ];
        let filtered = filter_by_salary_range(&vacancies, None, Some(0));
        assert_eq!(titles(&filtered), vec!["Unpaid"]);
    }

    #[test]
    fn sort_descending_by_default() {
        let vacancies = sample_vacancies();
        let sorted = sort_by_salary(&vacancies, SortOrder::default());
        let averages: Vec<f64> = sorted.iter().map(Vacancy::average_salary).collect();
        assert_eq!(averages, vec![130_000.0, 125_000.0, 60_000.0]);

        let sorted = sort_by_salary(&vacancies, SortOrder::Ascending);
        let averages: Vec<f64> = sorted.iter().map(Vacancy::average_salary).collect();
        assert_eq!(averages, vec![60_000.0, 125_000.0, 130_000.0]);
    }

    #[test]
    fn sort_is_stable_for_equal_salaries() {
        let vacancies = vec![
            Vacancy::new("first", "a", "").with_salary(Some(100), None),
            Vacancy::new("second", "b", "").with_salary(Some(50), Some(150)),
            Vacancy::new("third", "c", "").with_salary(Some(100), Some(100)),
        ];

        let sorted = sort_by_salary(&vacancies, SortOrder::Descending);
        assert_eq!(titles(&sorted), vec!["first", "second", "third"]);
        let sorted = sort_by_salary(&vacancies, SortOrder::Ascending);
        assert_eq!(titles(&sorted), vec!["first", "second", "third"]);
    }

    #[test]
    fn top_by_salary_truncates() {
        let vacancies = sample_vacancies();
        assert_eq!(titles(&top_by_salary(&vacancies, 2)), vec!["Team Lead", "Python Dev"]);
        assert_eq!(top_by_salary(&vacancies, 10).len(), 3);
        assert!(top_by_salary(&vacancies, 0).is_empty());
    }
}
