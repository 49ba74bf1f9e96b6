pub mod domain;
pub mod filters;

pub use domain::{PersistedVacancy, Vacancy};
pub use filters::{
    filter_by_keywords, filter_by_salary_range, sort_by_salary, top_by_salary, SortOrder,
};
