use std::io::{self, Write};

use vacancy_finder::Vacancy;

/// `title | average currency | url`
pub(crate) fn salary_line(vacancy: &Vacancy) -> String {
    format!(
        "{} | {:.0} {} | {}",
        vacancy.title(),
        vacancy.average_salary(),
        vacancy.currency().unwrap_or(""),
        vacancy.url()
    )
}

/// `title | url`
pub(crate) fn link_line(vacancy: &Vacancy) -> String {
    format!("{} | {}", vacancy.title(), vacancy.url())
}

pub(crate) fn write_vacancies<W, F>(
    output: &mut W,
    vacancies: &[Vacancy],
    line: F,
) -> io::Result<()>
where
    W: Write,
    F: Fn(&Vacancy) -> String,
{
    if vacancies.is_empty() {
        return writeln!(output, "No vacancies found.");
    }

    for vacancy in vacancies {
        writeln!(output, "{}", line(vacancy))?;
    }
    Ok(())
}
