use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use vacancy_finder::config::AppConfig;
use vacancy_finder::error::AppError;
use vacancy_finder::{telemetry, HeadHunterClient, JsonVacancyStore, VacancyStore};

use crate::render::{link_line, salary_line, write_vacancies};
use crate::shell::{
    delete_vacancy, deletion_message, import_vacancies, search_vacancies, top_vacancies,
    vacancies_in_salary_range, FetchSettings, Shell,
};

#[derive(Parser, Debug)]
#[command(
    name = "vacancy-finder",
    about = "Fetch hh.ru vacancies and query the local vacancy store",
    version
)]
struct Cli {
    /// Path of the JSON vacancy store (overrides VACANCY_STORE_PATH)
    #[arg(long, global = true)]
    store: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch vacancies matching a query and save them
    Fetch(FetchArgs),
    /// Print every saved vacancy
    List,
    /// Print the N best-paid saved vacancies
    Top { count: usize },
    /// Print saved vacancies mentioning any of the keywords
    Search {
        #[arg(required = true)]
        keywords: Vec<String>,
    },
    /// Print saved vacancies whose average salary falls in a range
    Salary(SalaryArgs),
    /// Delete saved vacancies by URL or title
    Delete { identifier: String },
    /// Run the interactive menu (default command)
    Interactive,
}

#[derive(Args, Debug)]
struct FetchArgs {
    query: String,
    /// Items per page (overrides HH_PER_PAGE)
    #[arg(long)]
    per_page: Option<u32>,
    /// Number of pages to request (overrides HH_PAGES)
    #[arg(long)]
    pages: Option<u32>,
}

#[derive(Args, Debug)]
struct SalaryArgs {
    /// Lower bound; 0 means no bound
    #[arg(long)]
    min: Option<u64>,
    /// Upper bound; 0 means no bound
    #[arg(long)]
    max: Option<u64>,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;
    if let Some(path) = cli.store {
        config.storage.path = path;
    }
    telemetry::init(&config.telemetry)?;

    let store = JsonVacancyStore::open(config.storage.path.clone())?;
    let settings = FetchSettings {
        per_page: config.source.per_page,
        pages: config.source.pages,
    };
    let stdout = io::stdout();
    let mut output = stdout.lock();

    match cli.command.unwrap_or(Command::Interactive) {
        Command::Fetch(args) => {
            let source = HeadHunterClient::new(&config.source)?;
            let settings = FetchSettings {
                per_page: args.per_page.unwrap_or(settings.per_page),
                pages: args.pages.unwrap_or(settings.pages),
            };
            let saved = import_vacancies(&source, &store, &args.query, settings)?;
            writeln!(output, "Saved {saved} vacancies.")?;
        }
        Command::List => {
            let vacancies = store.list(None)?;
            write_vacancies(&mut output, &vacancies, salary_line)?;
        }
        Command::Top { count } => {
            write_vacancies(&mut output, &top_vacancies(&store, count)?, salary_line)?;
        }
        Command::Search { keywords } => {
            write_vacancies(&mut output, &search_vacancies(&store, &keywords)?, link_line)?;
        }
        Command::Salary(args) => {
            let vacancies = vacancies_in_salary_range(&store, args.min, args.max)?;
            write_vacancies(&mut output, &vacancies, salary_line)?;
        }
        Command::Delete { identifier } => {
            let removed = delete_vacancy(&store, &identifier)?;
            writeln!(output, "{}", deletion_message(removed))?;
        }
        Command::Interactive => {
            let source = HeadHunterClient::new(&config.source)?;
            let stdin = io::stdin();
            Shell::new(&store, &source, settings, stdin.lock(), output).run()?;
        }
    }

    Ok(())
}
