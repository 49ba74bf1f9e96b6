mod cli;
mod render;
mod shell;

use vacancy_finder::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
