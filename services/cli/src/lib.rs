mod analysis;
mod cli;
mod report;

use talent_ratings::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
