mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use epic_prioritizer::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
