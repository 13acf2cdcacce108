mod cli;
mod commands;
mod edge;
mod infra;
mod routes;
mod server;

use schoolsite::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
