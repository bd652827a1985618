pub mod api;
pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod errors;
pub mod ranking;
pub mod services;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use colored::Colorize;

use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::services::recompute::{Outcome, RecomputeService};
use crate::services::server::ServerService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_serve(port: u16) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_init() -> Result<()> {
    let config = AppConfig::new();
    let pool = database::create_pool(&config.store.database_path, config.store.max_connections)?;
    let mut conn = database::get_connection(&pool)?;
    database::setup::ensure_schema(&mut conn)
        .with_context(|| format!("Failed to initialise {}", config.store.database_path))
}

pub fn handle_recompute(movie_id: &str) -> Result<()> {
    let config = AppConfig::new();
    let pool = database::create_pool(&config.store.database_path, config.store.max_connections)?;
    let service = RecomputeService::new(pool, config.ranking);

    let outcome = service.recompute(movie_id)?;
    println!("{}", render_outcome(&outcome));
    Ok(())
}

fn render_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Updated { movie_id, score, .. } => format!(
            "{} movie {}: {} stars ({} rankings, avg rankIndex {:.2}, percentile {:.1}%)",
            "updated".green().bold(),
            movie_id,
            score.star_rating.as_f64(),
            score.num_rankings,
            score.avg_rank_index,
            score.percentile
        ),
        Outcome::NoMovieId => format!("{} no movie id", "skipped".yellow()),
        Outcome::NoQualifyingRankings { movie_id } => {
            format!("{} movie {}: no qualifying rankings", "skipped".yellow(), movie_id)
        }
        Outcome::AggregateMissing { movie_id } => format!(
            "{} movie {}: no aggregate row, provision it first",
            "skipped".yellow(),
            movie_id
        ),
    }
}
