use anyhow::Result;

use movie_rank_aggregator::cli::Command;
use movie_rank_aggregator::{handle_init, handle_recompute, handle_serve, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Serve { port } => handle_serve(*port),
        Command::Init => handle_init(),
        Command::Recompute { movie_id } => handle_recompute(movie_id),
    }
}
