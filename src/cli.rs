use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "movie ranking aggregator")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Start the ranking change server
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
    /// Create the database tables and indexes
    Init,
    /// Recompute the aggregate score of one movie
    Recompute {
        /// Movie identifier as stored on rankings and aggregates
        movie_id: String,
    },
}
