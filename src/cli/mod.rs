use std::path::PathBuf;

use clap::Subcommand;

use crate::application::DEFAULT_TOP_K;

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a travel plan for a destination and print it
    Plan {
        destination: String,
    },

    /// Open the interactive planner (default when no command is given)
    Tui,

    /// Work with the destination vector index
    #[command(subcommand)]
    Index(IndexCommands),
}

#[derive(Subcommand)]
pub enum IndexCommands {
    /// Print index statistics
    Stats,

    /// Upsert destination records from a JSON file
    ///
    /// The file holds an array of
    /// `{"id", "values", "metadata": {"destination", "category", "description"}}`.
    Upsert {
        file: PathBuf,
    },

    /// Find the destinations closest to a vector
    Query {
        /// Comma-separated vector components, e.g. `--vector 0.1,-0.2,0.3`
        #[arg(long, value_delimiter = ',', required = true, allow_hyphen_values = true)]
        vector: Vec<f32>,

        #[arg(short = 'k', long, default_value_t = DEFAULT_TOP_K)]
        top_k: usize,
    },
}
