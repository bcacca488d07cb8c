use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use wanderplan::connector::tui;
use wanderplan::{Commands, Container, ContainerConfig, Router, Settings};

#[derive(Parser)]
#[command(name = "wanderplan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Debug logging. In the interactive planner logs go to stderr, so
    /// redirect it (`2>wanderplan.log`) to keep the screen clean.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Serve the vector index from process memory instead of Pinecone
    #[arg(long, global = true)]
    memory_index: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui);
    let interactive = matches!(command, Commands::Tui);

    init_logging(cli.verbose, interactive)?;

    // Missing settings abort startup before any client exists.
    let settings = Settings::from_env()?;
    debug!("Loaded settings: {:?}", settings);

    let container = Container::new(ContainerConfig {
        settings,
        memory_index: cli.memory_index,
    });

    if interactive {
        return tui::run(container.plan_use_case()).await;
    }

    let router = Router::new(&container);
    let output = router.route(command).await?;
    println!("{}", output);

    Ok(())
}

fn init_logging(verbose: bool, interactive: bool) -> Result<()> {
    // The planner screen owns the terminal; stay quiet unless asked.
    if interactive && !verbose {
        return Ok(());
    }

    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("wanderplan={default_level}")));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}
