use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tweetboard_common::observability::init_logging;
use tweetboard_config::{Backend, BoardConfig, BoardConfigLoader, default_config_path};
use wiring::Wiring;

mod headless;
mod wiring;

const APP_NAME: &str = "tweetboard";

#[derive(Parser)]
#[command(name = "tweetboard")]
#[command(about = "Read and post tweets from the terminal", long_about = None)]
#[command(version)]
struct Cli {
    /// YAML config file (defaults to the platform config dir, if present)
    #[arg(short, long, env = "TWEETBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Override `service.backend`
    #[arg(long, value_enum)]
    backend: Option<BackendArg>,

    /// Override `service.base_url`
    #[arg(long)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, ValueEnum)]
enum BackendArg {
    Http,
    Local,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive page in the terminal (default)
    Tui,
    /// Load the page, click send once per --post and print what was rendered
    Dump {
        /// Message to post; repeat to post several in order
        #[arg(long = "post", value_name = "MESSAGE")]
        posts: Vec<String>,
    },
}

fn load_config(cli: &Cli) -> Result<BoardConfig> {
    let loader = match (&cli.config, default_config_path()) {
        (Some(path), _) => BoardConfigLoader::new().with_file(path),
        (None, Some(path)) => BoardConfigLoader::new().with_optional_file(path),
        (None, None) => BoardConfigLoader::new(),
    };
    let mut cfg = loader.load()?;

    if let Some(backend) = cli.backend {
        cfg.service.backend = match backend {
            BackendArg::Http => Backend::Http,
            BackendArg::Local => Backend::Local,
        };
    }
    if let Some(url) = &cli.base_url {
        cfg.service.base_url = url.clone();
    }
    cfg.validate()?;
    Ok(cfg)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = load_config(&cli)?;
    let command = cli.command.unwrap_or(Commands::Tui);

    let mut log = cfg.logging.to_log_config(APP_NAME)?;
    if matches!(command, Commands::Tui) {
        // stderr would draw over the alternate screen
        log.emit_stderr = false;
    }
    let log_path = init_logging(log)?;
    tracing::info!(
        backend = ?cfg.service.backend,
        log = %log_path.display(),
        "app.start"
    );

    let wiring = Wiring::from_config(&cfg)?;
    match command {
        Commands::Tui => wiring.run_tui().await,
        Commands::Dump { posts } => {
            let stdout = std::io::stdout();
            headless::run_dump(wiring, posts, stdout).await
        }
    }
}
