//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use fruitguess_core::api::GameClient;
use fruitguess_core::config::{self, Config};
use fruitguess_core::logging::{self, LogTarget};

mod commands;

#[derive(Parser)]
#[command(name = "fruitguess")]
#[command(version)]
#[command(about = "Guess the secret fruit by asking yes/no questions")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Game server base URL (overrides FRUITGUESS_API_URL and the config file)
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Play over stdin/stdout, one command or question per line
    Plain {
        /// Wait for /start instead of starting a game at launch
        #[arg(long = "no-start")]
        no_start: bool,
    },
    /// Check that the game server is up
    Health,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Print the config file path
    Path,
    /// Write a commented default config file
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

/// What to do once config and client are ready.
enum Mode {
    Tui,
    Plain { auto_start: bool },
    Health,
}

async fn dispatch(cli: Cli) -> Result<()> {
    let Cli { command, api_url } = cli;

    // Config commands must work even when the config file is broken.
    let mode = match command {
        Some(Commands::Config { command }) => return run_config(&command),
        Some(Commands::Plain { no_start }) => Mode::Plain {
            auto_start: !no_start,
        },
        Some(Commands::Health) => Mode::Health,
        None => Mode::Tui,
    };

    // stdout belongs to the terminal UI, so its logs go to a file.
    let log_target = match mode {
        Mode::Tui => LogTarget::File(config::paths::logs_dir()),
        Mode::Plain { .. } | Mode::Health => LogTarget::Stderr,
    };
    let _log_guard = logging::init(log_target).context("init logging")?;

    let config = Config::load().context("load config")?;
    let base_url = config.resolve_api_url(api_url.as_deref())?;
    let client =
        GameClient::new(base_url, config.request_timeout()).context("create game client")?;

    match mode {
        Mode::Tui => commands::play::run(&config, client),
        Mode::Plain { auto_start } => commands::plain::run(client, auto_start).await,
        Mode::Health => commands::health::run(&client).await,
    }
}

fn run_config(command: &ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Path => {
            commands::config::path();
            Ok(())
        }
        ConfigCommands::Init => commands::config::init(),
    }
}
