//! Binary entrypoint for the questlog CLI.
//!
//! Commands:
//! - `start` - run the HTTP API server
//! - `init` - create a starter `config.toml`
//! - `status` - print store statistics from the configured data directory
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;

use questlog::api::{self, AppState};
use questlog::config::Config;
use questlog::game::notify::LogNotifier;
use questlog::game::storage::GameStoreBuilder;

#[derive(Parser)]
#[command(name = "questlog")]
#[command(about = "A gamified quest tracking server")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Start {
        /// Override the configured listen port
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Write a starter configuration file
    Init,
    /// Show store statistics
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Init writes the config it would otherwise load.
    let config = match cli.command {
        Commands::Init => None,
        _ => Some(Config::load(&cli.config).await?),
    };
    if !matches!(cli.command, Commands::Init) {
        init_logging(&config, cli.verbose);
    }

    match cli.command {
        Commands::Start { port } => {
            let config = config.expect("config loaded above");
            info!("Starting questlog v{}", env!("CARGO_PKG_VERSION"));

            let mut builder = GameStoreBuilder::new(&config.storage.data_dir);
            if config.storage.skip_seed_library {
                builder = builder.without_seed_library();
            }
            let store = Arc::new(builder.open()?);

            let state = AppState {
                store,
                notifier: Arc::new(LogNotifier),
                starting_coins: config.game.starting_coins,
                starting_gems: config.game.starting_gems,
                admin_emails: config.game.admin_emails.clone(),
            };
            let port = port.unwrap_or(config.server.port);
            api::serve(state, &config.server.host, port).await?;
        }
        Commands::Init => {
            Config::create_default(&cli.config).await?;
            println!("Wrote starter configuration to {}", cli.config);
            println!("Edit it, then run: questlog start");
        }
        Commands::Status => {
            let config = config.expect("config loaded above");
            let store = GameStoreBuilder::new(&config.storage.data_dir)
                .without_seed_library()
                .open()?;
            let accounts = store.list_account_ids()?.len();
            let guilds = store.list_guilds()?.len();
            let rewards = store.list_rewards()?.len();
            let achievements = store.list_achievements()?.len();
            println!("questlog v{}", env!("CARGO_PKG_VERSION"));
            println!("  data dir:     {}", config.storage.data_dir);
            println!("  accounts:     {}", accounts);
            println!("  guilds:       {}", guilds);
            println!("  rewards:      {}", rewards);
            println!("  achievements: {}", achievements);
        }
    }

    Ok(())
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // CLI verbosity overrides the configured level
    let level = match verbosity {
        0 => config
            .as_ref()
            .and_then(|c| c.logging.level.parse().ok())
            .unwrap_or(log::LevelFilter::Info),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(level);

    let log_file = config.as_ref().and_then(|c| c.logging.file.clone());
    if let Some(path) = log_file {
        if let Ok(f) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
        {
            let file = std::sync::Arc::new(std::sync::Mutex::new(f));
            // When stdout is a TTY, mirror the file output to the console;
            // under a service manager stdout is redirected and stays quiet.
            let is_tty = atty::is(atty::Stream::Stdout);
            builder.format(move |fmt, record| {
                let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
                let line = format!("{} [{}] {}", ts, record.level(), record.args());
                if let Ok(mut guard) = file.lock() {
                    let _ = writeln!(guard, "{}", line);
                }
                if is_tty {
                    writeln!(fmt, "{}", line)
                } else {
                    Ok(())
                }
            });
        }
    } else {
        builder.format(|fmt, record| {
            writeln!(
                fmt,
                "{} [{}] {}",
                chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ"),
                record.level(),
                record.args()
            )
        });
    }

    let _ = builder.try_init();
}
