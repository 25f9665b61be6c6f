use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::runtime::Runtime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nateos_mgmt::constants::network;
use nateos_mgmt::settings::SettingsLoader;

#[derive(Parser)]
#[command(name = "nateos-mgmt")]
#[command(version, about = "NateOS switch configuration management daemon")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, short, help = "Path to settings file (nateos-mgmt.toml)")]
    config: Option<PathBuf>,

    #[arg(long)]
    verbose: bool,

    #[arg(long, short)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the management API daemon
    Serve {
        #[arg(long, help = "Override the listen address")]
        listen: Option<String>,
        #[arg(long, short, help = "Override the listen port")]
        port: Option<u16>,
    },

    /// Show the running configuration of a daemon
    Show {
        #[arg(help = "Section to show (all sections when omitted)")]
        section: Option<String>,
        #[arg(
            long,
            env = "NATEOS_MGMT_URL",
            default_value = network::DEFAULT_URL,
            help = "Daemon base URL"
        )]
        url: String,
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            help = "Output format: text, json"
        )]
        format: String,
    },

    /// Check daemon health
    Health {
        #[arg(
            long,
            env = "NATEOS_MGMT_URL",
            default_value = network::DEFAULT_URL,
            help = "Daemon base URL"
        )]
        url: String,
    },

    /// Inspect daemon settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show effective settings (merged from defaults, file, env)
    Show {
        #[arg(long, help = "Output as JSON instead of TOML")]
        json: bool,
    },
    /// Show settings sources
    Path,
}

fn main() -> ExitCode {
    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rt = Runtime::new()?;

    match cli.command {
        Commands::Serve { listen, port } => {
            let mut settings = SettingsLoader::load(cli.config.as_deref())?;
            if let Some(listen) = listen {
                settings.listen = listen;
            }
            if let Some(port) = port {
                settings.port = port;
            }
            settings.validate()?;

            rt.block_on(nateos_mgmt::cli::commands::serve::run(settings))?;
        }
        Commands::Show {
            section,
            url,
            format,
        } => {
            rt.block_on(nateos_mgmt::cli::commands::show::run(
                &url,
                section.as_deref(),
                &format,
            ))?;
        }
        Commands::Health { url } => {
            rt.block_on(nateos_mgmt::cli::commands::health::run(&url))?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { json } => {
                nateos_mgmt::cli::commands::config::show(cli.config.as_deref(), json)?;
            }
            ConfigAction::Path => {
                nateos_mgmt::cli::commands::config::path(cli.config.as_deref());
            }
        },
    }

    Ok(())
}
