//! dockview - Docker Engine dashboard CLI

use clap::{Parser, Subcommand};
use dockview_cli::commands;
use dockview_cli::selector::{select_container, SelectionContext};
use dockview_config::GlobalConfig;
use dockview_engine::{EngineClient, OperationResult};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "dockview")]
#[command(author, version, about = "Docker Engine Dashboard", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Docker Engine URL (overrides the saved setting)
    #[arg(long, global = true, value_name = "URL")]
    engine_url: Option<String>,

    /// Engine API version, e.g. v1.47 (overrides the saved setting)
    #[arg(long, global = true, value_name = "VERSION")]
    api_version: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List containers (default)
    #[command(visible_alias = "ps")]
    Containers {
        /// Only show containers whose name or image contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// List images
    Images {
        /// Only show images whose repository or tag contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Start a container
    Start {
        /// Container name or ID (interactive selection if not specified)
        container: Option<String>,
    },

    /// Stop a container
    Stop {
        /// Container name or ID (interactive selection if not specified)
        container: Option<String>,
    },

    /// Remove a container (a running container is killed first)
    Rm {
        /// Container name or ID (interactive selection if not specified)
        container: Option<String>,
        /// Fail instead of killing a running container
        #[arg(long)]
        no_force: bool,
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Remove an image
    Rmi {
        /// Image ID or reference
        image: String,
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show or edit connection settings
    Config {
        /// Open config in editor
        #[arg(short, long)]
        edit: bool,

        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Save the values given with --engine-url / --api-version
    Set,
}

#[tokio::main]
async fn main() {
    match run().await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Returns `false` when an engine operation was reported as failed
async fn run() -> anyhow::Result<bool> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    if let Some(Commands::Config {
        action: Some(ConfigAction::Set),
        ..
    }) = &cli.command
    {
        commands::config_set(cli.engine_url.as_deref(), cli.api_version.as_deref()).await?;
        return Ok(true);
    }

    let mut config = GlobalConfig::load().unwrap_or_else(|e| {
        eprintln!("Warning: {}; using default settings", e);
        GlobalConfig::default()
    });
    config
        .connection
        .apply(cli.engine_url.as_deref(), cli.api_version.as_deref());

    let client = EngineClient::new(config.connection)?;
    tracing::debug!("Using engine at {}", client.resolve_base_url());

    let outcome = match cli.command.unwrap_or(Commands::Containers { search: None }) {
        Commands::Containers { search } => {
            commands::containers(&client, search.as_deref()).await?;
            None
        }
        Commands::Images { search } => {
            commands::images(&client, search.as_deref()).await?;
            None
        }
        Commands::Start { container } => {
            let id = match container {
                Some(id) => id,
                None => pick(&client, SelectionContext::Stopped, "Select container to start:").await?,
            };
            Some(commands::start(&client, &id).await?)
        }
        Commands::Stop { container } => {
            let id = match container {
                Some(id) => id,
                None => pick(&client, SelectionContext::Running, "Select container to stop:").await?,
            };
            Some(commands::stop(&client, &id).await?)
        }
        Commands::Rm {
            container,
            no_force,
            yes,
        } => {
            let id = match container {
                Some(id) => id,
                None => pick(&client, SelectionContext::Any, "Select container to remove:").await?,
            };
            commands::remove(&client, &id, !no_force, yes).await?
        }
        Commands::Rmi { image, yes } => commands::remove_image(&client, &image, yes).await?,
        Commands::Config { edit, .. } => {
            commands::config(&client, edit).await?;
            None
        }
    };

    Ok(!outcome.as_ref().is_some_and(OperationResult::is_error))
}

/// Fetch containers and let the user choose one
async fn pick(
    client: &EngineClient,
    context: SelectionContext,
    prompt: &str,
) -> anyhow::Result<String> {
    let containers = client.list_all_container_details().await?;
    select_container(&containers, context, prompt)
}
