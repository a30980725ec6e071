//! builder-hub: personal build journal and project hub
//!
//! `builder-hub` (or `builder-hub serve`) runs the web UI and API.
//! `builder-hub quick-log --project NAME` logs entries from the terminal
//! against a running hub.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use builder_hub::client::{run_interactive, LogClient};
use builder_hub::forms::{QuickLogForm, DEFAULT_SCORE};
use builder_hub::models::{DeviceType, Stage};
use builder_hub::{server, Config};

#[derive(Parser)]
#[command(name = "builder-hub")]
#[command(about = "Personal build journal and project hub")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "builder-hub.toml")]
    config: PathBuf,

    /// SQLite database file (overrides config file)
    #[arg(long, env = "BUILDER_HUB_DATABASE")]
    database: Option<PathBuf>,

    /// "laptop" or "desktop" (overrides config file)
    #[arg(long, env = "BUILDER_HUB_DEVICE_TYPE")]
    device_type: Option<String>,

    /// HTTP port (overrides config file)
    #[arg(short, long, env = "BUILDER_HUB_PORT")]
    port: Option<u16>,

    /// Editor executable (overrides config file)
    #[arg(long, env = "BUILDER_HUB_EDITOR")]
    editor: Option<String>,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web UI and API (default)
    Serve,

    /// Log build entries from the terminal, one summary per line
    QuickLog {
        /// Project name
        #[arg(long)]
        project: String,

        /// planning, dev, experiment or deploy
        #[arg(long, default_value = "dev")]
        stage: String,

        /// Energy level, 1-5
        #[arg(long, default_value_t = DEFAULT_SCORE)]
        energy: i64,

        /// Leverage score, 1-5
        #[arg(long, default_value_t = DEFAULT_SCORE)]
        leverage: i64,

        /// Hub base URL (defaults to the configured listen address)
        #[arg(long)]
        server: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let mut config = Config::load(&cli.config)?;

    // Apply CLI overrides
    if let Some(database) = cli.database {
        config.storage.database = Some(database);
    }
    if let Some(device_type) = cli.device_type {
        config.device.device_type = DeviceType::from(device_type);
    }
    if let Some(port) = cli.port {
        config.server.http_port = port;
    }
    if let Some(editor) = cli.editor {
        config.launcher.editor = editor;
    }

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            info!("Starting builder-hub");
            info!("Config file: {}", cli.config.display());
            server::serve(config).await
        }
        Commands::QuickLog {
            project,
            stage,
            energy,
            leverage,
            server,
        } => {
            let stage = Stage::parse(&stage)
                .ok_or_else(|| anyhow::anyhow!("stage must be one of: planning, dev, experiment, deploy"))?;
            let server = server.unwrap_or_else(|| format!("http://{}", config.listen_addr()));

            let client = LogClient::new(&server)?;
            let mut form = QuickLogForm::new(project, stage, energy, leverage);

            let input = tokio::io::BufReader::new(tokio::io::stdin());
            run_interactive(&client, &mut form, input, &mut std::io::stdout()).await
        }
    }
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "builder_hub=info,tower_http=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
}
