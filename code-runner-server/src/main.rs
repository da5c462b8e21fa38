use clap::Parser;
use code_runner::{missing_tools, CodeExecutionService, Language};
use code_runner_server::{create_app, run_server, ServerConfig};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML config file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Server address to listen on [default: 0.0.0.0:8080]
    #[arg(short, long)]
    addr: Option<SocketAddr>,

    /// Wall-clock limit per run in seconds [default: 5]
    #[arg(short, long)]
    timeout_secs: Option<u64>,

    /// Maximum number of concurrent executions [default: unbounded]
    #[arg(short, long)]
    max_concurrent: Option<usize>,

    /// Program used to run Go code [default: go]
    #[arg(long)]
    go: Option<String>,

    /// Program used to run Python code [default: python3]
    #[arg(long)]
    python: Option<String>,
}

impl Args {
    fn into_config(self) -> anyhow::Result<ServerConfig> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::load(path)?,
            None => ServerConfig::default(),
        };

        if let Some(addr) = self.addr {
            config.addr = addr;
        }
        if let Some(timeout_secs) = self.timeout_secs {
            config.timeout_secs = timeout_secs;
        }
        if self.max_concurrent.is_some() {
            config.max_concurrent = self.max_concurrent;
        }
        if let Some(go) = self.go {
            config.programs.insert(Language::Go, go);
        }
        if let Some(python) = self.python {
            config.programs.insert(Language::Python, python);
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Args::parse().into_config()?;
    let runner_config = config.runner_config();

    let missing = missing_tools(
        Language::ALL
            .iter()
            .map(|language| runner_config.program_for(*language)),
    );
    if !missing.is_empty() {
        warn!(
            "Missing tools, runs for those languages will fail: {}",
            missing.join(", ")
        );
    }
    info!(
        timeout_secs = config.timeout_secs,
        max_concurrent = ?config.max_concurrent,
        "Runner configured"
    );

    let service = CodeExecutionService::new(runner_config, config.max_concurrent);
    let app = create_app(service);
    run_server(app, config.addr).await?;

    Ok(())
}
