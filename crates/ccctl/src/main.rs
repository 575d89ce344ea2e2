use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::{generate, shells};
use ccctl_core::config::Config;
use opentelemetry_sdk::trace::SdkTracerProvider;
use std::time::Duration;
use tracing::{Level, debug, error, info};
use tracing_subscriber::filter::{EnvFilter, Targets};
use tracing_subscriber::{Layer, Registry, layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod connection;
mod error;
mod output;
mod telemetry;

use cli::{Cli, Commands, LogFormat};
use connection::ConnectionManager;
use error::{CcCtlError, Result as CliResult};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let tracer_provider =
        match init_tracing(cli.verbose, cli.log_format, cli.tracing_endpoint.as_deref()) {
            Ok(provider) => provider,
            Err(e) => {
                e.print_diagnostic();
                std::process::exit(1);
            }
        };

    let code = run(&cli).await;

    if let Some(provider) = tracer_provider {
        telemetry::shutdown(provider);
    }
    if code != 0 {
        std::process::exit(code);
    }

    Ok(())
}

/// Load configuration and run the command; returns the process exit code
async fn run(cli: &Cli) -> i32 {
    // Load configuration from specified path or default location
    let loaded = if let Some(config_file) = &cli.config_file {
        let path = std::path::PathBuf::from(config_file);
        debug!("Loading config from explicit path: {:?}", path);
        Config::load_from_path(&path).map(|config| (config, Some(path)))
    } else {
        debug!("Loading config from default location");
        Config::load().map(|config| (config, None))
    };
    let (config, config_path) = match loaded {
        Ok(loaded) => loaded,
        Err(e) => {
            CcCtlError::from(e).print_diagnostic();
            return 1;
        }
    };

    let conn_mgr = ConnectionManager::new(config, config_path, Duration::from_secs(cli.timeout));

    match execute_command(cli, &conn_mgr).await {
        Ok(()) => 0,
        Err(e) => {
            e.print_diagnostic();
            1
        }
    }
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Install the log layers, plus span export when a collector is given
fn init_tracing(
    verbose: u8,
    log_format: LogFormat,
    tracing_endpoint: Option<&str>,
) -> CliResult<Option<SdkTracerProvider>> {
    // RUST_LOG wins over the verbosity flag
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "ccctl=warn,ccctl_core=warn",
            1 => "ccctl=info,ccctl_core=info",
            2 => "ccctl=debug,ccctl_core=debug",
            _ => "ccctl=trace,ccctl_core=trace",
        };
        EnvFilter::new(level)
    };

    let mut layers: Vec<BoxedLayer> = Vec::new();
    match log_format {
        LogFormat::Text => layers.push(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false)
                .with_thread_names(false)
                .compact()
                .with_filter(filter)
                .boxed(),
        ),
        LogFormat::Json => layers.push(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .json()
                .with_filter(filter)
                .boxed(),
        ),
    }

    // Exported spans do not depend on how chatty stderr is
    let provider = match tracing_endpoint {
        Some(endpoint) => {
            let provider = telemetry::init_tracer_provider(endpoint)
                .map_err(|e| CcCtlError::Config(format!("Invalid tracing endpoint: {:#}", e)))?;
            let spans = Targets::new()
                .with_target("ccctl", Level::INFO)
                .with_target("ccctl_core", Level::INFO);
            layers.push(
                tracing_opentelemetry::layer()
                    .with_tracer(telemetry::tracer(&provider))
                    .with_filter(spans)
                    .boxed(),
            );
            Some(provider)
        }
        None => None,
    };

    tracing_subscriber::registry().with(layers).init();

    debug!("Tracing initialized with verbosity level: {}", verbose);
    if let Some(endpoint) = tracing_endpoint {
        debug!("Exporting spans to {}", telemetry::traces_endpoint(endpoint));
    }
    Ok(provider)
}

async fn execute_command(cli: &Cli, conn_mgr: &ConnectionManager) -> CliResult<()> {
    info!("Command: {}", format_command(&cli.command));

    let start = std::time::Instant::now();
    let result = match &cli.command {
        Commands::Version => {
            debug!("Showing version information");
            match cli.output {
                cli::OutputFormat::Json | cli::OutputFormat::Yaml => {
                    let output_data = serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION"),
                        "name": env!("CARGO_PKG_NAME"),
                    });
                    let fmt = output::OutputFormat::resolve(cli.output, output::OutputFormat::Json);
                    output::print_output(&output_data, fmt, None)?;
                }
                _ => {
                    println!("ccctl {}", env!("CARGO_PKG_VERSION"));
                }
            }
            Ok(())
        }
        Commands::Completions { shell } => {
            debug!("Generating completions for {:?}", shell);
            generate_completions(*shell);
            Ok(())
        }
        Commands::Profile(profile_cmd) => {
            commands::profile::handle_profile_command(profile_cmd, conn_mgr, cli.output).await
        }
        Commands::Clusters(cluster_cmd) => {
            commands::cluster::handle_cluster_command(
                cluster_cmd,
                conn_mgr,
                cli.profile.as_deref(),
                cli.output,
                cli.query.as_deref(),
            )
            .await
        }
        Commands::ZbClient(zeebe_cmd) => {
            commands::zeebe::handle_zeebe_client_command(
                zeebe_cmd,
                conn_mgr,
                cli.profile.as_deref(),
                cli.output,
                cli.query.as_deref(),
            )
            .await
        }
    };

    let duration = start.elapsed();
    match &result {
        Ok(_) => info!("Command completed successfully in {:?}", duration),
        Err(e) => error!("Command failed after {:?}: {}", duration, e),
    }

    result
}

/// Generate shell completions
fn generate_completions(shell: cli::Shell) {
    let mut cmd = cli::Cli::command();
    let name = cmd.get_name().to_string();

    match shell {
        cli::Shell::Bash => generate(shells::Bash, &mut cmd, name, &mut std::io::stdout()),
        cli::Shell::Zsh => generate(shells::Zsh, &mut cmd, name, &mut std::io::stdout()),
        cli::Shell::Fish => generate(shells::Fish, &mut cmd, name, &mut std::io::stdout()),
        cli::Shell::PowerShell => {
            generate(shells::PowerShell, &mut cmd, name, &mut std::io::stdout())
        }
        cli::Shell::Elvish => generate(shells::Elvish, &mut cmd, name, &mut std::io::stdout()),
    }
}

/// Format command for human-readable logging (without sensitive data)
fn format_command(command: &Commands) -> String {
    match command {
        Commands::Version => "version".to_string(),
        Commands::Completions { shell } => format!("completions {:?}", shell),
        Commands::Clusters(cmd) => format!("clusters {:?}", cmd),
        Commands::ZbClient(cmd) => format!("zb-client {:?}", cmd),
        Commands::Profile(cmd) => {
            use cli::ProfileCommands::*;
            match cmd {
                List => "profile list".to_string(),
                Path => "profile path".to_string(),
                Show { name } => format!("profile show {}", name),
                Set { name, .. } => format!("profile set {} [credentials redacted]", name),
                Remove { name } => format!("profile remove {}", name),
                Default { name } => format!("profile default {}", name),
            }
        }
    }
}
