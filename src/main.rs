use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use switchboard::config::Config;
use switchboard::router::Router;
use switchboard::{context, gateway, router, specialists};

/// `Switchboard` - routes free-text queries to specialist backends.
#[derive(Parser, Debug)]
#[command(name = "switchboard")]
#[command(version)]
#[command(about = "Query routing for specialist AI backends.", long_about = None)]
struct Cli {
    /// Directory containing config.toml; defaults to ~/.switchboard
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Route a single message and print the decision
    #[command(long_about = "\
Route a single message and print the decision.

Analyzes the message, scores every registered specialist, invokes the
winner, and prints the response together with the routing reasoning.
Without --session a fresh session is created for the message.

Examples:
  switchboard route \"Help me write a Dockerfile for my Node.js app\"
  switchboard route --session demo \"What about the business ROI?\"")]
    Route {
        /// The message to route
        message: String,

        /// Session id for multi-turn context (created if new)
        #[arg(short, long)]
        session: Option<String>,
    },

    /// Start the HTTP gateway server
    #[command(long_about = "\
Start the HTTP gateway server.

Serves the routing API (/api/session, /api/query, /api/status,
/api/sessions/{id}/stats) and runs the background session sweeper.
Bind address defaults to the values in your config file
(gateway.host / gateway.port).

Examples:
  switchboard serve                  # use config defaults
  switchboard serve -p 8080          # listen on port 8080
  switchboard serve --host 0.0.0.0   # bind to all interfaces")]
    Serve {
        /// Port to listen on; defaults to config gateway.port
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to; defaults to config gateway.host
        #[arg(long)]
        host: Option<String>,
    },

    /// Show configuration and routing policy
    Status,

    /// List the registered specialist catalog
    Specialists,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging - respects RUST_LOG env var, defaults to INFO
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let cli = Cli::parse();
    let config = Config::load(cli.config_dir.as_deref())?;

    match cli.command {
        Commands::Route { message, session } => {
            let engine = router::create_engine(&config)?;
            let result = match session {
                Some(id) => engine.query(&message, &id).await?,
                None => engine.start_session(&message).await?,
            };

            println!("Session:    {}", result.session_id);
            println!(
                "Specialist: {} ({})",
                result.handling_agent_name, result.handling_agent_id
            );
            println!("Intent:     {}", result.routing_analysis.analyzed_intent);
            println!("Reasoning:  {}", result.routing_analysis.reasoning);
            println!();
            println!("{}", result.response_text);
            Ok(())
        }

        Commands::Serve { port, host } => {
            let mut gateway_config = config.gateway.clone();
            if let Some(port) = port {
                gateway_config.port = port;
            }
            if let Some(host) = host {
                gateway_config.host = host;
            }

            let engine = router::create_engine(&config)?;
            let sweeper = context::spawn_sweeper(
                engine.context_store(),
                Duration::from_secs(config.routing.sweep_interval_secs),
                Duration::from_secs(config.routing.idle_timeout_secs),
            );

            info!(
                "Starting switchboard gateway on {}:{}",
                gateway_config.host, gateway_config.port
            );
            let result = gateway::serve(&gateway_config, Arc::new(engine)).await;
            sweeper.abort();
            result
        }

        Commands::Status => {
            let registry = specialists::create_registry(
                config.specialists_path.as_deref(),
                &config.routing.fallback_specialist,
            )?;

            println!("Switchboard Status");
            println!();
            println!("Version:        {}", env!("CARGO_PKG_VERSION"));
            println!("Config:         {}", config.config_path.display());
            println!();
            println!("Specialists:    {}", registry.len());
            println!("Fallback:       {}", registry.fallback_id());
            println!("Max history:    {} exchanges", config.routing.max_history);
            println!("Idle timeout:   {}s", config.routing.idle_timeout_secs);
            println!(
                "Classifier:     {}",
                match (&config.classifier.endpoint, config.classifier.enabled) {
                    (Some(endpoint), true) => endpoint.clone(),
                    _ => "(disabled, local routing only)".to_string(),
                }
            );
            println!(
                "Invoker:        {}",
                config
                    .invoker
                    .endpoint
                    .as_deref()
                    .unwrap_or("(local echo)")
            );
            println!(
                "Gateway:        {}:{}",
                config.gateway.host, config.gateway.port
            );
            Ok(())
        }

        Commands::Specialists => {
            let registry = specialists::create_registry(
                config.specialists_path.as_deref(),
                &config.routing.fallback_specialist,
            )?;

            for entry in registry.iter() {
                let profile = &entry.profile;
                let fallback_tag = if profile.id == registry.fallback_id() {
                    " (fallback)"
                } else {
                    ""
                };
                println!("{} - {}{}", profile.id, profile.name, fallback_tag);
                println!("  {}", profile.description);
                println!("  threshold: {:.2}", profile.confidence_threshold);
                println!("  keywords:  {}", profile.keywords.join(", "));
                if !profile.capabilities.is_empty() {
                    println!("  can do:    {}", profile.capabilities.join(", "));
                }
                println!();
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_has_no_flag_conflicts() {
        Cli::command().debug_assert();
    }

    #[test]
    fn route_command_parses_with_session() {
        let cli = Cli::try_parse_from(["switchboard", "route", "--session", "s1", "hello"])
            .expect("route invocation should parse");
        match cli.command {
            Commands::Route { message, session } => {
                assert_eq!(message, "hello");
                assert_eq!(session.as_deref(), Some("s1"));
            }
            other => panic!("expected route command, got {other:?}"),
        }
    }

    #[test]
    fn serve_command_parses_port_override() {
        let cli = Cli::try_parse_from(["switchboard", "serve", "-p", "8080"])
            .expect("serve invocation should parse");
        match cli.command {
            Commands::Serve { port, .. } => assert_eq!(port, Some(8080)),
            other => panic!("expected serve command, got {other:?}"),
        }
    }
}
