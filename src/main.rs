//! pgmp-prep - study-plan tracker and self-hosted sync server
//!
//! Serves the pairing and progress endpoints that let several devices share
//! one study-progress map, and prints the generated study calendar.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use pgmp_prep::api;
use pgmp_prep::config::Config;
use pgmp_prep::plan;
use pgmp_prep::registry::MemoryRegistry;

#[derive(Parser)]
#[command(name = "pgmp-prep")]
#[command(about = "Study-plan tracker and self-hosted sync server for PgMP exam prep")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the sync server
    Serve {
        /// Config file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Bind address (overrides config)
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Print the generated study calendar
    Plan {
        /// Show a single day instead of the whole calendar
        #[arg(short, long)]
        day: Option<u32>,

        /// Config file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Initialize a new config file
    Init {
        /// Output path for config file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pgmp_prep=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config, port, bind } => {
            let mut cfg = load_config(config)?;

            // Override with CLI args
            if let Some(p) = port {
                cfg.server.port = p;
            }
            if let Some(b) = bind {
                cfg.server.bind = b;
            }

            run_server(cfg).await
        }

        Commands::Plan { day, config } => {
            let cfg = load_config(config)?;
            print_plan(&cfg, day);
            Ok(())
        }

        Commands::Init { output } => {
            let path = output.unwrap_or_else(|| PathBuf::from("config.toml"));
            let cfg = Config::default();
            cfg.save_to(&path)?;

            println!("Created config file: {}", path.display());
            println!();
            println!("Next steps:");
            println!("  1. Adjust [study] start_date and weekend for your calendar");
            println!(
                "  2. Start the server: pgmp-prep serve --config {}",
                path.display()
            );

            Ok(())
        }
    }
}

fn load_config(path: Option<PathBuf>) -> Result<Config> {
    if let Some(path) = path {
        Config::load_from(&path)
    } else {
        Config::load()
    }
}

async fn run_server(config: Config) -> Result<()> {
    let registry = Arc::new(MemoryRegistry::new());
    let state = api::AppState::new(registry, config.clone());
    let app = api::create_router(state);

    let addr = format!("{}:{}", config.server.bind, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind listener")?;

    tracing::info!("pgmp-prep sync server listening on http://{}", addr);
    tracing::warn!(
        "progress registry is in-memory: state is lost on restart and not shared across instances"
    );

    axum::serve(listener, app).await?;

    Ok(())
}

fn print_plan(config: &Config, only_day: Option<u32>) {
    let calendar = config.study.calendar();
    let tasks = plan::generate(&calendar);

    for task in tasks {
        if let Some(day) = only_day
            && task.day != day
        {
            continue;
        }

        let date = calendar.date_for_day(task.day);
        let marker = if task.is_weekend { "*" } else { " " };
        println!(
            "Day {:>2}{} {}  [{:>3} min] {}",
            task.day,
            marker,
            date.format("%a %b %d"),
            task.duration,
            task.title
        );
        if only_day.is_some() {
            println!("        {}", task.description);
            for point in &task.key_points {
                println!("        - {}", point);
            }
        }
    }
}
