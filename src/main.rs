use std::fs;

use clap::Parser;
use log::{error, info};
use serde::Deserialize;

use bandstand::{app, DatabaseState};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATABASE_URL: &str = "sqlite:bands.db";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long, short, default_value_t = 3)]
    verbosity: usize,
    #[arg(long, short, default_value_t = false)]
    quiet: bool,
    #[arg(long, short)]
    config: Option<String>,
}

#[derive(Deserialize)]
struct Config {
    port: u16,
    database: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: DEFAULT_PORT,
            database: DEFAULT_DATABASE_URL.to_string(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let args = Args::parse();
    stderrlog::new()
        .verbosity(args.verbosity)
        .quiet(args.quiet)
        .timestamp(stderrlog::Timestamp::Millisecond)
        .init()
        .unwrap();

    let config = match &args.config {
        Some(path) => {
            info!("Configuration path: {}", path);
            let config_string = match fs::read_to_string(path) {
                Ok(s) => s,
                Err(err) => {
                    error!("Error opening configuration file: {}", err);
                    return Ok(());
                }
            };
            match serde_json::from_str::<Config>(config_string.as_str()) {
                Ok(config) => config,
                Err(err) => {
                    error!("Malformed configuration: {}", err);
                    return Ok(());
                }
            }
        }
        None => Config::default(),
    };

    let pool = match queries::init_db(config.database.as_str()).await {
        Ok(pool) => pool,
        Err(err) => {
            error!("Error connecting to database: {}", err);
            return Ok(());
        }
    };
    let state = DatabaseState { pool };

    info!("Listening on 0.0.0.0:{}", config.port);
    info!("Welcome to bandstand!");
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    axum::serve(listener, app(state)).await
}
