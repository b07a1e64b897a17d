//! CLI module for OncoRisk
//!
//! Provides subcommands:
//! - `serve`: API + web form (default)
//! - `predict`: classify one submission and print the result
//! - `inspect`: validate the model artifact and describe it

pub mod inspect;
pub mod predict;
pub mod serve;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// OncoRisk - breast cancer risk classifier service
#[derive(Parser)]
#[command(name = "oncorisk")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Model artifact to load instead of the configured one
    #[arg(long, global = true, value_name = "PATH")]
    pub model: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the API and web form (default mode)
    Serve,

    /// Classify one submission and print the assessment as JSON
    Predict(predict::PredictArgs),

    /// Load the model artifact and print its summary
    Inspect,
}

/// Load `.env`, the layered configuration and any command line override
pub fn load_config(model: Option<PathBuf>) -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let mut config = AppConfig::load().context("Failed to load configuration")?;

    if let Some(path) = model {
        config.model.path = path;
    }

    logging::init_logging(&config.logging);

    Ok(config)
}
