//! Predict command - classify one submission without starting the server

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;

use crate::api::types::PredictionRequest;
use crate::config::AppConfig;
use crate::domain::{FeatureInput, FeatureValue};
use crate::infrastructure::services::PredictionService;

#[derive(Args, Debug)]
pub struct PredictArgs {
    /// JSON file shaped like the POST /v1/predict body
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Feature value, repeatable (e.g. --feature "Age=52")
    #[arg(long = "feature", value_name = "NAME=VALUE", value_parser = parse_feature)]
    pub features: Vec<(String, FeatureValue)>,

    /// Start from the model's reference input
    #[arg(long)]
    pub reference: bool,
}

/// Run one prediction and print the assessment to stdout
pub fn run(config: AppConfig, args: PredictArgs) -> anyhow::Result<()> {
    let service = crate::create_prediction_service(&config)?;
    let input = build_input(&service, &args)?;

    let assessment = service.assess(&input).context("Prediction rejected")?;
    println!("{}", serde_json::to_string_pretty(&assessment)?);

    Ok(())
}

/// Later sources win: reference input, then the input file, then `--feature`
fn build_input(service: &PredictionService, args: &PredictArgs) -> anyhow::Result<FeatureInput> {
    let mut input = if args.reference {
        service.reference_input()
    } else {
        FeatureInput::new()
    };

    if let Some(path) = &args.input {
        input.extend(read_input_file(path)?);
    }

    input.extend(args.features.iter().cloned());

    Ok(input)
}

fn read_input_file(path: &Path) -> anyhow::Result<FeatureInput> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let request: PredictionRequest = serde_json::from_str(&contents)
        .with_context(|| format!("Invalid prediction request in {}", path.display()))?;

    Ok(request.features)
}

fn parse_feature(s: &str) -> Result<(String, FeatureValue), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", s))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing feature name in '{}'", s));
    }

    Ok((name.to_string(), FeatureValue::text(value)))
}
