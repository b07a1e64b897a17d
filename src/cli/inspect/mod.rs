//! Inspect command - validate the model artifact and describe it

use std::fmt::Write;

use anyhow::Context;

use crate::config::AppConfig;
use crate::domain::{FeatureKind, ModelArtifact};
use crate::infrastructure::services::PredictionService;

pub fn run(config: AppConfig) -> anyhow::Result<()> {
    let predictor = crate::load_predictor(&config).with_context(|| {
        format!(
            "Failed to load model artifact from {}",
            config.model.path.display()
        )
    })?;

    print!("{}", describe(predictor.artifact())?);

    PredictionService::new(std::sync::Arc::new(predictor))
        .self_check()
        .context("Model failed its self check")?;
    println!("self check: ok");

    Ok(())
}

fn describe(artifact: &ModelArtifact) -> Result<String, std::fmt::Error> {
    let mut out = String::new();

    writeln!(out, "model:      {}", artifact.name)?;
    if let Some(description) = &artifact.description {
        writeln!(out, "about:      {}", description)?;
    }
    writeln!(out, "format:     v{}", artifact.format_version)?;
    writeln!(out, "classifier: {}", artifact.classifier.kind())?;

    let classes: Vec<&str> = artifact.classes.iter().map(|c| c.name.as_str()).collect();
    writeln!(out, "classes:    {}", classes.join(", "))?;

    writeln!(out, "features:")?;
    for (index, feature) in artifact.features.features().iter().enumerate() {
        let kind = match &feature.kind {
            FeatureKind::Numeric { min, max, integer } => {
                let unit = if *integer { "integer" } else { "number" };
                format!("{} in [{}, {}]", unit, min, max)
            }
            FeatureKind::Categorical { options } => options
                .iter()
                .map(|o| format!("{}={}", o.label, o.code))
                .collect::<Vec<_>>()
                .join(" | "),
        };

        writeln!(out, "  {:>2}. {:<18} {}", index, feature.name, kind)?;
    }

    Ok(out)
}
