use super::{json_pretty, load_resources, write_atomic, EXIT_FAILURE, EXIT_SUCCESS};
use clap::ValueEnum;
use devcompose_core::{PlatformContext, SynthesisOptions, SynthesisReport, Synthesizer};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Yaml,
    Json,
}

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub link_dependencies: bool,
    pub strict: bool,
}

pub fn run(
    files: &[PathBuf],
    context: Option<&Path>,
    options: &RenderOptions,
    json: bool,
) -> Result<u8, String> {
    let resources = load_resources(files)?;
    debug!("loaded {} resource(s) from {} file(s)", resources.len(), files.len());
    let context = PlatformContext::resolve(context).map_err(|e| e.to_string())?;
    let synthesizer = Synthesizer::with_options(
        context,
        SynthesisOptions {
            link_dependencies: options.link_dependencies,
        },
    );
    let report = synthesizer.synthesize(&resources);

    let tree = report.document.to_tree().map_err(|e| e.to_string())?;
    let encoded = encode(&tree, options.format)?;

    match &options.output {
        Some(path) => {
            write_atomic(path, &encoded)?;
            if json {
                println!("{}", json_pretty(&summary(&report, Some(path), None))?);
            } else {
                println!(
                    "wrote {} ({} services)",
                    path.display(),
                    report.document.len()
                );
            }
        }
        None if json => {
            println!("{}", json_pretty(&summary(&report, None, Some(tree)))?);
        }
        None => print!("{encoded}"),
    }

    if options.strict && !report.is_complete() {
        return Ok(EXIT_FAILURE);
    }
    Ok(EXIT_SUCCESS)
}

pub fn encode(tree: &Value, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Yaml => {
            serde_yaml::to_string(tree).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Json => json_pretty(tree).map(|s| s + "\n"),
    }
}

fn summary(report: &SynthesisReport, output: Option<&Path>, document: Option<Value>) -> Value {
    let services: Vec<&str> = report
        .document
        .services
        .keys()
        .map(|name| name.as_str())
        .collect();
    let skipped: Vec<Value> = report
        .skipped
        .iter()
        .map(|s| {
            serde_json::json!({
                "deployment": s.deployment,
                "reason": s.error.to_string(),
            })
        })
        .collect();
    let collisions: Vec<&str> = report.collisions.iter().map(|c| c.as_str()).collect();

    let mut payload = serde_json::json!({
        "services": services,
        "skipped": skipped,
        "collisions": collisions,
    });
    if let Some(path) = output {
        payload["output"] = Value::from(path.display().to_string());
    }
    if let Some(document) = document {
        payload["document"] = document;
    }
    payload
}
