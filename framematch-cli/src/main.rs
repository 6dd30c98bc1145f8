use clap::Parser;
use framematch::io::{load_rgba_image, load_template_image, TEMPLATE_MAX_DIM};
use framematch::{DetectionEngine, DetectionResult, EngineConfig, SearchConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "FrameMatch CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for performance profiling.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize)]
struct TemplateEntry {
    name: String,
    path: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct SearchConfigJson {
    max_candidates: usize,
    early_exit: f32,
    margin_cap: usize,
    margin_frac: f32,
    step_divisor: usize,
    min_step: usize,
    sample_divisor: usize,
}

impl Default for SearchConfigJson {
    fn default() -> Self {
        let cfg = SearchConfig::default();
        Self {
            max_candidates: cfg.max_candidates,
            early_exit: cfg.early_exit,
            margin_cap: cfg.margin_cap,
            margin_frac: cfg.margin_frac,
            step_divisor: cfg.step_divisor,
            min_step: cfg.min_step,
            sample_divisor: cfg.sample_divisor,
        }
    }
}

impl From<SearchConfigJson> for SearchConfig {
    fn from(value: SearchConfigJson) -> Self {
        Self {
            max_candidates: value.max_candidates,
            early_exit: value.early_exit,
            margin_cap: value.margin_cap,
            margin_frac: value.margin_frac,
            step_divisor: value.step_divisor,
            min_step: value.min_step,
            sample_divisor: value.sample_divisor,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    frame_path: String,
    templates: Vec<TemplateEntry>,
    threshold: f32,
    max_template_dim: u32,
    output_path: Option<String>,
    search: SearchConfigJson,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            frame_path: String::new(),
            templates: Vec::new(),
            threshold: EngineConfig::default().threshold,
            max_template_dim: TEMPLATE_MAX_DIM,
            output_path: None,
            search: SearchConfigJson::default(),
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    detected: bool,
    template: Option<String>,
    x: Option<usize>,
    y: Option<usize>,
    width: Option<usize>,
    height: Option<usize>,
    confidence: f32,
}

impl From<DetectionResult> for Output {
    fn from(value: DetectionResult) -> Self {
        Self {
            detected: value.detected,
            template: value.template,
            x: value.position.map(|p| p.x),
            y: value.position.map(|p| p.y),
            width: value.size.map(|s| s.width),
            height: value.size.map(|s| s.height),
            confidence: value.confidence,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive("framematch=debug".parse()?),
            )
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.frame_path.is_empty() {
        return Err("frame_path must be set in the config".into());
    }
    if config.templates.is_empty() {
        return Err("at least one template must be listed in the config".into());
    }

    let mut engine = DetectionEngine::with_config(EngineConfig {
        threshold: config.threshold,
        search: config.search.into(),
        ..EngineConfig::default()
    });

    for entry in &config.templates {
        let img = load_template_image(&entry.path, config.max_template_dim)?;
        engine.register_template(
            entry.name.clone(),
            img.data().to_vec(),
            img.width(),
            img.height(),
        )?;
    }

    let frame = load_rgba_image(&config.frame_path)?;
    let result = engine.detect(frame.view())?;
    let output = Output::from(result);
    let json = serde_json::to_string_pretty(&output)?;

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
