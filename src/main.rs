//! defgen — command-line driver for the protocol client generator.
//!
//! Reads a JSON protocol description, runs the
//! load → resolve → plan → emit pipeline, and writes the generated source
//! units under the output directory. All pipeline logic lives in the
//! workspace crates; this binary is glue.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use defgen_config::{load_config, GenConfig};
use defgen_emit::{emit_protocol, EmitOptions};
use defgen_model::{lower, resolve};
use defgen_schema::parse_protocol;

const USAGE: &str = "usage: defgen <protocol.json> [--out DIR] [--config FILE]";

/// Parsed command-line arguments.
struct Args {
    /// Path of the protocol description document.
    schema: PathBuf,
    /// Output directory override; defaults to the configured directory.
    out: Option<PathBuf>,
    /// Explicit config file; defaults to `./defgen.toml` when present.
    config: Option<PathBuf>,
}

fn parse_args(args: &[String]) -> Result<Args> {
    let mut schema = None;
    let mut out = None;
    let mut config = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--out" => {
                out = Some(PathBuf::from(
                    iter.next().with_context(|| format!("--out needs a value\n{USAGE}"))?,
                ));
            }
            "--config" => {
                config = Some(PathBuf::from(
                    iter.next()
                        .with_context(|| format!("--config needs a value\n{USAGE}"))?,
                ));
            }
            other if other.starts_with('-') => bail!("unknown option `{other}`\n{USAGE}"),
            other => {
                if schema.replace(PathBuf::from(other)).is_some() {
                    bail!("more than one schema path given\n{USAGE}");
                }
            }
        }
    }

    Ok(Args {
        schema: schema.with_context(|| format!("missing schema path\n{USAGE}"))?,
        out,
        config,
    })
}

fn load_configuration(args: &Args) -> Result<GenConfig> {
    match &args.config {
        // An explicitly named config file must load.
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load config: {}", path.display())),
        None => {
            let default = Path::new("defgen.toml");
            if default.exists() {
                Ok(load_config(default).unwrap_or_else(|e| {
                    error!("config load failed, using defaults: {}", e);
                    GenConfig::default()
                }))
            } else {
                Ok(GenConfig::default())
            }
        }
    }
}

fn run(args: Args) -> Result<()> {
    let config = load_configuration(&args)?;

    // Direct tracing output to stderr so generated files on stdout-like
    // flows stay clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log.level.as_filter())),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let text = std::fs::read_to_string(&args.schema)
        .with_context(|| format!("failed to read schema: {}", args.schema.display()))?;
    let raw = parse_protocol(&text)?;
    let protocol = lower(raw)?;
    let model = resolve(&protocol)?;

    let options = EmitOptions {
        support_path: config.emit.support_path.clone(),
    };
    let units = emit_protocol(&model, &options);

    let out_dir = args
        .out
        .unwrap_or_else(|| PathBuf::from(&config.output.dir));
    for unit in &units {
        let path = out_dir.join(&unit.path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        std::fs::write(&path, &unit.contents)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    info!(
        domains = model.domains().len(),
        units = units.len(),
        out = %out_dir.display(),
        "generation complete"
    );
    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let parsed = match parse_args(&args[1..]) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("defgen: {e:#}");
            std::process::exit(2);
        }
    };
    if let Err(e) = run(parsed) {
        eprintln!("defgen: {e:#}");
        std::process::exit(1);
    }
}
