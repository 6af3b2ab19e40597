//! Command helpers for the `dicebag` binary.

use anyhow::{Context, Result};
use dicebag::{entries_from_json, Random, RandomConfig};
use rayon::prelude::*;
use serde_json::Value;
use std::path::Path;
use tracing::info;

/// Build a dispatcher, loading configuration from a YAML file when given.
pub fn build_random(config_path: Option<&Path>) -> Result<Random> {
    let config = match config_path {
        Some(path) => {
            let config = RandomConfig::load(path)
                .with_context(|| format!("Failed to load config from {:?}", path))?;
            info!(path = %path.display(), locale = %config.locale, "loaded config");
            config
        }
        None => RandomConfig::default(),
    };
    Ok(Random::builder().config(config).build())
}

/// Parse positional generator arguments.
///
/// Each argument is read as JSON; anything that does not parse is kept as a
/// plain string, so `run date 2024-01-01` works without quoting.
pub fn parse_args(raw: &[String]) -> Vec<Value> {
    raw.iter()
        .map(|arg| serde_json::from_str(arg).unwrap_or_else(|_| Value::String(arg.clone())))
        .collect()
}

/// Sample `count` weighted dispatches of `op` over the JSON pairs in `entries`.
///
/// An absent result (no entry selected) is reported as `null`.
pub fn pick(random: &Random, entries: &str, op: &str, count: usize) -> Result<Vec<Value>> {
    let json: Value = serde_json::from_str(entries)
        .with_context(|| format!("--entries is not valid JSON: {}", entries))?;
    let entries = entries_from_json(&json).context("Invalid weighted entries")?;

    let values = (0..count)
        .into_par_iter()
        .map(|_| random.generate(op, &entries))
        .collect::<dicebag::Result<Vec<_>>>()
        .with_context(|| format!("Failed to dispatch '{}'", op))?;

    Ok(values
        .into_iter()
        .map(|value| value.unwrap_or(Value::Null))
        .collect())
}

/// Invoke the registered generator `name` `count` times.
pub fn run(random: &Random, name: &str, args: &[Value], count: usize) -> Result<Vec<Value>> {
    (0..count)
        .into_par_iter()
        .map(|_| random.invoke(name, args))
        .collect::<dicebag::Result<Vec<_>>>()
        .with_context(|| format!("Failed to run '{}'", name))
}

/// Registered operation names, sorted.
pub fn operation_names(random: &Random) -> Vec<String> {
    random.registry().names().map(str::to_string).collect()
}

/// Print one JSON value per line; strings are printed bare.
pub fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
