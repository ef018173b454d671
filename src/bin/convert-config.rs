//! Converts the relay's TOML settings into the JSON file the extension loads.

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::Context;

const DEFAULT_INPUT: &str = "config.toml";
const DEFAULT_OUTPUT: &str = "web-extension/config.json";

fn main() -> anyhow::Result<()> {
    let mut args = env::args_os().skip(1);
    let input = args.next().map(PathBuf::from).unwrap_or_else(|| DEFAULT_INPUT.into());
    let output = args.next().map(PathBuf::from).unwrap_or_else(|| DEFAULT_OUTPUT.into());

    let raw = fs::read_to_string(&input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let json = to_pretty_json(&raw)
        .with_context(|| format!("failed to convert {}", input.display()))?;
    fs::write(&output, json).with_context(|| format!("failed to write {}", output.display()))?;

    println!("Converted {} to {}", input.display(), output.display());
    Ok(())
}

fn to_pretty_json(raw: &str) -> anyhow::Result<String> {
    let value: toml::Value = toml::from_str(raw).context("invalid TOML")?;
    Ok(serde_json::to_string_pretty(&value)?)
}
