/// Example: Fill the `{{key}}` placeholders of a PowerPoint template.
///
/// Values come from `--set key=value` arguments and from an optional YAML
/// file of top-level `key: value` pairs; `--set` wins on conflicts. Without
/// either, a small demonstration mapping is used.
///
/// Usage:
///   cargo run --example update_template template.pptx out.pptx --set theme=School
///   RUST_LOG=deckfill=debug cargo run --example update_template template.pptx out.pptx --data values.yaml
use clap::Parser;
use deckfill::{Replacements, TemplateUpdater};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser, Debug)]
#[command(name = "update_template", about = "Fill placeholders in a .pptx template")]
struct Args {
    /// Template presentation to read
    template: PathBuf,

    /// Where to write the filled presentation
    output: PathBuf,

    /// Placeholder value, as key=value (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_pair)]
    set: Vec<(String, String)>,

    /// YAML file with placeholder values
    #[arg(long, value_name = "FILE")]
    data: Option<PathBuf>,
}

fn parse_pair(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
    Ok((key.trim().to_string(), value.to_string()))
}

/// A YAML scalar value. `null` fills the placeholder with nothing and
/// floats always keep a decimal point (`1.0`, not `1`).
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => Ok(()),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Int(n) => write!(f, "{}", n),
            Scalar::Float(x) => write!(f, "{:?}", x),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

fn demo_values() -> Replacements {
    Replacements::new()
        .with("theme", "School")
        .with(
            "description",
            "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Sed do eiusmod tempor \
             incididunt ut labore et dolore magna aliqua.",
        )
}

fn read_values(yaml: &str) -> Result<Replacements, serde_saphyr::Error> {
    let data: BTreeMap<String, Scalar> = serde_saphyr::from_str(yaml)?;
    Ok(data.into_iter().collect())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "deckfill=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let values = if args.set.is_empty() && args.data.is_none() {
        demo_values()
    } else {
        let mut values = Replacements::new();
        if let Some(path) = &args.data {
            values = read_values(&std::fs::read_to_string(path)?)?;
        }
        for (key, value) in args.set {
            values.insert(key, value);
        }
        values
    };

    println!("Filling {} with {} value(s)", args.template.display(), values.len());

    let mut updater = TemplateUpdater::new(&args.template, &args.output)?;
    updater.update_template(&values)?;

    println!("Wrote {}", args.output.display());
    Ok(())
}
