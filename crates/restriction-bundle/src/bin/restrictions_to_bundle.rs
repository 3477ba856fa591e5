//! restrictions-to-bundle: converts a JSON restriction manifest into a
//! bundle and prints it as JSON.
//!
//! Usage:
//! `restrictions-to-bundle [--dialog] [--no-nested] [--max-depth N] [--pretty] [FILE]`
//!
//! Reads stdin when no file is given. Logging is controlled by `RUST_LOG`.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use restriction_bundle::{
    read_manifest, Bundle, ConvertOptions, RestrictionConverter, DEFAULT_MAX_DEPTH,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "restrictions-to-bundle")]
#[command(about = "Convert a JSON restriction manifest into a bundle")]
struct Args {
    /// Manifest file. Reads stdin when omitted.
    input: Option<PathBuf>,

    /// Expand choice restrictions with their entries and values.
    #[arg(long)]
    dialog: bool,

    /// Treat the host as lacking nested bundle support.
    #[arg(long)]
    no_nested: bool,

    /// Maximum bundle nesting below the top-level list.
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Pretty-print the output JSON.
    #[arg(long)]
    pretty: bool,
}

fn convert_options(args: &Args) -> ConvertOptions {
    ConvertOptions::default()
        .with_choice_data(args.dialog)
        .with_nested_bundles(!args.no_nested)
        .with_max_depth(args.max_depth)
}

fn render(bundle: &Bundle, pretty: bool) -> serde_json::Result<String> {
    let json = bundle.to_json();
    if pretty {
        serde_json::to_string_pretty(&json)
    } else {
        serde_json::to_string(&json)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let entries = match &args.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            read_manifest(BufReader::new(file))
                .with_context(|| format!("failed to read {}", path.display()))?
        }
        None => read_manifest(io::stdin().lock()).context("failed to read stdin")?,
    };
    info!(entries = entries.len(), "loaded restriction manifest");

    let bundle = RestrictionConverter::new(convert_options(&args)).convert(&entries)?;
    println!("{}", render(&bundle, args.pretty)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use restriction_bundle::{parse_manifest, RestrictionEntry};

    #[test]
    fn defaults_without_flags() {
        let args = Args::try_parse_from(["restrictions-to-bundle"]).unwrap();
        assert!(args.input.is_none());
        assert_eq!(convert_options(&args), ConvertOptions::default());
        assert!(!args.pretty);
    }

    #[test]
    fn flags_reach_convert_options() {
        let args = Args::try_parse_from([
            "restrictions-to-bundle",
            "--dialog",
            "--no-nested",
            "--max-depth",
            "4",
            "manifest.json",
        ])
        .unwrap();
        assert_eq!(args.input, Some(PathBuf::from("manifest.json")));
        assert_eq!(
            convert_options(&args),
            ConvertOptions::default()
                .with_choice_data(true)
                .with_nested_bundles(false)
                .with_max_depth(4)
        );
    }

    #[test]
    fn invalid_max_depth_is_rejected() {
        assert!(Args::try_parse_from(["restrictions-to-bundle", "--max-depth", "deep"]).is_err());
    }

    #[test]
    fn dialog_flag_changes_choice_output() {
        let entries = parse_manifest(
            r#"[{"key": "mode", "type": 2, "selected_string": "a",
                 "choice_entries": ["A"], "choice_values": ["a"]}]"#,
        )
        .unwrap();
        let storage = Args::try_parse_from(["restrictions-to-bundle"]).unwrap();
        let dialog = Args::try_parse_from(["restrictions-to-bundle", "--dialog"]).unwrap();

        let stored = RestrictionConverter::new(convert_options(&storage))
            .convert(&entries)
            .unwrap();
        let shown = RestrictionConverter::new(convert_options(&dialog))
            .convert(&entries)
            .unwrap();
        assert_eq!(render(&stored, false).unwrap(), r#"{"mode":"a"}"#);
        assert!(shown.get_bundle("mode").is_some());
    }

    #[test]
    fn pretty_flag_changes_rendering() {
        let bundle = RestrictionConverter::default()
            .convert(&[
                RestrictionEntry::boolean("a", true),
                RestrictionEntry::integer("b", 2),
            ])
            .unwrap();
        let compact = render(&bundle, false).unwrap();
        let pretty = render(&bundle, true).unwrap();
        assert_eq!(compact, r#"{"a":true,"b":2}"#);
        assert_eq!(pretty, "{\n  \"a\": true,\n  \"b\": 2\n}");
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&pretty).unwrap(),
            bundle.to_json()
        );
    }
}
