//! # to-json Subcommand
//!
//! Prints a YAML or JSON file as canonical JSON: mappings become objects
//! with sorted keys, tags are dropped.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use sdata_core::parse;

/// Arguments for the `sdata to-json` subcommand.
#[derive(Args, Debug)]
pub struct ToJsonArgs {
    /// YAML or JSON file (`-` for stdin).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Pretty-print the output.
    #[arg(long)]
    pub pretty: bool,
}

/// Execute the to-json subcommand. Exit code 1 if the input does not parse.
pub fn run_to_json(args: &ToJsonArgs) -> Result<u8> {
    let text = crate::read_input(&args.file)?;
    match render(&text, args.pretty) {
        Ok(json) => {
            println!("{json}");
            Ok(0)
        }
        Err(message) => {
            eprintln!("{message}");
            Ok(1)
        }
    }
}

fn render(text: &str, pretty: bool) -> Result<String, String> {
    let value = parse(text).map_err(|e| format!("Could not parse data: {e}"))?;
    if pretty {
        serde_json::to_string_pretty(&value.to_json()).map_err(|e| e.to_string())
    } else {
        Ok(value.to_json_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_becomes_compact_json() {
        assert_eq!(
            render("name: Ada\nage: 31\ntags: [a, b]", false).unwrap(),
            r#"{"age":31,"name":"Ada","tags":["a","b"]}"#
        );
    }

    #[test]
    fn empty_mapping_stays_an_object() {
        assert_eq!(render("{}", false).unwrap(), "{}");
    }

    #[test]
    fn pretty_output() {
        assert_eq!(render("a: 1", true).unwrap(), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn malformed_input() {
        assert!(render("a: [1", false)
            .unwrap_err()
            .starts_with("Could not parse data: "));
    }
}
