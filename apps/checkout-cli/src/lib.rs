//! # Checkout CLI
//!
//! Thin host around `checkout-core`: loads pricing config, reads one JSON
//! request, prints the JSON summary.
//!
//! ## Usage
//! ```bash
//! # Request from a file
//! cargo run -p checkout-cli -- order.json
//!
//! # Request from stdin, custom config
//! echo '{"user_id": 1, "items": [{"price": 50, "qty": 2}]}' \
//!     | cargo run -p checkout-cli -- --config ./checkout.toml
//! ```
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging, to stderr)
//! 2. Parse arguments
//! 3. Load config (file → env → validate)
//! 4. Read request, run the calculator, print the result

pub mod config;
pub mod error;

use std::io::Read;
use std::path::PathBuf;

use tracing::debug;
use tracing_subscriber::EnvFilter;

use checkout_core::CheckoutCalculator;

use crate::config::CheckoutConfig;
use crate::error::{AppError, AppResult};

/// Parsed command line.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CliArgs {
    /// `--config <path>`
    pub config: Option<PathBuf>,
    /// Request file; stdin when absent.
    pub request: Option<PathBuf>,
}

impl CliArgs {
    /// Parses arguments, excluding the program name.
    pub fn parse(args: &[String]) -> AppResult<Self> {
        let mut parsed = CliArgs::default();
        let mut i = 0;

        while i < args.len() {
            match args[i].as_str() {
                "--config" | "-c" => {
                    let path = args
                        .get(i + 1)
                        .ok_or_else(|| AppError::Usage("--config requires a path".into()))?;
                    parsed.config = Some(PathBuf::from(path));
                    i += 1;
                }
                flag if flag.starts_with('-') && flag != "-" => {
                    return Err(AppError::Usage(format!("unknown option {}", flag)));
                }
                path => {
                    if parsed.request.is_some() {
                        return Err(AppError::Usage("only one request file is accepted".into()));
                    }
                    // "-" means stdin
                    if path != "-" {
                        parsed.request = Some(PathBuf::from(path));
                    }
                }
            }
            i += 1;
        }

        Ok(parsed)
    }
}

/// Runs the CLI and returns the text to print on stdout.
pub fn run(args: &[String]) -> AppResult<String> {
    let args = CliArgs::parse(args)?;
    let config = CheckoutConfig::load(args.config)?;

    let input = match &args.request {
        Some(path) => std::fs::read_to_string(path).map_err(|source| AppError::Read {
            path: path.clone(),
            source,
        })?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    checkout(&config, &input)
}

/// Runs one checkout on a JSON document and renders the result.
pub fn checkout(config: &CheckoutConfig, input: &str) -> AppResult<String> {
    let request: serde_json::Value = serde_json::from_str(input)?;
    debug!(bytes = input.len(), "Request parsed");

    let calculator = CheckoutCalculator::with_policy(config.policy());
    let result = calculator.process_value(&request)?;

    Ok(serde_json::to_string_pretty(&result)?)
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show every pipeline step
/// - `RUST_LOG=checkout_core=trace` - Trace the core crate only
/// - Default: INFO, DEBUG for the checkout crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,checkout_core=debug,checkout_cli=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkout_core::CheckoutError;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        assert_eq!(CliArgs::parse(&[]).unwrap(), CliArgs::default());

        let parsed = CliArgs::parse(&args(&["--config", "c.toml", "order.json"])).unwrap();
        assert_eq!(parsed.config, Some(PathBuf::from("c.toml")));
        assert_eq!(parsed.request, Some(PathBuf::from("order.json")));

        let parsed = CliArgs::parse(&args(&["-"])).unwrap();
        assert_eq!(parsed.request, None);
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(matches!(CliArgs::parse(&args(&["--config"])), Err(AppError::Usage(_))));
        assert!(matches!(CliArgs::parse(&args(&["--verbose"])), Err(AppError::Usage(_))));
        assert!(matches!(CliArgs::parse(&args(&["a.json", "b.json"])), Err(AppError::Usage(_))));
    }

    #[test]
    fn test_checkout_renders_json() {
        let out = checkout(
            &CheckoutConfig::default(),
            r#"{"user_id": 2, "items": [{"price": 30, "qty": 3}], "coupon": "SAVE10"}"#,
        )
        .unwrap();

        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["order_id"], "2-1-X");
        assert_eq!(value["discount"], 9);
        assert_eq!(value["total"], 98);
        assert_eq!(value["currency"], "USD");
    }

    #[test]
    fn test_checkout_uses_config_policy() {
        let mut config = CheckoutConfig::default();
        config.pricing.default_currency = "EUR".to_string();
        config.pricing.tax_rate_bps = 0;

        let out = checkout(&config, r#"{"user_id": 1, "items": [{"price": 50, "qty": 2}]}"#).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["tax"], 0);
        assert_eq!(value["total"], 100);
        assert_eq!(value["currency"], "EUR");
    }

    #[test]
    fn test_checkout_errors() {
        let config = CheckoutConfig::default();

        let err = checkout(&config, "{not json").unwrap_err();
        assert!(matches!(err, AppError::Json(_)));
        assert_eq!(err.exit_code(), 2);

        let err = checkout(&config, r#"{"user_id": 1, "items": [{"price": 10, "qty": 1}], "coupon": "???"}"#)
            .unwrap_err();
        assert!(matches!(err, AppError::Checkout(CheckoutError::UnknownCoupon(_))));
        assert_eq!(err.exit_code(), 1);
    }
}
