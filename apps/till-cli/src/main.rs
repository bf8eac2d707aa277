//! # till
//!
//! Scans a string of SKUs and prints the priced receipt.
//!
//! ## Usage
//! ```bash
//! # Scan from an argument
//! till --input "ABBCCCCC"
//!
//! # Scan from stdin
//! echo "a69B$42*0(Cdb" | till
//!
//! # Use a custom pricing table
//! till --config ./pricing.toml --input "AAAB"
//! ```
//!
//! Characters that are not letters are skipped, as are letters with no
//! pricing rule. Logs go to stderr, the receipt to stdout.

mod config;
mod error;
mod scanner;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use tracing::{debug, Subscriber};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use till_core::{Checkout, InMemoryBasket, ReceiptLine};

use crate::config::TillConfig;
use crate::error::{CliError, CliResult};
use crate::scanner::SkuScanner;

#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    config: Option<PathBuf>,
    input: Option<String>,
    quiet: bool,
    help: bool,
}

impl Args {
    fn parse<I>(args: I) -> CliResult<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut parsed = Args::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" | "-c" => {
                    let path = args
                        .next()
                        .ok_or_else(|| CliError::Usage("--config needs a path".into()))?;
                    parsed.config = Some(PathBuf::from(path));
                }
                "--input" | "-i" => {
                    let input = args
                        .next()
                        .ok_or_else(|| CliError::Usage("--input needs a value".into()))?;
                    parsed.input = Some(input);
                }
                "--quiet" | "-q" => parsed.quiet = true,
                "--help" | "-h" => parsed.help = true,
                other => return Err(CliError::Usage(format!("unknown argument: {other}"))),
            }
        }

        Ok(parsed)
    }
}

const HELP: &str = "\
till - checkout pricing

Usage: till [OPTIONS]

Options:
  -c, --config <PATH>   Pricing table (TOML). Default: TILL_CONFIG or the user config dir
  -i, --input <SKUS>    Items to scan. Default: read from stdin
  -q, --quiet           Only log warnings
  -h, --help            Show this help message

Environment:
  TILL_PRICING_MODE     simple | special
  RUST_LOG              Log filter, e.g. till=debug";

/// Filter used when `RUST_LOG` is unset.
fn default_log_filter(quiet: bool) -> &'static str {
    if quiet {
        "warn"
    } else {
        "info"
    }
}

/// Formatting subscriber writing to stderr, gated only by `filter`.
fn log_subscriber(filter: EnvFilter) -> impl Subscriber + Send + Sync {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish()
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show every scan
/// - Default: INFO, or WARN with `--quiet`
fn init_tracing(quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_filter(quiet)));

    log_subscriber(filter).init();
}

fn print_receipt<W: Write>(out: &mut W, checkout: &Checkout) -> io::Result<()> {
    for ReceiptLine { sku, quantity, price } in checkout.receipt() {
        writeln!(out, "{sku} x{quantity:<6} {:>10}", price.to_string())?;
    }
    let total = checkout.total_price();
    writeln!(out, "total: {} pence ({})", total.pence(), total)
}

fn run(args: Args) -> CliResult<()> {
    let config = TillConfig::load(args.config)?;

    let checkout = Checkout::builder()
        .pricing_rules(config.pricing_rules())
        .basket(Arc::new(InMemoryBasket::new()))
        .build()?;

    let summary = match args.input {
        Some(input) => checkout.scan_items(SkuScanner::new(io::Cursor::new(input.into_bytes())))?,
        None => checkout.scan_items(SkuScanner::new(io::stdin().lock()))?,
    };
    debug!(?summary, "Input consumed");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    print_receipt(&mut out, &checkout)?;

    Ok(())
}

fn main() -> ExitCode {
    let args = match Args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    if args.help {
        println!("{HELP}");
        return ExitCode::SUCCESS;
    }

    init_tracing(args.quiet);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use till_core::{PricingData, Quantity, Sku, SpecialPricing};

    fn args(list: &[&str]) -> CliResult<Args> {
        Args::parse(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_args() {
        let parsed = args(&["--config", "p.toml", "-i", "ABC", "-q"]).unwrap();
        assert_eq!(
            parsed,
            Args {
                config: Some(PathBuf::from("p.toml")),
                input: Some("ABC".into()),
                quiet: true,
                help: false,
            }
        );

        assert_eq!(args(&[]).unwrap(), Args::default());
        assert!(args(&["-h"]).unwrap().help);
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(matches!(args(&["--input"]), Err(CliError::Usage(_))));
        assert!(matches!(args(&["--bogus"]), Err(CliError::Usage(_))));
    }

    #[test]
    fn test_quiet_logs_only_warnings() {
        let subscriber = log_subscriber(EnvFilter::new(default_log_filter(true)));

        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(tracing::Level::WARN));
            assert!(!tracing::enabled!(tracing::Level::INFO));
            assert!(!tracing::enabled!(tracing::Level::DEBUG));
        });
    }

    #[test]
    fn test_default_logs_info_but_not_scans() {
        let subscriber = log_subscriber(EnvFilter::new(default_log_filter(false)));

        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(tracing::Level::INFO));
            assert!(!tracing::enabled!(tracing::Level::DEBUG));
        });
    }

    #[test]
    fn test_receipt_output() {
        let sku = |c| Sku::new(c).unwrap();
        let pricing: SpecialPricing = [
            (sku('A'), PricingData::unit(10)),
            (sku('B'), PricingData::with_special(20, 10, 2)),
        ]
        .into_iter()
        .collect();
        let checkout = Checkout::new(Arc::new(pricing), Arc::new(InMemoryBasket::new()));
        checkout.scan(sku('B'), Quantity::new(3)).unwrap();
        checkout.scan(sku('A'), Quantity::new(1)).unwrap();

        let mut out = Vec::new();
        print_receipt(&mut out, &checkout).unwrap();
        let text = String::from_utf8(out).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("A x1"));
        assert!(lines[1].starts_with("B x3"));
        assert!(lines[1].ends_with("£0.30"));
        assert_eq!(lines[2], "total: 40 pence (£0.40)");
    }

    #[test]
    fn test_scan_pipeline_with_default_config() {
        let config = TillConfig::default();
        let checkout = Checkout::builder()
            .pricing_rules(config.pricing_rules())
            .basket(Arc::new(InMemoryBasket::new()))
            .build()
            .unwrap();

        let summary = checkout
            .scan_items(SkuScanner::new(io::Cursor::new(b"ABBCCCCC".to_vec())))
            .unwrap();

        assert_eq!(summary.scanned, 8);
        assert_eq!(checkout.total_price().pence(), 50);
    }
}
