//! Command-line parsing for the agreement generator.
//!
//! Argument parsing and command dispatch stay separate from the pricing and
//! rendering code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::DEFAULT_CONFIG_PATH;
use crate::domain::INPUT_FLOOR;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "agreement", version, about = "Logistics Service Agreement Generator")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every command.
#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Settings file (.toml or .json).
    #[arg(long, global = true, env = "AGREEMENT_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Directory downloaded agreements are written to.
    #[arg(long, global = true, env = "AGREEMENT_OUT_DIR", default_value = ".")]
    pub out_dir: PathBuf,

    /// Append logs to this file instead of stderr.
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Debug-level logging (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive form (default).
    Tui,
    /// Compute a quote and write the agreement without the interactive form.
    Quote(QuoteArgs),
}

#[derive(Debug, Clone, Args)]
pub struct QuoteArgs {
    /// Driver name (required, non-empty).
    #[arg(long)]
    pub driver: String,

    /// License plate number.
    #[arg(long, default_value = "")]
    pub plate: String,

    /// Shipment mileage (at least 0.01).
    #[arg(long, value_parser = parse_floored)]
    pub mileage: f64,

    /// Rate per mile (at least 0.01). Defaults to the configured base rate.
    #[arg(long, value_parser = parse_floored)]
    pub rate: Option<f64>,

    /// Skip writing service_agreement.pdf.
    #[arg(long)]
    pub no_pdf: bool,

    /// Also write the quote (inputs + cost breakdown) as JSON.
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,
}

/// Parse a number that must be finite and at least `INPUT_FLOOR`.
fn parse_floored(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|e| format!("'{raw}' is not a number: {e}"))?;
    if !value.is_finite() || value < INPUT_FLOOR {
        return Err(format!("must be a number >= {INPUT_FLOOR} (got {raw})"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_args_parse() {
        let cli = Cli::try_parse_from([
            "agreement", "quote", "--driver", "Dana", "--mileage", "50", "--rate", "2",
        ])
        .unwrap();
        let Command::Quote(args) = cli.command else {
            panic!("expected quote");
        };
        assert_eq!(args.driver, "Dana");
        assert_eq!(args.plate, "");
        assert_eq!(args.mileage, 50.0);
        assert_eq!(args.rate, Some(2.0));
    }

    #[test]
    fn mileage_below_floor_is_rejected() {
        let res = Cli::try_parse_from(["agreement", "quote", "--driver", "Dana", "--mileage", "0"]);
        assert!(res.is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["agreement", "tui", "--config", "other.json", "-v"]).unwrap();
        assert_eq!(cli.global.config, PathBuf::from("other.json"));
        assert!(cli.global.verbose);
    }

    #[test]
    fn floored_parser() {
        assert_eq!(parse_floored("0.01"), Ok(0.01));
        assert!(parse_floored("0.001").is_err());
        assert!(parse_floored("NaN").is_err());
        assert!(parse_floored("x").is_err());
    }
}
