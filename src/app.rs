//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - sets up logging
//! - loads the settings (fatal on error)
//! - runs the interactive form or a one-shot quote

use clap::Parser;

use crate::cli::{Command, GlobalArgs, QuoteArgs};
use crate::config::Settings;
use crate::error::AppError;
use crate::logging::{self, LogSink};

pub mod pipeline;

/// Entry point for the `agreement` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    // `agreement` and `agreement --config x.toml` behave like `agreement tui ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    let interactive = matches!(cli.command, Command::Tui);
    logging::init(
        LogSink::choose(cli.global.log_file.as_deref(), interactive),
        cli.global.verbose,
    )?;

    let settings = Settings::load_from(&cli.global.config)?;

    match cli.command {
        Command::Tui => crate::tui::run(&settings, &cli.global),
        Command::Quote(args) => handle_quote(&settings, &cli.global, &args),
    }
}

fn handle_quote(
    settings: &Settings,
    global: &GlobalArgs,
    args: &QuoteArgs,
) -> Result<(), AppError> {
    let rate = args.rate.unwrap_or(settings.base_rate);
    let run = pipeline::submit(&args.driver, &args.plate, args.mileage, rate, settings)?;

    print!(
        "{}",
        crate::report::format_quote_summary(&run.request, &run.cost, settings)
    );

    if !args.no_pdf {
        let path = crate::io::export::write_agreement(&global.out_dir, &run.document)?;
        println!("Agreement written to {}", path.display());
    }
    if let Some(path) = &args.json {
        crate::io::export::write_quote_json(path, &run.record(settings))?;
        println!("Quote written to {}", path.display());
    }

    Ok(())
}

/// Rewrite argv so `agreement` defaults to `agreement tui`.
///
/// Rules:
/// - `agreement`                      -> `agreement tui`
/// - `agreement --config c.toml ...`  -> `agreement tui --config c.toml ...`
/// - `agreement --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "tui" | "quote");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_runs_tui() {
        assert_eq!(
            rewrite_args(argv(&["agreement"])),
            argv(&["agreement", "tui"])
        );
    }

    #[test]
    fn leading_flags_go_to_tui() {
        assert_eq!(
            rewrite_args(argv(&["agreement", "--config", "c.toml"])),
            argv(&["agreement", "tui", "--config", "c.toml"])
        );
    }

    #[test]
    fn help_and_subcommands_unchanged() {
        assert_eq!(
            rewrite_args(argv(&["agreement", "--help"])),
            argv(&["agreement", "--help"])
        );
        assert_eq!(
            rewrite_args(argv(&["agreement", "quote", "--driver", "D"])),
            argv(&["agreement", "quote", "--driver", "D"])
        );
    }
}
