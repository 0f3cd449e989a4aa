mod commands;
mod error;
mod notify;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{completions, draft, needs, submit, tui, Context};
use crate::error::{exit_code_for, report_error};
use consult_config as config;

#[derive(Debug, Parser)]
#[command(name = "consult", version, about = "consult CLI")]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate the request and hand it to the mail client
    Submit(submit::SubmitArgs),
    /// Validate the request and print the email draft
    Draft(draft::DraftArgs),
    /// List the values accepted by --needs
    Needs,
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
    /// Launch the interactive form
    Tui,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        config: config_path,
        json,
        verbose,
        command,
    } = cli;

    match command {
        Command::Tui => tui::launch(config_path, verbose),
        Command::Completions(args) => completions::emit(args),
        command => {
            let app_config = config::load(config_path.clone()).with_context(|| "load config")?;
            if verbose {
                match config::resolve_config_path(config_path) {
                    Ok(path) => {
                        if path.exists() {
                            debug!(path = %path.display(), "config resolved");
                        } else {
                            debug!(path = %path.display(), "config missing, using defaults");
                        }
                    }
                    Err(err) => {
                        debug!(error = %err, "config unavailable");
                    }
                }
            }

            let ctx = Context {
                json,
                config: &app_config,
            };

            match command {
                Command::Submit(args) => submit::submit(&ctx, args),
                Command::Draft(args) => draft::draft(&ctx, args),
                Command::Needs => needs::list_needs(&ctx),
                Command::Tui => unreachable!("tui command handled before config load"),
                Command::Completions(_) => {
                    unreachable!("completions command handled before config load")
                }
            }
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
