use anyhow::Error;
use consult_config::ConfigError;
use consult_mail::MailError;
use std::process::ExitCode;
use thiserror::Error as ThisError;

pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_INVALID_INPUT: u8 = 3;

#[derive(Debug, ThisError)]
pub enum CliError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("could not hand the request to a mail client; contact {0} directly")]
    DispatchFailed(String),
}

pub fn invalid_input(message: impl Into<String>) -> Error {
    CliError::InvalidInput(message.into()).into()
}

pub fn report_error(err: &Error, verbose: bool) {
    if verbose {
        eprintln!("error: {:#}", err);
    } else {
        eprintln!("error: {}", err);
    }
}

pub fn exit_code_for(err: &Error) -> ExitCode {
    ExitCode::from(exit_status(err))
}

fn exit_status(err: &Error) -> u8 {
    for cause in err.chain() {
        if let Some(cli_err) = cause.downcast_ref::<CliError>() {
            return match cli_err {
                CliError::InvalidInput(_) => EXIT_INVALID_INPUT,
                CliError::DispatchFailed(_) => EXIT_FAILURE,
            };
        }
        if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
            return config_exit_code(config_err);
        }
        if cause.downcast_ref::<MailError>().is_some() {
            return EXIT_FAILURE;
        }
    }
    EXIT_FAILURE
}

fn config_exit_code(err: &ConfigError) -> u8 {
    match err {
        ConfigError::MissingHomeDir => EXIT_FAILURE,
        ConfigError::InvalidConfigPath(_)
        | ConfigError::MissingConfigFile(_)
        | ConfigError::InvalidRecipient(_)
        | ConfigError::EmptySiteName
        | ConfigError::Read { .. }
        | ConfigError::Parse { .. } => EXIT_INVALID_INPUT,
    }
}
