use anyhow::Result;
use clap::Args;
use consult_config::AppConfig;
use consult_core::{ConsultationForm, FieldErrors};
use serde::Serialize;
use std::io::{self, Write};

use crate::error::invalid_input;

pub mod completions;
pub mod draft;
pub mod needs;
pub mod submit;
pub mod tui;

pub struct Context<'a> {
    pub json: bool,
    pub config: &'a AppConfig,
}

/// Form fields as flags. Everything is optional so validation can report every
/// missing field at once.
#[derive(Debug, Args)]
pub struct FormArgs {
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub company: Option<String>,
    /// One of: rpa, idp, workflow, data, customer, compliance, integration, other
    #[arg(long = "needs", value_name = "NEED")]
    pub automation_needs: Option<String>,
    #[arg(long)]
    pub message: Option<String>,
    /// Agree to receive communications about this request
    #[arg(long)]
    pub consent: bool,
}

impl FormArgs {
    pub fn into_form(self) -> ConsultationForm {
        ConsultationForm {
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            phone: self.phone.unwrap_or_default(),
            company: self.company.unwrap_or_default(),
            automation_needs: self.automation_needs.unwrap_or_default(),
            message: self.message.unwrap_or_default(),
            consent: self.consent,
        }
    }
}

#[derive(Debug, Serialize)]
struct FieldErrorDto {
    field: &'static str,
    message: &'static str,
}

/// Prints every field error and returns the error that sets the exit code.
pub fn validation_failure(ctx: &Context<'_>, errors: &FieldErrors) -> anyhow::Error {
    if ctx.json {
        let items: Vec<FieldErrorDto> = errors
            .iter()
            .map(|(field, message)| FieldErrorDto {
                field: field.name(),
                message,
            })
            .collect();
        if let Err(err) = print_json(&serde_json::json!({ "errors": items })) {
            return err;
        }
    } else {
        for (field, message) in errors.iter() {
            eprintln!("  {}: {}", field.label(), message);
        }
    }
    invalid_input(format!(
        "consultation request has {} invalid field(s)",
        errors.len()
    ))
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
