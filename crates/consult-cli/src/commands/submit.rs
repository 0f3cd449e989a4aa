use std::io;
use std::time::Instant;

use anyhow::{anyhow, Result};
use clap::Args;
use consult_config::DispatchMode;
use consult_core::{EmailDraft, FormController, SubmitOutcome};
use consult_mail::MailHandler;
use serde::Serialize;

use crate::commands::{print_json, validation_failure, Context, FormArgs};
use crate::error::CliError;
use crate::notify::build_notifier;

#[derive(Debug, Args)]
pub struct SubmitArgs {
    #[command(flatten)]
    pub form: FormArgs,
    /// Print the mailto URL instead of opening the mail client
    #[arg(long)]
    pub print: bool,
}

#[derive(Debug, Serialize)]
struct SubmitReport<'a> {
    state: &'static str,
    mailto: String,
    draft: &'a EmailDraft,
}

pub fn submit(ctx: &Context<'_>, args: SubmitArgs) -> Result<()> {
    let settings = ctx.config.form_settings()?;
    let print = args.print || ctx.config.dispatch.mode == DispatchMode::Print;
    let handler = if !print {
        MailHandler::system()
    } else if ctx.json {
        // the report already carries the URL
        MailHandler::print_to(Box::new(io::sink()))
    } else {
        MailHandler::print()
    };
    let notifier = build_notifier(&ctx.config.notifications, ctx.json)?;

    let mut controller = FormController::new(settings, handler, notifier);
    let form = args.form.into_form();
    controller.edit(|target| *target = form);

    match controller.submit(Instant::now()) {
        SubmitOutcome::Dispatched(draft) => {
            if ctx.json {
                print_json(&SubmitReport {
                    state: "submitted",
                    mailto: draft.mailto_url(),
                    draft: &draft,
                })?;
            }
            Ok(())
        }
        SubmitOutcome::Invalid => Err(validation_failure(ctx, controller.errors())),
        SubmitOutcome::Failed => Err(CliError::DispatchFailed(
            controller.settings().recipient.to_string(),
        )
        .into()),
        SubmitOutcome::Ignored => Err(anyhow!("form is not accepting submissions")),
    }
}
