use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;
use consult_core::{ConsultationRequest, EmailDraft};
use consult_mail::write_eml;
use serde::Serialize;
use tracing::debug;

use crate::commands::{print_json, validation_failure, Context, FormArgs};

#[derive(Debug, Args)]
pub struct DraftArgs {
    #[command(flatten)]
    pub form: FormArgs,
    /// Also write the draft as an .eml message
    #[arg(long, value_name = "PATH")]
    pub eml: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct DraftReport<'a> {
    request: &'a ConsultationRequest,
    draft: &'a EmailDraft,
    mailto: String,
}

pub fn draft(ctx: &Context<'_>, args: DraftArgs) -> Result<()> {
    let settings = ctx.config.form_settings()?;
    let request = match args.form.into_form().validate() {
        Ok(request) => request,
        Err(errors) => return Err(validation_failure(ctx, &errors)),
    };
    let draft = EmailDraft::compose(&request, &settings.recipient, &settings.site_name);

    if let Some(path) = &args.eml {
        write_eml(path, &request, &draft)
            .with_context(|| format!("write eml {}", path.display()))?;
        debug!(path = %path.display(), "eml written");
    }

    if ctx.json {
        return print_json(&DraftReport {
            request: &request,
            draft: &draft,
            mailto: draft.mailto_url(),
        });
    }

    println!("To: {}", draft.recipient);
    println!("Subject: {}", draft.subject);
    println!();
    println!("{}", draft.body);
    Ok(())
}
