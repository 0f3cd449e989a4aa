use anyhow::Result;
use consult_core::AutomationNeed;
use serde::Serialize;

use crate::commands::{print_json, Context};

#[derive(Debug, Serialize)]
struct NeedDto {
    code: &'static str,
    label: &'static str,
}

pub fn list_needs(ctx: &Context<'_>) -> Result<()> {
    if ctx.json {
        let items: Vec<NeedDto> = AutomationNeed::ALL
            .into_iter()
            .map(|need| NeedDto {
                code: need.code(),
                label: need.label(),
            })
            .collect();
        return print_json(&items);
    }

    for need in AutomationNeed::ALL {
        println!("{:<12} {}", need.code(), need.label());
    }
    Ok(())
}
