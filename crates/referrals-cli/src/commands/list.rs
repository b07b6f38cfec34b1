use crate::commands::{print_json, Context};
use anyhow::Result;
use clap::Args;
use referrals_core::normalize_email;

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only show referrals made by this referrer (alias-insensitive)
    #[arg(long)]
    pub referrer: Option<String>,
    #[arg(long)]
    pub json: bool,
}

pub fn list(ctx: &Context<'_>, args: ListArgs) -> Result<()> {
    let mut records = ctx.service.records()?;
    if let Some(referrer) = args.referrer {
        let wanted = normalize_email(&referrer);
        records.retain(|record| normalize_email(&record.referrer_email) == wanted);
    }

    if args.json {
        return print_json(&records);
    }

    if records.is_empty() {
        println!("no referrals");
        return Ok(());
    }
    for record in &records {
        println!("{} -> {}", record.referrer_email, record.referee_email);
    }
    Ok(())
}
