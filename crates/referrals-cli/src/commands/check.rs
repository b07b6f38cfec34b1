use crate::commands::{print_json, Context};
use crate::error::invalid_input;
use anyhow::Result;
use clap::Args;
use referrals_core::domain::EmailAddress;
use referrals_store::RegisterError;
use serde::Serialize;

#[derive(Debug, Args)]
pub struct CheckArgs {
    #[arg(long)]
    pub referrer: String,
    #[arg(long)]
    pub referee: String,
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct CheckDto {
    accepted: bool,
    normalized_referrer: String,
    normalized_referee: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

pub fn check(ctx: &Context<'_>, args: CheckArgs) -> Result<()> {
    let referrer = EmailAddress::parse(&args.referrer)?;
    let referee = EmailAddress::parse(&args.referee)?;

    match ctx.service.evaluate(referrer.as_str(), referee.as_str()) {
        Ok(outcome) => {
            if args.json {
                print_json(&CheckDto {
                    accepted: true,
                    normalized_referrer: outcome.normalized_referrer,
                    normalized_referee: outcome.normalized_referee,
                    reason: None,
                })?;
            } else {
                println!(
                    "accepted: {} -> {}",
                    outcome.normalized_referrer, outcome.normalized_referee
                );
            }
            Ok(())
        }
        Err(RegisterError::Rejected(rejection)) => {
            if args.json {
                print_json(&CheckDto {
                    accepted: false,
                    normalized_referrer: referrer.normalized(),
                    normalized_referee: referee.normalized(),
                    reason: Some(rejection.to_string()),
                })?;
            }
            Err(invalid_input(rejection.to_string()))
        }
        Err(err) => Err(err.into()),
    }
}
