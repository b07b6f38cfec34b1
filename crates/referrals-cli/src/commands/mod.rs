use anyhow::Result;
use referrals_config::AppConfig;
use referrals_store::{CsvStore, ReferralService};
use serde::Serialize;
use std::io::{self, Write};
use std::sync::Arc;

pub mod check;
pub mod list;
pub mod serve;

pub struct Context<'a> {
    pub service: Arc<ReferralService<CsvStore>>,
    pub config: &'a AppConfig,
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
