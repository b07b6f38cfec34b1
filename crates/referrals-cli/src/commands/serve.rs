use crate::commands::Context;
use anyhow::{Context as _, Result};
use axum::Router;
use clap::Args;
use referrals_cli::http::build_router;
use referrals_cli::notify::{LogNotifier, Notifier};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to listen on (default 127.0.0.1:8000)
    #[arg(long)]
    pub bind: Option<SocketAddr>,
}

pub fn serve(ctx: &Context<'_>, args: ServeArgs) -> Result<()> {
    let addr = args.bind.unwrap_or(ctx.config.bind);
    let notifier: Arc<dyn Notifier> = Arc::new(LogNotifier);
    let app = build_router(Arc::clone(&ctx.service), notifier);

    info!(
        %addr,
        max_referrals = ctx.service.policy().max_referrals_per_referrer(),
        "starting referrals API"
    );
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .with_context(|| "start async runtime")?;
    runtime.block_on(run_server(addr, app))
}

async fn run_server(addr: SocketAddr, app: Router) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    info!(%addr, "referrals API listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .with_context(|| "serve HTTP")?;
    info!("referrals API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
