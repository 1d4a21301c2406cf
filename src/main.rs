use std::sync::Arc;

use anyhow::Context;

use lead_form::cli::CliFrontend;
use lead_form::config::FormConfig;
use lead_form::form::{FormSession, SessionDeps};
use lead_form::notify::{DataLayer, LiveRegion, ToastRack};
use lead_form::store::LibSqlDraftStore;
use lead_form::submit::GoogleFormsClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = FormConfig::from_env().context("invalid lead form configuration")?;

    eprintln!("📝 Lead Form v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Endpoint: {}", config.endpoint);
    eprintln!("   Draft DB: {}", config.db_path.display());
    eprintln!("   Type 'help' for commands. /quit to exit.\n");

    let store = LibSqlDraftStore::new_local(&config.db_path)
        .await
        .context("failed to open draft store")?;

    let analytics = Arc::new(DataLayer::new());
    let live_region = LiveRegion::new();
    let toasts = ToastRack::new();

    let deps = SessionDeps {
        store: Arc::new(store),
        ingest: Arc::new(GoogleFormsClient::new(config.endpoint.clone())),
        analytics: analytics.clone(),
        announcer: Arc::new(live_region.clone()),
        notifier: Arc::new(toasts.clone()),
    };

    let session = FormSession::mount(deps, &config).await;
    if let lead_form::store::RestoreOutcome::Discarded { reason } = session.restore_outcome() {
        eprintln!("⚠️  Your saved answers could not be read and were cleared ({reason}).");
    }

    let session = CliFrontend::new(session, live_region, toasts).run().await?;

    tracing::info!(
        session_id = %session.id(),
        submitted = session.is_submitted(),
        events = analytics.len(),
        "Session ended"
    );
    Ok(())
}
