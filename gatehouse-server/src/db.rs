use anyhow::Context;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::info;

use gatehouse_core::store::PostgresUserStore;

use crate::infra::config::Config;

static STORE: OnceCell<Arc<PostgresUserStore>> = OnceCell::const_new();

/// Idempotent store bootstrap: connects and initializes the schema at most
/// once per process, then hands out the shared handle. Connection failure is
/// surfaced to the caller as a fatal startup error rather than swallowed.
pub async fn ensure_connected(config: &Config) -> anyhow::Result<Arc<PostgresUserStore>> {
    let store = STORE
        .get_or_try_init(|| async {
            let store = PostgresUserStore::connect(&config.database_url)
                .await
                .context("failed to connect to the credential store")?;

            store
                .initialize_schema()
                .await
                .context("failed to initialize the credential store schema")?;

            info!("credential store ready");
            Ok::<_, anyhow::Error>(Arc::new(store))
        })
        .await?;

    Ok(store.clone())
}
