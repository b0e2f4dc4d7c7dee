//! Deletes every place so the seed tool can recreate them.
//!
//! Run with:
//! ```
//! cargo run -p seed-data --bin reset-places
//! ```

use seed_data::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = SeedConfig::from_env()?;

    let db = Database::connect(&config.database_url, config.max_connections).await?;
    let repos = db.repositories();
    let result = PlaceResetter::new(&repos).run().await;
    drop(repos);
    db.close().await;
    let report = result?;

    tracing::info!(
        "Reset completed: {} places deleted, {} orphaned reviews",
        report.deleted,
        report.orphaned_reviews
    );

    Ok(())
}
