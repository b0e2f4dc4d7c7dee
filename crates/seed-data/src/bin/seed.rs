//! Inserts the HBnB sample data, skipping records that already exist.
//!
//! Run with:
//! ```
//! cargo run -p seed-data --bin seed
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
    let data = config.load_fixtures()?;

    let db = Database::connect(&config.database_url, config.max_connections).await?;
    let repos = db.repositories();
    let result = Seeder::new(&repos).run(&data).await;
    drop(repos);
    db.close().await;
    let report = result?;

    tracing::debug!("Seed report: {}", serde_json::to_string(&report)?);

    // Summary output
    tracing::info!("Seed completed!");
    for (label, tally) in [
        ("Users", report.users),
        ("Amenities", report.amenities),
        ("Places", report.places),
        ("Reviews", report.reviews),
    ] {
        tracing::info!(
            "  {}: {} created, {} already present",
            label,
            tally.created,
            tally.existing
        );
    }

    tracing::info!("You can login with any of these accounts:");
    for user in &data.users {
        let role = if user.is_admin { " (admin)" } else { "" };
        tracing::info!(
            "  {}{}: {} / {}",
            user.first_name,
            role,
            user.email,
            user.password
        );
    }

    Ok(())
}
