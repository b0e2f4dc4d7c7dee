//! Bulk removal of seeded places.

use std::collections::HashSet;

use hbnb::Repositories;
use serde::Serialize;
use tracing::{info, warn};

use super::SeedError;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResetReport {
    pub deleted: usize,
    /// Reviews left pointing at a place that no longer exists.
    pub orphaned_reviews: usize,
}

/// Deletes every place so the seeder recreates them with current amenities.
///
/// Reviews are neither deleted nor updated. Reviews of a deleted place are
/// counted and reported as orphaned.
pub struct PlaceResetter<'a> {
    repos: &'a Repositories,
}

impl<'a> PlaceResetter<'a> {
    pub fn new(repos: &'a Repositories) -> Self {
        Self { repos }
    }

    pub async fn run(&self) -> Result<ResetReport, SeedError> {
        let places = self.repos.places.get_all().await?;
        info!("Deleting {} existing places...", places.len());

        for place in &places {
            self.repos.places.delete(place.id).await?;
            info!("Place deleted: {}", place.title);
        }

        let orphaned_reviews = self.count_orphaned_reviews().await?;
        if orphaned_reviews > 0 {
            warn!(
                "{} reviews reference places that no longer exist",
                orphaned_reviews
            );
        }

        info!("All places deleted. Run the seed tool to re-insert them with amenities.");
        Ok(ResetReport {
            deleted: places.len(),
            orphaned_reviews,
        })
    }

    async fn count_orphaned_reviews(&self) -> Result<usize, SeedError> {
        let remaining: HashSet<_> = self
            .repos
            .places
            .get_all()
            .await?
            .into_iter()
            .map(|p| p.id)
            .collect();

        let reviews = self.repos.reviews.get_all().await?;
        Ok(reviews
            .iter()
            .filter(|r| !remaining.contains(&r.place_id))
            .count())
    }
}
