//! Sample data for HBnB.
//!
//! Seeds users, amenities, places and reviews into an HBnB database without
//! creating duplicates, and resets places so they can be re-seeded.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use seed_data::prelude::*;
//!
//! let db = Database::connect(&config.database_url, config.max_connections).await?;
//! let repos = db.repositories();
//!
//! let report = Seeder::new(&repos).run(&SeedData::sample()).await?;
//! ```

pub mod config;
pub mod db;
pub mod fixtures;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::config::{ConfigError, SeedConfig};
    pub use crate::db::{PlaceResetter, ResetReport, SeedError, SeedReport, Seeder, Tally};
    pub use crate::fixtures::{AmenitySeed, PlaceSeed, ReviewSeed, SeedData, UserSeed};
    pub use hbnb::{Database, Repositories};
}
