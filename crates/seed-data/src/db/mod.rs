//! Database workflows for the sample data.
//!
//! The [`Seeder`] inserts the sample records that are missing and the
//! [`PlaceResetter`] removes every place ahead of a re-seed.

mod resetter;
mod seeder;

pub use resetter::{PlaceResetter, ResetReport};
pub use seeder::{SeedError, SeedReport, Seeder, Tally};
