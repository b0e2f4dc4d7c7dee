//! HBnB domain models and persistence.
//!
//! Provides the four HBnB entities ([`User`], [`Amenity`], [`Place`],
//! [`Review`]), Argon2 password hashing, and a generic [`Repository`] with
//! PostgreSQL and in-memory backends.

pub mod auth;
pub mod database;
pub mod errors;
pub mod models;
pub mod repository;

pub use database::Database;
pub use errors::{ModelError, RepoError};
pub use models::{
    Amenity, AmenityAttribute, Place, PlaceAttribute, Review, ReviewAttribute, User,
    UserAttribute,
};
pub use repository::{
    Attribute, AttributeValue, Entity, MemoryRepository, PgEntity, PgRepository, Repositories,
    Repository,
};
