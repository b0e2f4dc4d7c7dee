//! Generic data access for the HBnB entities.
//!
//! Every entity type gets the same five operations through [`Repository`]:
//! `get`, `get_all`, `get_by_attribute`, `add` and `delete`. Lookups by a
//! non-identifier field go through a typed per-entity attribute enum (for
//! example [`UserAttribute::Email`](crate::models::UserAttribute::Email)), so
//! field names are checked at compile time.
//!
//! Two backends are provided:
//! - [`PgRepository`]: PostgreSQL through sqlx
//! - [`MemoryRepository`]: a process-local store for tests

mod memory;
mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::RepoError;
use crate::models::{Amenity, Place, Review, User};

pub use memory::MemoryRepository;
pub use postgres::{PgEntity, PgRepository};

/// A value carried by an attribute lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Text(String),
    Id(Uuid),
    Flag(bool),
}

/// A field an entity can be looked up by, together with the value to match.
pub trait Attribute: Send + Sync {
    /// Column backing the field.
    fn column(&self) -> &'static str;

    fn value(&self) -> AttributeValue;
}

/// A persisted HBnB record.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Human-readable type name used in errors and logs.
    const KIND: &'static str;

    type Attribute: Attribute;

    fn id(&self) -> Uuid;

    /// Whether this entity's field equals the attribute's value.
    fn matches(&self, attribute: &Self::Attribute) -> bool;
}

#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<E>, RepoError>;

    async fn get_all(&self) -> Result<Vec<E>, RepoError>;

    /// Returns the first entity whose field matches, if any.
    async fn get_by_attribute(&self, attribute: &E::Attribute) -> Result<Option<E>, RepoError>;

    async fn add(&self, entity: &E) -> Result<(), RepoError>;

    /// Deletes by id. Fails with [`RepoError::NotFound`] if nothing was deleted.
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}

/// One repository per entity type.
pub struct Repositories {
    pub users: Box<dyn Repository<User>>,
    pub amenities: Box<dyn Repository<Amenity>>,
    pub places: Box<dyn Repository<Place>>,
    pub reviews: Box<dyn Repository<Review>>,
}

impl Repositories {
    /// Repositories backed by PostgreSQL.
    pub fn postgres(pool: &sqlx::PgPool) -> Self {
        Self {
            users: Box::new(PgRepository::<User>::new(pool.clone())),
            amenities: Box::new(PgRepository::<Amenity>::new(pool.clone())),
            places: Box::new(PgRepository::<Place>::new(pool.clone())),
            reviews: Box::new(PgRepository::<Review>::new(pool.clone())),
        }
    }

    /// Empty in-memory repositories.
    pub fn in_memory() -> Self {
        Self {
            users: Box::new(MemoryRepository::<User>::new()),
            amenities: Box::new(MemoryRepository::<Amenity>::new()),
            places: Box::new(MemoryRepository::<Place>::new()),
            reviews: Box::new(MemoryRepository::<Review>::new()),
        }
    }
}
