//! In-memory repository.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use super::{Entity, Repository};
use crate::errors::RepoError;

/// Keeps entities in insertion order behind a mutex.
pub struct MemoryRepository<E> {
    rows: Mutex<Vec<E>>,
}

impl<E: Entity> MemoryRepository<E> {
    pub fn new() -> Self {
        Self::with_rows(Vec::new())
    }

    /// Creates a store pre-populated with `rows`.
    pub fn with_rows(rows: Vec<E>) -> Self {
        Self {
            rows: Mutex::new(rows),
        }
    }

    pub fn len(&self) -> Result<usize, RepoError> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, RepoError> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<E>>, RepoError> {
        self.rows.lock().map_err(|_| RepoError::Poisoned)
    }
}

impl<E: Entity> Default for MemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for MemoryRepository<E> {
    async fn get(&self, id: Uuid) -> Result<Option<E>, RepoError> {
        Ok(self.lock()?.iter().find(|e| e.id() == id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<E>, RepoError> {
        Ok(self.lock()?.clone())
    }

    async fn get_by_attribute(&self, attribute: &E::Attribute) -> Result<Option<E>, RepoError> {
        Ok(self.lock()?.iter().find(|e| e.matches(attribute)).cloned())
    }

    async fn add(&self, entity: &E) -> Result<(), RepoError> {
        let mut rows = self.lock()?;
        if rows.iter().any(|e| e.id() == entity.id()) {
            return Err(RepoError::Duplicate {
                kind: E::KIND,
                id: entity.id(),
            });
        }
        rows.push(entity.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut rows = self.lock()?;
        let before = rows.len();
        rows.retain(|e| e.id() != id);
        if rows.len() == before {
            return Err(RepoError::NotFound { kind: E::KIND, id });
        }
        Ok(())
    }
}
