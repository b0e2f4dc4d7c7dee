//! PostgreSQL repository.

use std::marker::PhantomData;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgConnection, PgPool};
use tracing::debug;
use uuid::Uuid;

use super::{Attribute, AttributeValue, Entity, Repository};
use crate::errors::RepoError;
use crate::models::{Amenity, Place, Review, User};

/// Table mapping for an entity stored in PostgreSQL.
#[async_trait]
pub trait PgEntity: Entity + for<'r> FromRow<'r, PgRow> + Unpin {
    const TABLE: &'static str;
    /// Column list used in `SELECT`s, in `FromRow` order.
    const COLUMNS: &'static str;

    async fn insert(&self, conn: &mut PgConnection) -> Result<(), sqlx::Error>;

    /// Fills fields stored outside the entity's own table.
    async fn load_relations(&mut self, _conn: &mut PgConnection) -> Result<(), sqlx::Error> {
        Ok(())
    }

    /// Removes rows owned by the entity in other tables.
    async fn delete_relations(_id: Uuid, _conn: &mut PgConnection) -> Result<(), sqlx::Error> {
        Ok(())
    }
}

pub struct PgRepository<E> {
    pool: PgPool,
    _entity: PhantomData<fn() -> E>,
}

impl<E: PgEntity> PgRepository<E> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }

    async fn hydrate(&self, mut rows: Vec<E>) -> Result<Vec<E>, RepoError> {
        let mut conn = self.pool.acquire().await?;
        for row in &mut rows {
            row.load_relations(&mut *conn).await?;
        }
        Ok(rows)
    }
}

#[async_trait]
impl<E: PgEntity> Repository<E> for PgRepository<E> {
    async fn get(&self, id: Uuid) -> Result<Option<E>, RepoError> {
        let sql = format!("SELECT {} FROM {} WHERE id = $1", E::COLUMNS, E::TABLE);
        let row: Option<E> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(self.hydrate(row.into_iter().collect()).await?.pop())
    }

    async fn get_all(&self) -> Result<Vec<E>, RepoError> {
        let sql = format!("SELECT {} FROM {}", E::COLUMNS, E::TABLE);
        let rows: Vec<E> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;

        self.hydrate(rows).await
    }

    async fn get_by_attribute(&self, attribute: &E::Attribute) -> Result<Option<E>, RepoError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE {} = $1 LIMIT 1",
            E::COLUMNS,
            E::TABLE,
            attribute.column()
        );
        debug!("{} lookup by {}", E::KIND, attribute.column());

        let query = sqlx::query_as::<_, E>(&sql);
        let query = match attribute.value() {
            AttributeValue::Text(v) => query.bind(v),
            AttributeValue::Id(v) => query.bind(v),
            AttributeValue::Flag(v) => query.bind(v),
        };
        let row = query.fetch_optional(&self.pool).await?;

        Ok(self.hydrate(row.into_iter().collect()).await?.pop())
    }

    async fn add(&self, entity: &E) -> Result<(), RepoError> {
        let mut tx = self.pool.begin().await?;
        entity.insert(&mut *tx).await?;
        tx.commit().await?;

        debug!("Inserted {} {}", E::KIND, entity.id());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tx = self.pool.begin().await?;
        E::delete_relations(id, &mut *tx).await?;

        let sql = format!("DELETE FROM {} WHERE id = $1", E::TABLE);
        let result = sqlx::query(&sql).bind(id).execute(&mut *tx).await?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound { kind: E::KIND, id });
        }

        tx.commit().await?;
        debug!("Deleted {} {}", E::KIND, id);
        Ok(())
    }
}

#[async_trait]
impl PgEntity for User {
    const TABLE: &'static str = "users";
    const COLUMNS: &'static str = "id, first_name, last_name, email, password_hash, is_admin";

    async fn insert(&self, conn: &mut PgConnection) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO users (id, first_name, last_name, email, password_hash, is_admin)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(self.id)
        .bind(&self.first_name)
        .bind(&self.last_name)
        .bind(&self.email)
        .bind(&self.password_hash)
        .bind(self.is_admin)
        .execute(conn)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl PgEntity for Amenity {
    const TABLE: &'static str = "amenities";
    const COLUMNS: &'static str = "id, name";

    async fn insert(&self, conn: &mut PgConnection) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO amenities (id, name) VALUES ($1, $2)")
            .bind(self.id)
            .bind(&self.name)
            .execute(conn)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl PgEntity for Place {
    const TABLE: &'static str = "places";
    const COLUMNS: &'static str =
        "id, title, description, price, latitude, longitude, owner_id";

    async fn insert(&self, conn: &mut PgConnection) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO places (id, title, description, price, latitude, longitude, owner_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(self.id)
        .bind(&self.title)
        .bind(&self.description)
        .bind(self.price)
        .bind(self.latitude)
        .bind(self.longitude)
        .bind(self.owner_id)
        .execute(&mut *conn)
        .await?;

        for amenity in &self.amenities {
            sqlx::query("INSERT INTO place_amenity (place_id, amenity_id) VALUES ($1, $2)")
                .bind(self.id)
                .bind(amenity.id)
                .execute(&mut *conn)
                .await?;
        }

        Ok(())
    }

    async fn load_relations(&mut self, conn: &mut PgConnection) -> Result<(), sqlx::Error> {
        self.amenities = sqlx::query_as(
            r#"
            SELECT a.id, a.name
            FROM amenities a
            JOIN place_amenity pa ON pa.amenity_id = a.id
            WHERE pa.place_id = $1
            ORDER BY a.name
            "#,
        )
        .bind(self.id)
        .fetch_all(conn)
        .await?;

        Ok(())
    }

    async fn delete_relations(id: Uuid, conn: &mut PgConnection) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM place_amenity WHERE place_id = $1")
            .bind(id)
            .execute(conn)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl PgEntity for Review {
    const TABLE: &'static str = "reviews";
    const COLUMNS: &'static str = "id, text, rating, place_id, user_id";

    async fn insert(&self, conn: &mut PgConnection) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO reviews (id, text, rating, place_id, user_id)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(self.id)
        .bind(&self.text)
        .bind(self.rating)
        .bind(self.place_id)
        .bind(self.user_id)
        .execute(conn)
        .await?;

        Ok(())
    }
}
