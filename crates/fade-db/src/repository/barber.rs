//! # Barber Repository
//!
//! Database operations for staff records.
//!
//! The wider entity CRUD (phones, schedules, specialties) lives in the
//! external management app; the engine persists only what settlement needs:
//! identity, display name, and the active flag.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use fade_core::Barber;

/// Repository for barber database operations.
#[derive(Debug, Clone)]
pub struct BarberRepository {
    pool: SqlitePool,
}

impl BarberRepository {
    /// Creates a new BarberRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BarberRepository { pool }
    }

    /// Gets a barber by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Barber>> {
        let barber = sqlx::query_as::<_, Barber>(
            r#"
            SELECT id, display_name, is_active, created_at, updated_at
            FROM barbers
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(barber)
    }

    /// Inserts a barber record.
    pub async fn insert(&self, barber: &Barber) -> DbResult<()> {
        debug!(id = %barber.id, name = %barber.display_name, "Inserting barber");

        sqlx::query(
            r#"
            INSERT INTO barbers (id, display_name, is_active, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&barber.id)
        .bind(&barber.display_name)
        .bind(barber.is_active)
        .bind(barber.created_at)
        .bind(barber.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Lists active barbers ordered by display name.
    pub async fn list_active(&self) -> DbResult<Vec<Barber>> {
        let barbers = sqlx::query_as::<_, Barber>(
            r#"
            SELECT id, display_name, is_active, created_at, updated_at
            FROM barbers
            WHERE is_active = 1
            ORDER BY display_name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(barbers)
    }

    /// Soft-deletes a barber. Historical policies, calculations and
    /// adjustments stay in place.
    pub async fn deactivate(&self, id: &str) -> DbResult<()> {
        let now = chrono::Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE barbers SET is_active = 0, updated_at = ?2
            WHERE id = ?1 AND is_active = 1
            "#,
        )
        .bind(id)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Barber", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::Utc;
    use uuid::Uuid;

    fn barber(name: &str) -> Barber {
        let now = Utc::now();
        Barber {
            id: Uuid::new_v4().to_string(),
            display_name: name.to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let marcos = barber("Marcos Silva");

        db.barbers().insert(&marcos).await.unwrap();

        let found = db.barbers().get_by_id(&marcos.id).await.unwrap().unwrap();
        assert_eq!(found, marcos);

        assert!(db.barbers().get_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_active_excludes_deactivated() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let a = barber("Ana");
        let b = barber("Bruno");
        db.barbers().insert(&a).await.unwrap();
        db.barbers().insert(&b).await.unwrap();

        db.barbers().deactivate(&b.id).await.unwrap();

        let active = db.barbers().list_active().await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, a.id);

        // Deactivating twice reports not found (already inactive)
        assert!(db.barbers().deactivate(&b.id).await.is_err());
    }
}
