use chrono::Utc;
use sqlx::SqliteConnection;
use uuid::Uuid;

use crate::dto::training_center::CreateTrainingCenterRequest;
use crate::error::{Result, StorageError};
use crate::models::TrainingCenter;

/// Repository for TrainingCenter database operations
pub struct TrainingCenterRepository<'a> {
    conn: &'a mut SqliteConnection,
}

impl<'a> TrainingCenterRepository<'a> {
    pub fn new(conn: &'a mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// List all training centers
    pub async fn list(&mut self) -> Result<Vec<TrainingCenter>> {
        let centers = sqlx::query_as::<_, TrainingCenter>(
            r#"
            SELECT id, name, address, owner, created_at
            FROM training_centers
            ORDER BY name
            "#,
        )
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(centers)
    }

    pub async fn find_by_id(&mut self, id: Uuid) -> Result<TrainingCenter> {
        let center = sqlx::query_as::<_, TrainingCenter>(
            r#"
            SELECT id, name, address, owner, created_at
            FROM training_centers
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(center)
    }

    pub async fn find_by_name(&mut self, name: &str) -> Result<Option<TrainingCenter>> {
        let center = sqlx::query_as::<_, TrainingCenter>(
            r#"
            SELECT id, name, address, owner, created_at
            FROM training_centers
            WHERE name = ?
            "#,
        )
        .bind(name)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(center)
    }

    /// Create a new training center
    pub async fn create(&mut self, req: &CreateTrainingCenterRequest) -> Result<TrainingCenter> {
        let center = sqlx::query_as::<_, TrainingCenter>(
            r#"
            INSERT INTO training_centers (id, name, address, owner, created_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, name, address, owner, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&req.name)
        .bind(&req.address)
        .bind(&req.owner)
        .bind(Utc::now().naive_utc())
        .fetch_one(&mut *self.conn)
        .await
        .map_err(|e| {
            StorageError::unique_violation_as(e, || {
                format!("A training center named '{}' already exists", req.name)
            })
        })?;

        Ok(center)
    }
}
