use sqlx::{QueryBuilder, Sqlite, SqliteConnection};
use uuid::Uuid;

use crate::dto::athlete::{AthleteFilter, UpdateAthleteRequest};
use crate::error::{Result, StorageError};
use crate::models::{Athlete, AthleteDetail};

const ATHLETE_COLUMNS: &str = "id, name, national_id, age, weight, height, sex, created_at, \
                               category_id, training_center_id";

const DETAIL_SELECT: &str = r#"
    SELECT a.id, a.name, a.national_id, a.age, a.weight, a.height, a.sex, a.created_at,
           c.name AS category_name,
           t.name AS training_center_name
    FROM athletes a
    INNER JOIN categories c ON c.id = a.category_id
    INNER JOIN training_centers t ON t.id = a.training_center_id
    WHERE 1=1
"#;

pub struct AthleteRepository<'a> {
    conn: &'a mut SqliteConnection,
}

impl<'a> AthleteRepository<'a> {
    pub fn new(conn: &'a mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// Find the raw athlete row by ID
    pub async fn find_row(&mut self, id: Uuid) -> Result<Athlete> {
        let athlete = sqlx::query_as::<_, Athlete>(&format!(
            "SELECT {ATHLETE_COLUMNS} FROM athletes WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(athlete)
    }

    /// Find athlete by ID, with category and training center names
    pub async fn find_by_id(&mut self, id: Uuid) -> Result<AthleteDetail> {
        let mut query = QueryBuilder::<Sqlite>::new(DETAIL_SELECT);
        query.push(" AND a.id = ");
        query.push_bind(id);

        let athlete = query
            .build_query_as::<AthleteDetail>()
            .fetch_optional(&mut *self.conn)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(athlete)
    }

    /// All athletes matching every filter that is set
    pub async fn query(&mut self, filter: &AthleteFilter) -> Result<Vec<AthleteDetail>> {
        let mut query = QueryBuilder::<Sqlite>::new(DETAIL_SELECT);
        push_filters(&mut query, filter);
        query.push(" ORDER BY a.name, a.created_at");

        let athletes = query
            .build_query_as::<AthleteDetail>()
            .fetch_all(&mut *self.conn)
            .await?;

        Ok(athletes)
    }

    /// One page of `query`
    pub async fn query_page(
        &mut self,
        filter: &AthleteFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<AthleteDetail>> {
        let mut query = QueryBuilder::<Sqlite>::new(DETAIL_SELECT);
        push_filters(&mut query, filter);
        query.push(" ORDER BY a.name, a.created_at LIMIT ");
        query.push_bind(limit);
        query.push(" OFFSET ");
        query.push_bind(offset);

        let athletes = query
            .build_query_as::<AthleteDetail>()
            .fetch_all(&mut *self.conn)
            .await?;

        Ok(athletes)
    }

    pub async fn count(&mut self, filter: &AthleteFilter) -> Result<i64> {
        let mut query = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM athletes a WHERE 1=1");
        push_filters(&mut query, filter);

        let count = query
            .build_query_scalar::<i64>()
            .fetch_one(&mut *self.conn)
            .await?;

        Ok(count)
    }

    /// Insert a fully built athlete row
    pub async fn create(&mut self, athlete: &Athlete) -> Result<Athlete> {
        let created = sqlx::query_as::<_, Athlete>(&format!(
            r#"
            INSERT INTO athletes ({ATHLETE_COLUMNS})
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {ATHLETE_COLUMNS}
            "#
        ))
        .bind(athlete.id)
        .bind(&athlete.name)
        .bind(&athlete.national_id)
        .bind(athlete.age)
        .bind(athlete.weight)
        .bind(athlete.height)
        .bind(&athlete.sex)
        .bind(athlete.created_at)
        .bind(athlete.category_id)
        .bind(athlete.training_center_id)
        .fetch_one(&mut *self.conn)
        .await
        .map_err(|e| {
            let error = StorageError::unique_violation_as(e, || {
                format!(
                    "An athlete with national id {} is already registered",
                    athlete.national_id
                )
            });
            if error.is_foreign_key_violation() {
                StorageError::InvalidReference(
                    "Category or training center was not found".to_string(),
                )
            } else {
                error
            }
        })?;

        Ok(created)
    }

    /// Update an existing athlete, keeping every field the request leaves out
    pub async fn update(
        &mut self,
        id: Uuid,
        existing: &Athlete,
        req: &UpdateAthleteRequest,
    ) -> Result<Athlete> {
        let name = req.name.or(&existing.name);
        let age = req.age.or(&existing.age);
        let weight = req.weight.or(&existing.weight);
        let height = req.height.or(&existing.height);
        let sex = req.sex.or(&existing.sex);

        let athlete = sqlx::query_as::<_, Athlete>(&format!(
            r#"
            UPDATE athletes
            SET name = ?,
                age = ?,
                weight = ?,
                height = ?,
                sex = ?
            WHERE id = ?
            RETURNING {ATHLETE_COLUMNS}
            "#
        ))
        .bind(name)
        .bind(age)
        .bind(weight)
        .bind(height)
        .bind(sex)
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(athlete)
    }

    /// Delete an athlete by ID
    pub async fn delete(&mut self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM athletes WHERE id = ?")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

fn push_filters(query: &mut QueryBuilder<'_, Sqlite>, filter: &AthleteFilter) {
    if let Some(ref name) = filter.name {
        query.push(" AND a.name = ");
        query.push_bind(name.clone());
    }

    if let Some(ref national_id) = filter.national_id {
        query.push(" AND a.national_id = ");
        query.push_bind(national_id.clone());
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::dto::category::CreateCategoryRequest;
    use crate::dto::common::Patch;
    use crate::dto::training_center::CreateTrainingCenterRequest;
    use crate::repository::category::CategoryRepository;
    use crate::repository::test_support::migrated_db;
    use crate::repository::training_center::TrainingCenterRepository;

    async fn references(conn: &mut SqliteConnection) -> (Uuid, Uuid) {
        let category = CategoryRepository::new(conn)
            .create(&CreateCategoryRequest {
                name: "Scale".to_string(),
            })
            .await
            .unwrap();
        let center = TrainingCenterRepository::new(conn)
            .create(&CreateTrainingCenterRequest {
                name: "CT King".to_string(),
                address: None,
                owner: None,
            })
            .await
            .unwrap();
        (category.id, center.id)
    }

    fn athlete(name: &str, national_id: &str, refs: (Uuid, Uuid)) -> Athlete {
        Athlete {
            id: Uuid::new_v4(),
            name: name.to_string(),
            national_id: national_id.to_string(),
            age: 25,
            weight: 75.5,
            height: 1.8,
            sex: "M".to_string(),
            created_at: Utc::now().naive_utc(),
            category_id: refs.0,
            training_center_id: refs.1,
        }
    }

    #[tokio::test]
    async fn test_create_and_find_detail() {
        let db = migrated_db().await;
        let mut conn = db.pool().acquire().await.unwrap();
        let refs = references(&mut conn).await;
        let mut repo = AthleteRepository::new(&mut conn);

        let created = repo.create(&athlete("Joao", "111", refs)).await.unwrap();
        let detail = repo.find_by_id(created.id).await.unwrap();

        assert_eq!(detail.name, "Joao");
        assert_eq!(detail.category_name, "Scale");
        assert_eq!(detail.training_center_name, "CT King");
    }

    #[tokio::test]
    async fn test_duplicate_national_id() {
        let db = migrated_db().await;
        let mut conn = db.pool().acquire().await.unwrap();
        let refs = references(&mut conn).await;
        let mut repo = AthleteRepository::new(&mut conn);

        repo.create(&athlete("Joao", "111", refs)).await.unwrap();
        let err = repo.create(&athlete("Maria", "111", refs)).await.unwrap_err();

        assert!(matches!(err, StorageError::ConstraintViolation(_)));
    }

    #[tokio::test]
    async fn test_unknown_category_is_invalid_reference() {
        let db = migrated_db().await;
        let mut conn = db.pool().acquire().await.unwrap();
        let (_, center) = references(&mut conn).await;
        let mut repo = AthleteRepository::new(&mut conn);

        let err = repo
            .create(&athlete("Joao", "111", (Uuid::new_v4(), center)))
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::InvalidReference(_)));
    }

    #[tokio::test]
    async fn test_query_filters_and_pages() {
        let db = migrated_db().await;
        let mut conn = db.pool().acquire().await.unwrap();
        let refs = references(&mut conn).await;
        let mut repo = AthleteRepository::new(&mut conn);

        repo.create(&athlete("Ana", "1", refs)).await.unwrap();
        repo.create(&athlete("Bruno", "2", refs)).await.unwrap();
        repo.create(&athlete("Bruno", "3", refs)).await.unwrap();

        let everyone = AthleteFilter::default();
        assert_eq!(repo.query(&everyone).await.unwrap().len(), 3);
        assert_eq!(repo.count(&everyone).await.unwrap(), 3);

        let page = repo.query_page(&everyone, 1, 1).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].name, "Bruno");

        let brunos = AthleteFilter {
            name: Some("Bruno".to_string()),
            national_id: None,
        };
        assert_eq!(repo.count(&brunos).await.unwrap(), 2);

        let one = AthleteFilter {
            name: Some("Bruno".to_string()),
            national_id: Some("3".to_string()),
        };
        let found = repo.query(&one).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].national_id, "3");
    }

    #[tokio::test]
    async fn test_update_applies_only_sent_fields() {
        let db = migrated_db().await;
        let mut conn = db.pool().acquire().await.unwrap();
        let refs = references(&mut conn).await;
        let mut repo = AthleteRepository::new(&mut conn);

        let created = repo.create(&athlete("Joao", "111", refs)).await.unwrap();
        let request = UpdateAthleteRequest {
            weight: Patch::Present(80.0),
            ..Default::default()
        };
        let updated = repo.update(created.id, &created, &request).await.unwrap();

        assert_eq!(updated.weight, 80.0);
        assert_eq!(updated.name, "Joao");
        assert_eq!(updated.age, 25);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_delete_missing() {
        let db = migrated_db().await;
        let mut conn = db.pool().acquire().await.unwrap();
        let mut repo = AthleteRepository::new(&mut conn);

        let err = repo.delete(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
    }
}
