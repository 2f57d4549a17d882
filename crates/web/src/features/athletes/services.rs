use chrono::Utc;
use storage::{
    Database,
    dto::{
        athlete::{AthleteFilter, CreateAthleteRequest, UpdateAthleteRequest},
        common::PaginationParams,
    },
    error::{Result, StorageError},
    models::{Athlete, AthleteDetail},
    repository::{
        athlete::AthleteRepository, category::CategoryRepository,
        training_center::TrainingCenterRepository,
    },
};
use uuid::Uuid;

/// Create an athlete after resolving its category and training center by name
pub async fn create_athlete(db: &Database, request: &CreateAthleteRequest) -> Result<AthleteDetail> {
    let mut tx = db.begin().await?;

    let category = CategoryRepository::new(&mut *tx)
        .find_by_name(&request.category.name)
        .await?
        .ok_or_else(|| {
            StorageError::InvalidReference(format!(
                "Category {} was not found",
                request.category.name
            ))
        })?;

    let training_center = TrainingCenterRepository::new(&mut *tx)
        .find_by_name(&request.training_center.name)
        .await?
        .ok_or_else(|| {
            StorageError::InvalidReference(format!(
                "Training center {} was not found",
                request.training_center.name
            ))
        })?;

    let athlete = Athlete {
        id: Uuid::new_v4(),
        name: request.name.clone(),
        national_id: request.national_id.clone(),
        age: request.age,
        weight: request.weight,
        height: request.height,
        sex: request.sex.clone(),
        created_at: Utc::now().naive_utc(),
        category_id: category.id,
        training_center_id: training_center.id,
    };

    let result = AthleteRepository::new(&mut *tx).create(&athlete).await;
    let created = match result {
        Ok(created) => created,
        Err(e) => {
            tx.rollback().await?;
            return Err(e);
        }
    };
    tx.commit().await?;

    tracing::info!(athlete_id = %created.id, "Athlete created");

    Ok(AthleteDetail::from_parts(
        created,
        category.name,
        training_center.name,
    ))
}

/// Get athlete by ID
pub async fn get_athlete(db: &Database, id: Uuid) -> Result<AthleteDetail> {
    let mut tx = db.begin().await?;
    let athlete = AthleteRepository::new(&mut *tx).find_by_id(id).await?;
    tx.commit().await?;
    Ok(athlete)
}

/// Every athlete matching the filter, unpaginated
pub async fn query_athletes(db: &Database, filter: &AthleteFilter) -> Result<Vec<AthleteDetail>> {
    let mut tx = db.begin().await?;
    let athletes = AthleteRepository::new(&mut *tx).query(filter).await?;
    tx.commit().await?;
    Ok(athletes)
}

/// One page of athletes matching the filter, with the total match count
pub async fn query_athletes_page(
    db: &Database,
    filter: &AthleteFilter,
    pagination: &PaginationParams,
) -> Result<(Vec<AthleteDetail>, i64)> {
    let mut tx = db.begin().await?;
    let mut repo = AthleteRepository::new(&mut *tx);

    let total_items = repo.count(filter).await?;
    let athletes = repo
        .query_page(filter, pagination.offset(), pagination.limit())
        .await?;

    tx.commit().await?;
    Ok((athletes, total_items))
}

/// Update an athlete
pub async fn update_athlete(
    db: &Database,
    id: Uuid,
    request: &UpdateAthleteRequest,
) -> Result<AthleteDetail> {
    let mut tx = db.begin().await?;
    let mut repo = AthleteRepository::new(&mut *tx);

    let existing = repo.find_row(id).await?;
    if !request.is_empty() {
        repo.update(id, &existing, request).await?;
    }
    let updated = repo.find_by_id(id).await?;

    tx.commit().await?;
    Ok(updated)
}

/// Delete an athlete
pub async fn delete_athlete(db: &Database, id: Uuid) -> Result<()> {
    let mut tx = db.begin().await?;
    AthleteRepository::new(&mut *tx).delete(id).await?;
    tx.commit().await?;

    tracing::info!(athlete_id = %id, "Athlete deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use storage::dto::{
        athlete::{CategoryRef, TrainingCenterRef},
        common::Patch,
    };

    use super::*;
    use crate::test_support::{migrated_db, seed_references};

    fn request(name: &str, national_id: &str) -> CreateAthleteRequest {
        CreateAthleteRequest {
            name: name.to_string(),
            national_id: national_id.to_string(),
            age: 25,
            weight: 75.5,
            height: 1.8,
            sex: "M".to_string(),
            category: CategoryRef {
                name: "Scale".to_string(),
            },
            training_center: TrainingCenterRef {
                name: "CT King".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn test_create_returns_reference_names() {
        let db = migrated_db().await;
        seed_references(&db).await;

        let athlete = create_athlete(&db, &request("Joao", "111")).await.unwrap();

        assert_eq!(athlete.category_name, "Scale");
        assert_eq!(athlete.training_center_name, "CT King");
        assert_eq!(get_athlete(&db, athlete.id).await.unwrap().name, "Joao");
    }

    #[tokio::test]
    async fn test_create_with_missing_category() {
        let db = migrated_db().await;
        seed_references(&db).await;

        let mut req = request("Joao", "111");
        req.category.name = "Unknown".to_string();

        let err = create_athlete(&db, &req).await.unwrap_err();
        match err {
            StorageError::InvalidReference(msg) => assert!(msg.contains("Category Unknown")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_with_missing_training_center() {
        let db = migrated_db().await;
        seed_references(&db).await;

        let mut req = request("Joao", "111");
        req.training_center.name = "Nowhere".to_string();

        let err = create_athlete(&db, &req).await.unwrap_err();
        match err {
            StorageError::InvalidReference(msg) => assert!(msg.contains("Training center Nowhere")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_with_both_references_missing() {
        let db = migrated_db().await;

        let err = create_athlete(&db, &request("Joao", "111")).await.unwrap_err();

        assert!(matches!(err, StorageError::InvalidReference(_)));
        assert!(
            query_athletes(&db, &AthleteFilter::default())
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_duplicate_national_id_keeps_first() {
        let db = migrated_db().await;
        seed_references(&db).await;

        let first = create_athlete(&db, &request("Joao", "111")).await.unwrap();
        let err = create_athlete(&db, &request("Maria", "111")).await.unwrap_err();
        assert!(matches!(err, StorageError::ConstraintViolation(_)));

        let all = query_athletes(&db, &AthleteFilter::default()).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, first.id);
        assert_eq!(get_athlete(&db, first.id).await.unwrap().name, "Joao");
    }

    #[tokio::test]
    async fn test_query_filters() {
        let db = migrated_db().await;
        seed_references(&db).await;

        create_athlete(&db, &request("Joao", "111")).await.unwrap();
        create_athlete(&db, &request("Joao", "222")).await.unwrap();
        create_athlete(&db, &request("Joao Pedro", "333")).await.unwrap();

        let all = query_athletes(&db, &AthleteFilter::default()).await.unwrap();
        assert_eq!(all.len(), 3);

        let by_name = AthleteFilter {
            name: Some("Joao".to_string()),
            national_id: None,
        };
        let found = query_athletes(&db, &by_name).await.unwrap();
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|a| a.name == "Joao"));

        let both = AthleteFilter {
            name: Some("Joao".to_string()),
            national_id: Some("222".to_string()),
        };
        let found = query_athletes(&db, &both).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].national_id, "222");

        let disjoint = AthleteFilter {
            name: Some("Joao Pedro".to_string()),
            national_id: Some("111".to_string()),
        };
        assert!(query_athletes(&db, &disjoint).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_query_page_reports_total() {
        let db = migrated_db().await;
        seed_references(&db).await;

        for i in 0..5 {
            create_athlete(&db, &request(&format!("Athlete {i}"), &i.to_string()))
                .await
                .unwrap();
        }

        let pagination = PaginationParams {
            page: 2,
            page_size: 2,
        };
        let (page, total) = query_athletes_page(&db, &AthleteFilter::default(), &pagination)
            .await
            .unwrap();

        assert_eq!(total, 5);
        let names: Vec<_> = page.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["Athlete 2", "Athlete 3"]);
    }

    #[tokio::test]
    async fn test_partial_update_only_touches_sent_fields() {
        let db = migrated_db().await;
        seed_references(&db).await;
        let created = create_athlete(&db, &request("Joao", "111")).await.unwrap();

        let update = UpdateAthleteRequest {
            age: Patch::Present(31),
            ..Default::default()
        };
        let updated = update_athlete(&db, created.id, &update).await.unwrap();

        assert_eq!(updated.age, 31);
        assert_eq!(updated.name, "Joao");
        assert_eq!(updated.national_id, "111");
        assert_eq!(updated.weight, 75.5);
        assert_eq!(updated.height, 1.8);
        assert_eq!(updated.sex, "M");
        assert_eq!(updated.category_name, "Scale");
    }

    #[tokio::test]
    async fn test_empty_update_returns_current_record() {
        let db = migrated_db().await;
        seed_references(&db).await;
        let created = create_athlete(&db, &request("Joao", "111")).await.unwrap();

        let updated = update_athlete(&db, created.id, &UpdateAthleteRequest::default())
            .await
            .unwrap();
        assert_eq!(updated.age, 25);
    }

    #[tokio::test]
    async fn test_update_missing_athlete() {
        let db = migrated_db().await;

        let update = UpdateAthleteRequest {
            age: Patch::Present(31),
            ..Default::default()
        };
        let err = update_athlete(&db, Uuid::new_v4(), &update).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
    }

    #[tokio::test]
    async fn test_delete() {
        let db = migrated_db().await;
        seed_references(&db).await;
        let created = create_athlete(&db, &request("Joao", "111")).await.unwrap();

        let err = delete_athlete(&db, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound));

        delete_athlete(&db, created.id).await.unwrap();
        let err = get_athlete(&db, created.id).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
    }
}
