use storage::{
    Database, dto::category::CreateCategoryRequest, error::Result, models::Category,
    repository::category::CategoryRepository,
};
use uuid::Uuid;

pub async fn create_category(db: &Database, request: &CreateCategoryRequest) -> Result<Category> {
    let mut tx = db.begin().await?;
    let category = CategoryRepository::new(&mut *tx).create(request).await?;
    tx.commit().await?;

    tracing::info!(category_id = %category.id, name = %category.name, "Category created");
    Ok(category)
}

pub async fn list_categories(db: &Database) -> Result<Vec<Category>> {
    let mut tx = db.begin().await?;
    let categories = CategoryRepository::new(&mut *tx).list().await?;
    tx.commit().await?;
    Ok(categories)
}

pub async fn get_category(db: &Database, id: Uuid) -> Result<Category> {
    let mut tx = db.begin().await?;
    let category = CategoryRepository::new(&mut *tx).find_by_id(id).await?;
    tx.commit().await?;
    Ok(category)
}

#[cfg(test)]
mod tests {
    use storage::error::StorageError;

    use super::*;
    use crate::test_support::migrated_db;

    fn request(name: &str) -> CreateCategoryRequest {
        CreateCategoryRequest {
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let db = migrated_db().await;

        let created = create_category(&db, &request("Scale")).await.unwrap();
        let fetched = get_category(&db, created.id).await.unwrap();

        assert_eq!(fetched.name, "Scale");
    }

    #[tokio::test]
    async fn test_duplicate_name_conflicts() {
        let db = migrated_db().await;

        create_category(&db, &request("Scale")).await.unwrap();
        let err = create_category(&db, &request("Scale")).await.unwrap_err();

        assert!(matches!(err, StorageError::ConstraintViolation(_)));
        assert_eq!(list_categories(&db).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_is_sorted_by_name() {
        let db = migrated_db().await;

        create_category(&db, &request("Scale")).await.unwrap();
        create_category(&db, &request("RX")).await.unwrap();

        let names: Vec<_> = list_categories(&db)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, ["RX", "Scale"]);
    }

    #[tokio::test]
    async fn test_get_missing() {
        let db = migrated_db().await;

        let err = get_category(&db, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
    }
}
