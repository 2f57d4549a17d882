use jsonwebtoken::Algorithm;
use storage::{
    Database,
    dto::{category::CreateCategoryRequest, training_center::CreateTrainingCenterRequest},
    repository::{category::CategoryRepository, training_center::TrainingCenterRepository},
};

use crate::features::auth::security::TokenService;
use crate::state::AppState;

/// Lowest cost bcrypt accepts
pub const TEST_BCRYPT_COST: u32 = 4;

pub async fn migrated_db() -> Database {
    let db = Database::in_memory().await.unwrap();
    db.run_migrations().await.unwrap();
    db
}

pub async fn test_state() -> AppState {
    AppState {
        db: migrated_db().await,
        tokens: TokenService::new("test-secret", Algorithm::HS256, 30),
        bcrypt_cost: TEST_BCRYPT_COST,
    }
}

/// Insert the category "Scale" and the training center "CT King"
pub async fn seed_references(db: &Database) {
    let mut conn = db.pool().acquire().await.unwrap();

    CategoryRepository::new(&mut conn)
        .create(&CreateCategoryRequest {
            name: "Scale".to_string(),
        })
        .await
        .unwrap();

    TrainingCenterRepository::new(&mut conn)
        .create(&CreateTrainingCenterRequest {
            name: "CT King".to_string(),
            address: None,
            owner: None,
        })
        .await
        .unwrap();
}
