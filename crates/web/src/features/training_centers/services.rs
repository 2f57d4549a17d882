use storage::{
    Database, dto::training_center::CreateTrainingCenterRequest, error::Result,
    models::TrainingCenter, repository::training_center::TrainingCenterRepository,
};
use uuid::Uuid;

pub async fn create_training_center(
    db: &Database,
    request: &CreateTrainingCenterRequest,
) -> Result<TrainingCenter> {
    let mut tx = db.begin().await?;
    let training_center = TrainingCenterRepository::new(&mut *tx)
        .create(request)
        .await?;
    tx.commit().await?;

    tracing::info!(
        training_center_id = %training_center.id,
        name = %training_center.name,
        "Training center created"
    );
    Ok(training_center)
}

pub async fn list_training_centers(db: &Database) -> Result<Vec<TrainingCenter>> {
    let mut tx = db.begin().await?;
    let training_centers = TrainingCenterRepository::new(&mut *tx).list().await?;
    tx.commit().await?;
    Ok(training_centers)
}

pub async fn get_training_center(db: &Database, id: Uuid) -> Result<TrainingCenter> {
    let mut tx = db.begin().await?;
    let training_center = TrainingCenterRepository::new(&mut *tx)
        .find_by_id(id)
        .await?;
    tx.commit().await?;
    Ok(training_center)
}
