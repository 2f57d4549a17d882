use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Row of the `athletes` table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Athlete {
    pub id: Uuid,
    pub name: String,
    pub national_id: String,
    pub age: i32,
    pub weight: f64,
    pub height: f64,
    pub sex: String,
    pub created_at: NaiveDateTime,
    pub category_id: Uuid,
    pub training_center_id: Uuid,
}

/// Athlete joined with the names of its category and training center
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AthleteDetail {
    pub id: Uuid,
    pub name: String,
    pub national_id: String,
    pub age: i32,
    pub weight: f64,
    pub height: f64,
    pub sex: String,
    pub created_at: NaiveDateTime,
    pub category_name: String,
    pub training_center_name: String,
}

impl AthleteDetail {
    pub fn from_parts(athlete: Athlete, category_name: String, training_center_name: String) -> Self {
        Self {
            id: athlete.id,
            name: athlete.name,
            national_id: athlete.national_id,
            age: athlete.age,
            weight: athlete.weight,
            height: athlete.height,
            sex: athlete.sex,
            created_at: athlete.created_at,
            category_name,
            training_center_name,
        }
    }
}
