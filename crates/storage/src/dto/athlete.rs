use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use super::common::{PaginationParams, Patch};
use crate::models::AthleteDetail;

/// Category referenced by name inside an athlete payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CategoryRef {
    #[schema(example = "Scale")]
    #[validate(length(min = 1, max = 10, message = "Category name must be between 1 and 10 characters"))]
    pub name: String,
}

/// Training center referenced by name inside an athlete payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct TrainingCenterRef {
    #[schema(example = "CT King")]
    #[validate(length(
        min = 1,
        max = 20,
        message = "Training center name must be between 1 and 20 characters"
    ))]
    pub name: String,
}

/// Request payload for creating a new athlete
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateAthleteRequest {
    #[schema(example = "Joao")]
    #[validate(length(min = 1, max = 50, message = "Name must be between 1 and 50 characters"))]
    pub name: String,

    #[schema(example = "12345678900")]
    #[validate(length(
        min = 1,
        max = 11,
        message = "National id must be between 1 and 11 characters"
    ))]
    pub national_id: String,

    #[schema(example = 25)]
    #[validate(range(min = 0, max = 150, message = "Age must be between 0 and 150"))]
    pub age: i32,

    #[schema(example = 75.5)]
    #[validate(range(exclusive_min = 0.0, message = "Weight must be positive"))]
    pub weight: f64,

    #[schema(example = 1.80)]
    #[validate(range(exclusive_min = 0.0, message = "Height must be positive"))]
    pub height: f64,

    #[schema(example = "M")]
    #[validate(length(equal = 1, message = "Sex must be a single character"))]
    pub sex: String,

    #[validate(nested)]
    pub category: CategoryRef,

    #[validate(nested)]
    pub training_center: TrainingCenterRef,
}

/// Request payload for updating an athlete. Only the fields sent are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateAthleteRequest {
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    #[schema(value_type = Option<String>, example = "Joao")]
    pub name: Patch<String>,

    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    #[schema(value_type = Option<i32>, example = 26)]
    pub age: Patch<i32>,

    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    #[schema(value_type = Option<f64>)]
    pub weight: Patch<f64>,

    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    #[schema(value_type = Option<f64>)]
    pub height: Patch<f64>,

    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    #[schema(value_type = Option<String>)]
    pub sex: Patch<String>,
}

impl UpdateAthleteRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_absent()
            && self.age.is_absent()
            && self.weight.is_absent()
            && self.height.is_absent()
            && self.sex.is_absent()
    }
}

// Same rules as `CreateAthleteRequest`, checked only for the fields that were sent.
impl Validate for UpdateAthleteRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Some(name) = self.name.value() {
            let len = name.chars().count();
            if !(1..=50).contains(&len) {
                errors.add(
                    "name",
                    invalid("length", "Name must be between 1 and 50 characters"),
                );
            }
        }
        if let Some(age) = self.age.value()
            && !(0..=150).contains(age)
        {
            errors.add("age", invalid("range", "Age must be between 0 and 150"));
        }
        if let Some(weight) = self.weight.value()
            && *weight <= 0.0
        {
            errors.add("weight", invalid("range", "Weight must be positive"));
        }
        if let Some(height) = self.height.value()
            && *height <= 0.0
        {
            errors.add("height", invalid("range", "Height must be positive"));
        }
        if let Some(sex) = self.sex.value()
            && sex.chars().count() != 1
        {
            errors.add("sex", invalid("length", "Sex must be a single character"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

/// Exact-match filters for athlete queries
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AthleteFilter {
    pub name: Option<String>,
    pub national_id: Option<String>,
}

/// Query string of the athlete list endpoint
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AthleteListParams {
    /// Exact athlete name
    pub name: Option<String>,
    /// Exact national id
    pub national_id: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl AthleteListParams {
    pub fn filter(&self) -> AthleteFilter {
        AthleteFilter {
            name: self.name.clone(),
            national_id: self.national_id.clone(),
        }
    }

    pub fn pagination(&self) -> PaginationParams {
        let defaults = PaginationParams::default();
        PaginationParams {
            page: self.page.unwrap_or(defaults.page),
            page_size: self.page_size.unwrap_or(defaults.page_size),
        }
    }
}

/// Full athlete record
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AthleteResponse {
    pub id: Uuid,
    pub name: String,
    pub national_id: String,
    pub age: i32,
    pub weight: f64,
    pub height: f64,
    pub sex: String,
    pub created_at: NaiveDateTime,
    pub category: CategoryRef,
    pub training_center: TrainingCenterRef,
}

/// Simplified athlete entry used by the list endpoint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AthleteSummary {
    pub name: String,
    pub category: String,
    pub training_center: String,
}

impl From<AthleteDetail> for AthleteResponse {
    fn from(athlete: AthleteDetail) -> Self {
        Self {
            id: athlete.id,
            name: athlete.name,
            national_id: athlete.national_id,
            age: athlete.age,
            weight: athlete.weight,
            height: athlete.height,
            sex: athlete.sex,
            created_at: athlete.created_at,
            category: CategoryRef {
                name: athlete.category_name,
            },
            training_center: TrainingCenterRef {
                name: athlete.training_center_name,
            },
        }
    }
}

impl From<AthleteDetail> for AthleteSummary {
    fn from(athlete: AthleteDetail) -> Self {
        Self {
            name: athlete.name,
            category: athlete.category_name,
            training_center: athlete.training_center_name,
        }
    }
}
