use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request payload for creating a training center
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateTrainingCenterRequest {
    #[schema(example = "CT King")]
    #[validate(length(min = 1, max = 20, message = "Name must be between 1 and 20 characters"))]
    pub name: String,

    #[schema(example = "Rua X, Q02")]
    #[validate(length(max = 60))]
    pub address: Option<String>,

    #[schema(example = "Marcos")]
    #[validate(length(max = 30))]
    pub owner: Option<String>,
}
