use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::User;

/// Request payload for registering a user
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    #[schema(example = "athlete@example.com")]
    #[validate(email(message = "Invalid email address"))]
    #[validate(length(max = 50, message = "Email must be at most 50 characters"))]
    pub email: String,

    #[validate(length(min = 6, max = 60, message = "Password must be between 6 and 60 characters"))]
    pub password: String,
}

/// OAuth2 password-flow form: the email travels in `username`
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct TokenRequest {
    #[schema(example = "athlete@example.com")]
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    #[schema(example = "bearer")]
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

/// User as exposed over the API, without the password hash
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_validation() {
        let request = RegisterRequest {
            email: "not-an-email".to_string(),
            password: "123".to_string(),
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
        assert!(errors.field_errors().contains_key("password"));

        let request = RegisterRequest {
            email: "athlete@example.com".to_string(),
            password: "secret123".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_user_response_hides_hash() {
        let user = User {
            id: 7,
            email: "athlete@example.com".to_string(),
            hashed_password: "$2b$04$hash".to_string(),
        };
        let json = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert_eq!(json, serde_json::json!({"id": 7, "email": "athlete@example.com"}));
    }
}
