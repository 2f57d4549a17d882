use storage::{
    Database,
    dto::auth::{RegisterRequest, TokenResponse},
    models::User,
    repository::user::UserRepository,
};

use super::security::{TokenService, hash_password, verify_password};
use crate::error::{WebError, WebResult};

/// Register a new user with a bcrypt-hashed password
pub async fn register_user(
    db: &Database,
    bcrypt_cost: u32,
    request: &RegisterRequest,
) -> WebResult<User> {
    let hashed_password = hash_password(request.password.clone(), bcrypt_cost).await?;

    let mut tx = db.begin().await?;
    let user = UserRepository::new(&mut *tx)
        .create(&request.email, &hashed_password)
        .await?;
    tx.commit().await?;

    tracing::info!(user_id = user.id, "User registered");
    Ok(user)
}

/// Check credentials and mint an access token whose subject is the user's email
pub async fn issue_token(
    db: &Database,
    tokens: &TokenService,
    email: &str,
    password: &str,
) -> WebResult<TokenResponse> {
    let user = {
        let mut tx = db.begin().await?;
        let user = UserRepository::new(&mut *tx).find_by_email(email).await?;
        tx.commit().await?;
        user
    };

    let Some(user) = user else {
        tracing::warn!("Token requested for unknown email");
        return Err(WebError::Unauthorized);
    };

    if !verify_password(password.to_string(), user.hashed_password.clone()).await? {
        tracing::warn!(user_id = user.id, "Token requested with a wrong password");
        return Err(WebError::Unauthorized);
    }

    let access_token = tokens
        .issue(&user.email)
        .map_err(|e| WebError::InternalServerError(format!("Failed to sign token: {e}")))?;

    Ok(TokenResponse::bearer(access_token))
}

/// Resolve the user a bearer token was issued to
pub async fn resolve_current_user(
    db: &Database,
    tokens: &TokenService,
    token: &str,
) -> WebResult<User> {
    let claims = tokens.decode(token).map_err(|e| {
        tracing::warn!("Rejected bearer token: {}", e);
        WebError::Unauthorized
    })?;

    if claims.sub.is_empty() {
        return Err(WebError::Unauthorized);
    }

    let mut tx = db.begin().await?;
    let user = UserRepository::new(&mut *tx)
        .find_by_email(&claims.sub)
        .await?
        .ok_or(WebError::Unauthorized)?;
    tx.commit().await?;

    Ok(user)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use jsonwebtoken::Algorithm;
    use storage::error::StorageError;

    use super::*;
    use crate::features::auth::security::Claims;
    use crate::test_support::{TEST_BCRYPT_COST, migrated_db};

    fn tokens() -> TokenService {
        TokenService::new("test-secret", Algorithm::HS256, 30)
    }

    fn register_request(email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_twice_conflicts() {
        let db = migrated_db().await;
        let request = register_request("athlete@example.com", "secret123");

        let user = register_user(&db, TEST_BCRYPT_COST, &request).await.unwrap();
        assert_eq!(user.email, "athlete@example.com");
        assert_ne!(user.hashed_password, "secret123");

        let err = register_user(&db, TEST_BCRYPT_COST, &request)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            WebError::Storage(StorageError::ConstraintViolation(_))
        ));
    }

    #[tokio::test]
    async fn test_token_subject_resolves_to_user() {
        let db = migrated_db().await;
        let tokens = tokens();
        register_user(
            &db,
            TEST_BCRYPT_COST,
            &register_request("athlete@example.com", "secret123"),
        )
        .await
        .unwrap();

        let response = issue_token(&db, &tokens, "athlete@example.com", "secret123")
            .await
            .unwrap();
        assert_eq!(response.token_type, "bearer");

        let user = resolve_current_user(&db, &tokens, &response.access_token)
            .await
            .unwrap();
        assert_eq!(user.email, "athlete@example.com");
    }

    #[tokio::test]
    async fn test_wrong_password_is_unauthorized() {
        let db = migrated_db().await;
        let tokens = tokens();
        register_user(
            &db,
            TEST_BCRYPT_COST,
            &register_request("athlete@example.com", "secret123"),
        )
        .await
        .unwrap();

        let err = issue_token(&db, &tokens, "athlete@example.com", "wrong-password")
            .await
            .unwrap_err();
        assert!(matches!(err, WebError::Unauthorized));

        let err = issue_token(&db, &tokens, "nobody@example.com", "secret123")
            .await
            .unwrap_err();
        assert!(matches!(err, WebError::Unauthorized));
    }

    #[tokio::test]
    async fn test_expired_token_is_unauthorized() {
        let db = migrated_db().await;
        let tokens = tokens();
        register_user(
            &db,
            TEST_BCRYPT_COST,
            &register_request("athlete@example.com", "secret123"),
        )
        .await
        .unwrap();

        let now = Utc::now().timestamp();
        let expired = tokens
            .sign(&Claims {
                sub: "athlete@example.com".to_string(),
                iat: now - 3600,
                exp: now - 60,
            })
            .unwrap();

        let err = resolve_current_user(&db, &tokens, &expired)
            .await
            .unwrap_err();
        assert!(matches!(err, WebError::Unauthorized));
    }

    #[tokio::test]
    async fn test_token_for_unknown_subject_is_unauthorized() {
        let db = migrated_db().await;
        let tokens = tokens();
        let token = tokens.issue("ghost@example.com").unwrap();

        let err = resolve_current_user(&db, &tokens, &token).await.unwrap_err();
        assert!(matches!(err, WebError::Unauthorized));
    }
}
