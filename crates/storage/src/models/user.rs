use sqlx::FromRow;

/// Row of the `users` table. Never serialized: responses go through `UserResponse`.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub hashed_password: String,
}
