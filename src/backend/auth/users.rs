/**
 * User Model and Database Operations
 *
 * This module handles user data and database operations.
 */

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::shared::types::{Role, UserResponse};

const USER_COLUMNS: &str =
    "id, email, password_hash, role, name, student_id, is_active, created_at, updated_at";

/// User struct representing a user in the database
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// Normalized (trimmed, lowercase) email, unique
    pub email: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    pub role: Role,
    pub name: String,
    pub student_id: String,
    /// Inactive accounts cannot log in
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Client-facing view without the password hash
    pub fn to_response(&self) -> UserResponse {
        UserResponse {
            id: self.id.to_string(),
            email: self.email.clone(),
            role: self.role,
            name: self.name.clone(),
            student_id: self.student_id.clone(),
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    password_hash: String,
    role: String,
    name: String,
    student_id: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = BackendError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = row
            .role
            .parse::<Role>()
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

        Ok(User {
            id: row.id,
            email: row.email,
            password_hash: row.password_hash,
            role,
            name: row.name,
            student_id: row.student_id,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Fields needed to insert a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub name: String,
    pub student_id: String,
}

/// Create a new user
///
/// Fails with a unique-constraint database error when the email is taken;
/// see [`is_unique_violation`].
pub async fn create_user(pool: &SqlitePool, new_user: NewUser) -> Result<User, BackendError> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let row = sqlx::query_as::<_, UserRow>(&format!(
        r#"
        INSERT INTO users (id, email, password_hash, role, name, student_id, is_active, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, 1, ?, ?)
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(&new_user.email)
    .bind(&new_user.password_hash)
    .bind(new_user.role.as_str())
    .bind(&new_user.name)
    .bind(&new_user.student_id)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    row.try_into()
}

/// Get user by email
pub async fn get_user_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, BackendError> {
    let row = sqlx::query_as::<_, UserRow>(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?"))
        .bind(email)
        .fetch_optional(pool)
        .await?;

    row.map(User::try_from).transpose()
}

/// Get user by ID
pub async fn get_user_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<User>, BackendError> {
    let row = sqlx::query_as::<_, UserRow>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.map(User::try_from).transpose()
}

/// Check whether an email is already registered
pub async fn email_exists(pool: &SqlitePool, email: &str) -> Result<bool, BackendError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = ?")
        .bind(email)
        .fetch_one(pool)
        .await?;

    Ok(count > 0)
}

/// Update the editable profile fields; `None` leaves a field unchanged
///
/// Returns `None` if the user does not exist.
pub async fn update_profile(
    pool: &SqlitePool,
    id: Uuid,
    name: Option<&str>,
    student_id: Option<&str>,
) -> Result<Option<User>, BackendError> {
    let row = sqlx::query_as::<_, UserRow>(&format!(
        r#"
        UPDATE users
        SET name = COALESCE(?, name), student_id = COALESCE(?, student_id), updated_at = ?
        WHERE id = ?
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(name)
    .bind(student_id)
    .bind(Utc::now())
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.map(User::try_from).transpose()
}

/// Enable or disable an account
pub async fn set_active(pool: &SqlitePool, id: Uuid, is_active: bool) -> Result<bool, BackendError> {
    let result = sqlx::query("UPDATE users SET is_active = ?, updated_at = ? WHERE id = ?")
        .bind(is_active)
        .bind(Utc::now())
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// True if the error is a unique-constraint violation
pub fn is_unique_violation(err: &BackendError) -> bool {
    match err {
        BackendError::DatabaseError(sqlx::Error::Database(db_err)) => db_err.is_unique_violation(),
        _ => false,
    }
}
