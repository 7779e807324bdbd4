//! User persistence. Each call is one statement or one transaction.
//! Transactions start with `BEGIN IMMEDIATE` so a read never has to upgrade to a write lock.

use crate::error::AppError;
use crate::model::{User, UserInput};
use crate::service::RequestValidator;
use sqlx::SqlitePool;

pub struct UserService;

impl UserService {
    /// Insert one user; `id` is assigned by the database. Duplicate phone/email is a conflict.
    pub async fn create(pool: &SqlitePool, input: &UserInput) -> Result<User, AppError> {
        RequestValidator::validate_user(input)?;
        let sql = format!(
            "INSERT INTO users (first_name, last_name, phone_num, email) VALUES (?, ?, ?, ?) RETURNING {}",
            User::COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        let row = sqlx::query(&sql)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(input.phone_num)
            .bind(&input.email)
            .fetch_one(pool)
            .await?;
        let user = User::from_row(&row)?;
        tracing::info!(user_id = user.id, "created user");
        Ok(user)
    }

    /// All users in id order.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<User>, AppError> {
        let sql = format!("SELECT {} FROM users ORDER BY id", User::COLUMNS);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query(&sql).fetch_all(pool).await?;
        rows.iter()
            .map(|r| User::from_row(r).map_err(AppError::from))
            .collect()
    }

    pub async fn read(pool: &SqlitePool, id: i64) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {} FROM users WHERE id = ?", User::COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query(&sql).bind(id).fetch_optional(pool).await?;
        Ok(row.map(|r| User::from_row(&r)).transpose()?)
    }

    /// Overwrite every mutable field. Returns `None` if the user does not exist.
    pub async fn update(pool: &SqlitePool, id: i64, input: &UserInput) -> Result<Option<User>, AppError> {
        RequestValidator::validate_user(input)?;
        let sql = format!(
            "UPDATE users SET first_name = ?, last_name = ?, phone_num = ?, email = ? WHERE id = ? RETURNING {}",
            User::COLUMNS
        );
        tracing::debug!(sql = %sql, id, "query");
        let mut tx = pool.begin_with("BEGIN IMMEDIATE").await?;
        let row = sqlx::query(&sql)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(input.phone_num)
            .bind(&input.email)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        let user = User::from_row(&row)?;
        tx.commit().await?;
        tracing::info!(user_id = id, "updated user");
        Ok(Some(user))
    }

    /// Delete one user and return the removed record. A user still renting bikes cannot be deleted.
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<Option<User>, AppError> {
        let mut tx = pool.begin_with("BEGIN IMMEDIATE").await?;
        let (rented,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM bikes WHERE user_id = ?")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        if rented > 0 {
            return Err(AppError::Conflict(format!(
                "user {} still has {} rented bike(s)",
                id, rented
            )));
        }
        let sql = format!("DELETE FROM users WHERE id = ? RETURNING {}", User::COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query(&sql).bind(id).fetch_optional(&mut *tx).await?;
        let Some(row) = row else {
            return Ok(None);
        };
        let user = User::from_row(&row)?;
        tx.commit().await?;
        tracing::info!(user_id = id, "deleted user");
        Ok(Some(user))
    }

    pub async fn exists(conn: &mut sqlx::SqliteConnection, id: i64) -> Result<bool, AppError> {
        let found: Option<(i64,)> = sqlx::query_as("SELECT id FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(conn)
            .await?;
        Ok(found.is_some())
    }
}
