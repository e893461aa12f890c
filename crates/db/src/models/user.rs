//! User accounts. Deactivation is a soft delete so admins can restore
//! users from the trash.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool, Type};
use strum::{Display, EnumString};
use ts_rs::TS;
use uuid::Uuid;

#[derive(
    Debug, Clone, Type, Serialize, Deserialize, PartialEq, TS, EnumString, Display, Default,
)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum UserRole {
    Admin,
    #[default]
    User,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub role: UserRole,
    pub is_active: bool,
    #[ts(type = "Date")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "Date")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, TS)]
pub struct CreateUser {
    pub email: String,
    pub full_name: Option<String>,
    pub role: Option<UserRole>,
}

#[derive(Debug, Deserialize, TS)]
pub struct UpdateUser {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub role: Option<UserRole>,
}

const USER_COLUMNS: &str = "id, email, full_name, role, is_active, created_at, updated_at";

impl User {
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE is_active = 1 ORDER BY email ASC"
        ))
        .fetch_all(pool)
        .await
    }

    /// Deactivated users, newest deactivation first, for the trash listing.
    pub async fn find_deactivated(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE is_active = 0 ORDER BY updated_at DESC"
        ))
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn create(
        pool: &SqlitePool,
        data: &CreateUser,
        id: Uuid,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            r#"INSERT INTO users (id, email, full_name, role)
               VALUES ($1, $2, $3, $4)
               RETURNING {USER_COLUMNS}"#
        ))
        .bind(id)
        .bind(&data.email)
        .bind(&data.full_name)
        .bind(data.role.clone().unwrap_or_default())
        .fetch_one(pool)
        .await
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &UpdateUser,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            r#"UPDATE users
               SET email = COALESCE($2, email),
                   full_name = COALESCE($3, full_name),
                   role = COALESCE($4, role),
                   updated_at = datetime('now', 'subsec')
               WHERE id = $1
               RETURNING {USER_COLUMNS}"#
        ))
        .bind(id)
        .bind(&data.email)
        .bind(&data.full_name)
        .bind(&data.role)
        .fetch_one(pool)
        .await
    }

    pub async fn deactivate(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET is_active = 0, updated_at = datetime('now', 'subsec') WHERE id = $1 AND is_active = 1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn reactivate(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET is_active = 1, updated_at = datetime('now', 'subsec') WHERE id = $1 AND is_active = 0",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_test_pool;

    fn user_fixture(email: &str) -> CreateUser {
        CreateUser {
            email: email.to_string(),
            full_name: Some("Jan de Vries".to_string()),
            role: None,
        }
    }

    #[tokio::test]
    async fn test_email_unique() {
        let (pool, _temp_dir) = create_test_pool().await;

        User::create(&pool, &user_fixture("jan@example.com"), Uuid::new_v4())
            .await
            .expect("Failed to create user");
        let dup = User::create(&pool, &user_fixture("jan@example.com"), Uuid::new_v4()).await;
        assert!(dup.is_err());
    }

    #[tokio::test]
    async fn test_deactivate_and_reactivate() {
        let (pool, _temp_dir) = create_test_pool().await;

        let user = User::create(&pool, &user_fixture("jan@example.com"), Uuid::new_v4())
            .await
            .expect("Failed to create user");
        assert_eq!(user.role, UserRole::User);

        assert_eq!(User::deactivate(&pool, user.id).await.expect("Deactivate failed"), 1);
        assert!(User::find_all(&pool).await.expect("Query failed").is_empty());
        assert_eq!(
            User::find_deactivated(&pool).await.expect("Query failed").len(),
            1
        );

        assert_eq!(User::reactivate(&pool, user.id).await.expect("Reactivate failed"), 1);
        assert_eq!(User::find_all(&pool).await.expect("Query failed").len(), 1);
    }
}
