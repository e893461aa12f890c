//! Garden work sessions and volunteer registrations.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use thiserror::Error;
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error("Session is full")]
    SessionFull,
    #[error("User is already registered for this session")]
    AlreadyRegistered,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct GardenSession {
    pub id: Uuid,
    pub garden_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub session_date: NaiveDate,
    pub start_time: Option<String>,
    pub location: Option<String>,
    pub max_volunteers: i64,
    #[ts(type = "Date")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "Date")]
    pub updated_at: DateTime<Utc>,
}

/// Session with its current registration count, for list views.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct SessionWithRegistrations {
    #[sqlx(flatten)]
    #[serde(flatten)]
    #[ts(flatten)]
    pub session: GardenSession,
    pub registered_count: i64,
}

#[derive(Debug, Deserialize, TS)]
pub struct CreateSession {
    pub garden_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub session_date: NaiveDate,
    pub start_time: Option<String>,
    pub location: Option<String>,
    pub max_volunteers: Option<i64>,
}

#[derive(Debug, Deserialize, TS)]
pub struct UpdateSession {
    pub title: Option<String>,
    pub description: Option<String>,
    pub session_date: Option<NaiveDate>,
    pub start_time: Option<String>,
    pub location: Option<String>,
    pub max_volunteers: Option<i64>,
}

const SESSION_COLUMNS: &str = r#"id, garden_id, title, description, session_date, start_time,
location, max_volunteers, created_at, updated_at"#;

impl GardenSession {
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<SessionWithRegistrations>, sqlx::Error> {
        sqlx::query_as::<_, SessionWithRegistrations>(
            r#"SELECT s.id, s.garden_id, s.title, s.description, s.session_date, s.start_time,
                      s.location, s.max_volunteers, s.created_at, s.updated_at,
                      COUNT(r.id) AS registered_count
               FROM sessions s
               LEFT JOIN session_registrations r ON r.session_id = s.id
               GROUP BY s.id
               ORDER BY s.session_date ASC"#,
        )
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, GardenSession>(&format!(
            "SELECT {SESSION_COLUMNS} FROM sessions WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn create(
        pool: &SqlitePool,
        data: &CreateSession,
        id: Uuid,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, GardenSession>(&format!(
            r#"INSERT INTO sessions (id, garden_id, title, description, session_date,
                                     start_time, location, max_volunteers)
               VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, 10))
               RETURNING {SESSION_COLUMNS}"#
        ))
        .bind(id)
        .bind(data.garden_id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.session_date)
        .bind(&data.start_time)
        .bind(&data.location)
        .bind(data.max_volunteers)
        .fetch_one(pool)
        .await
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &UpdateSession,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, GardenSession>(&format!(
            r#"UPDATE sessions
               SET title = COALESCE($2, title),
                   description = COALESCE($3, description),
                   session_date = COALESCE($4, session_date),
                   start_time = COALESCE($5, start_time),
                   location = COALESCE($6, location),
                   max_volunteers = COALESCE($7, max_volunteers),
                   updated_at = datetime('now', 'subsec')
               WHERE id = $1
               RETURNING {SESSION_COLUMNS}"#
        ))
        .bind(id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.session_date)
        .bind(&data.start_time)
        .bind(&data.location)
        .bind(data.max_volunteers)
        .fetch_one(pool)
        .await
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn registered_user_ids(
        pool: &SqlitePool,
        session_id: Uuid,
    ) -> Result<Vec<Uuid>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT user_id FROM session_registrations WHERE session_id = $1 ORDER BY created_at ASC",
        )
        .bind(session_id)
        .fetch_all(pool)
        .await
    }

    /// Register a volunteer, enforcing the capacity limit inside a
    /// transaction so two concurrent sign-ups cannot both take the last
    /// spot.
    pub async fn register_volunteer(
        pool: &SqlitePool,
        session_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), SessionError> {
        let mut tx = pool.begin().await?;

        let already: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM session_registrations WHERE session_id = $1 AND user_id = $2",
        )
        .bind(session_id)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;
        if already > 0 {
            return Err(SessionError::AlreadyRegistered);
        }

        let (registered, capacity): (i64, i64) = sqlx::query_as(
            r#"SELECT COUNT(r.id), s.max_volunteers
               FROM sessions s
               LEFT JOIN session_registrations r ON r.session_id = s.id
               WHERE s.id = $1"#,
        )
        .bind(session_id)
        .fetch_one(&mut *tx)
        .await?;
        if registered >= capacity {
            return Err(SessionError::SessionFull);
        }

        sqlx::query(
            "INSERT INTO session_registrations (id, session_id, user_id) VALUES ($1, $2, $3)",
        )
        .bind(Uuid::new_v4())
        .bind(session_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    pub async fn unregister_volunteer(
        pool: &SqlitePool,
        session_id: Uuid,
        user_id: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM session_registrations WHERE session_id = $1 AND user_id = $2",
        )
        .bind(session_id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::plant_bed::tests::setup_garden;
    use crate::models::user::{CreateUser, User};
    use crate::test_utils::create_test_pool;

    async fn setup_session(pool: &SqlitePool, max_volunteers: i64) -> Uuid {
        let garden_id = setup_garden(pool).await;
        let data = CreateSession {
            garden_id,
            title: "Zaterdagochtend werksessie".to_string(),
            description: None,
            session_date: NaiveDate::from_ymd_opt(2025, 7, 5).unwrap(),
            start_time: Some("09:30".to_string()),
            location: None,
            max_volunteers: Some(max_volunteers),
        };
        GardenSession::create(pool, &data, Uuid::new_v4())
            .await
            .expect("Failed to create session")
            .id
    }

    async fn setup_user(pool: &SqlitePool, email: &str) -> Uuid {
        let data = CreateUser {
            email: email.to_string(),
            full_name: None,
            role: None,
        };
        User::create(pool, &data, Uuid::new_v4())
            .await
            .expect("Failed to create user")
            .id
    }

    #[tokio::test]
    async fn test_register_until_full() {
        let (pool, _temp_dir) = create_test_pool().await;
        let session_id = setup_session(&pool, 2).await;

        let user_a = setup_user(&pool, "a@example.com").await;
        let user_b = setup_user(&pool, "b@example.com").await;
        let user_c = setup_user(&pool, "c@example.com").await;

        GardenSession::register_volunteer(&pool, session_id, user_a)
            .await
            .expect("Register failed");
        GardenSession::register_volunteer(&pool, session_id, user_b)
            .await
            .expect("Register failed");

        let result = GardenSession::register_volunteer(&pool, session_id, user_c).await;
        assert!(matches!(result, Err(SessionError::SessionFull)));

        let registered = GardenSession::registered_user_ids(&pool, session_id)
            .await
            .expect("Query failed");
        assert_eq!(registered, vec![user_a, user_b]);
    }

    #[tokio::test]
    async fn test_double_registration_rejected() {
        let (pool, _temp_dir) = create_test_pool().await;
        let session_id = setup_session(&pool, 5).await;
        let user = setup_user(&pool, "a@example.com").await;

        GardenSession::register_volunteer(&pool, session_id, user)
            .await
            .expect("Register failed");
        let result = GardenSession::register_volunteer(&pool, session_id, user).await;
        assert!(matches!(result, Err(SessionError::AlreadyRegistered)));
    }

    #[tokio::test]
    async fn test_unregister_frees_spot() {
        let (pool, _temp_dir) = create_test_pool().await;
        let session_id = setup_session(&pool, 1).await;
        let user_a = setup_user(&pool, "a@example.com").await;
        let user_b = setup_user(&pool, "b@example.com").await;

        GardenSession::register_volunteer(&pool, session_id, user_a)
            .await
            .expect("Register failed");
        assert_eq!(
            GardenSession::unregister_volunteer(&pool, session_id, user_a)
                .await
                .expect("Unregister failed"),
            1
        );
        GardenSession::register_volunteer(&pool, session_id, user_b)
            .await
            .expect("Register failed after spot freed");

        let sessions = GardenSession::find_all(&pool).await.expect("Query failed");
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].registered_count, 1);
    }
}
