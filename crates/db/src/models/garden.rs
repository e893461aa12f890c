//! Garden model: the top-level entity everything else hangs off.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct Garden {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub location: String,
    pub total_area: Option<String>,
    pub length: Option<String>,
    pub width: Option<String>,
    pub garden_type: Option<String>,
    pub established_date: Option<String>,
    pub notes: Option<String>,
    pub is_active: bool,
    #[ts(type = "Date")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "Date")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, TS)]
pub struct CreateGarden {
    pub name: String,
    pub location: String,
    pub description: Option<String>,
    pub total_area: Option<String>,
    pub length: Option<String>,
    pub width: Option<String>,
    pub garden_type: Option<String>,
    pub established_date: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
pub struct UpdateGarden {
    pub name: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub total_area: Option<String>,
    pub length: Option<String>,
    pub width: Option<String>,
    pub garden_type: Option<String>,
    pub established_date: Option<String>,
    pub notes: Option<String>,
}

const GARDEN_COLUMNS: &str = r#"id, name, description, location, total_area, length, width,
garden_type, established_date, notes, is_active, created_at, updated_at"#;

impl Garden {
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Garden>(&format!(
            "SELECT {GARDEN_COLUMNS} FROM gardens WHERE is_active = 1 ORDER BY created_at DESC"
        ))
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Garden>(&format!(
            "SELECT {GARDEN_COLUMNS} FROM gardens WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn create(
        pool: &SqlitePool,
        data: &CreateGarden,
        id: Uuid,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Garden>(&format!(
            r#"INSERT INTO gardens (id, name, description, location, total_area, length, width,
                                    garden_type, established_date, notes)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
               RETURNING {GARDEN_COLUMNS}"#
        ))
        .bind(id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(&data.location)
        .bind(&data.total_area)
        .bind(&data.length)
        .bind(&data.width)
        .bind(&data.garden_type)
        .bind(&data.established_date)
        .bind(&data.notes)
        .fetch_one(pool)
        .await
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &UpdateGarden,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Garden>(&format!(
            r#"UPDATE gardens
               SET name = COALESCE($2, name),
                   location = COALESCE($3, location),
                   description = COALESCE($4, description),
                   total_area = COALESCE($5, total_area),
                   length = COALESCE($6, length),
                   width = COALESCE($7, width),
                   garden_type = COALESCE($8, garden_type),
                   established_date = COALESCE($9, established_date),
                   notes = COALESCE($10, notes),
                   updated_at = datetime('now', 'subsec')
               WHERE id = $1
               RETURNING {GARDEN_COLUMNS}"#
        ))
        .bind(id)
        .bind(&data.name)
        .bind(&data.location)
        .bind(&data.description)
        .bind(&data.total_area)
        .bind(&data.length)
        .bind(&data.width)
        .bind(&data.garden_type)
        .bind(&data.established_date)
        .bind(&data.notes)
        .fetch_one(pool)
        .await
    }

    /// Soft delete: flip is_active off instead of cascading the beds
    /// and plants away.
    pub async fn soft_delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE gardens SET is_active = 0, updated_at = datetime('now', 'subsec') WHERE id = $1 AND is_active = 1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
