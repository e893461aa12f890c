//! Logbook entries: dated notes (optionally with a photo) against a plant
//! bed, and optionally a specific plant in it.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct LogbookEntry {
    pub id: Uuid,
    pub plant_bed_id: Uuid,
    pub plant_id: Option<Uuid>,
    pub entry_date: NaiveDate,
    pub notes: String,
    pub photo_url: Option<String>,
    #[ts(type = "Date")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "Date")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, TS)]
pub struct CreateLogbookEntry {
    pub plant_bed_id: Uuid,
    pub plant_id: Option<Uuid>,
    pub entry_date: NaiveDate,
    pub notes: String,
    pub photo_url: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
pub struct UpdateLogbookEntry {
    pub entry_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub photo_url: Option<String>,
}

const ENTRY_COLUMNS: &str =
    "id, plant_bed_id, plant_id, entry_date, notes, photo_url, created_at, updated_at";

impl LogbookEntry {
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, LogbookEntry>(&format!(
            "SELECT {ENTRY_COLUMNS} FROM logbook_entries ORDER BY entry_date DESC"
        ))
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_bed(
        pool: &SqlitePool,
        plant_bed_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, LogbookEntry>(&format!(
            "SELECT {ENTRY_COLUMNS} FROM logbook_entries WHERE plant_bed_id = $1 ORDER BY entry_date DESC"
        ))
        .bind(plant_bed_id)
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, LogbookEntry>(&format!(
            "SELECT {ENTRY_COLUMNS} FROM logbook_entries WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn create(
        pool: &SqlitePool,
        data: &CreateLogbookEntry,
        id: Uuid,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, LogbookEntry>(&format!(
            r#"INSERT INTO logbook_entries (id, plant_bed_id, plant_id, entry_date, notes, photo_url)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING {ENTRY_COLUMNS}"#
        ))
        .bind(id)
        .bind(data.plant_bed_id)
        .bind(data.plant_id)
        .bind(data.entry_date)
        .bind(&data.notes)
        .bind(&data.photo_url)
        .fetch_one(pool)
        .await
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &UpdateLogbookEntry,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, LogbookEntry>(&format!(
            r#"UPDATE logbook_entries
               SET entry_date = COALESCE($2, entry_date),
                   notes = COALESCE($3, notes),
                   photo_url = COALESCE($4, photo_url),
                   updated_at = datetime('now', 'subsec')
               WHERE id = $1
               RETURNING {ENTRY_COLUMNS}"#
        ))
        .bind(id)
        .bind(data.entry_date)
        .bind(&data.notes)
        .bind(&data.photo_url)
        .fetch_one(pool)
        .await
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM logbook_entries WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
