//! Plant bed (plantvak) model.
//!
//! Beds are identified by a short letter code (A, B, .., Z, A1, ..) that is
//! unique per garden among active beds. Deleting a bed is a soft delete that
//! snapshots the bed into `deleted_plant_beds` so the trash can list and
//! restore it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool, Type};
use strum::{Display, EnumString};
use ts_rs::TS;
use uuid::Uuid;

use crate::retry::{RetryConfig, with_retry};

#[derive(Debug, Clone, Type, Serialize, Deserialize, PartialEq, TS, EnumString, Display)]
#[sqlx(rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SunExposure {
    FullSun,
    PartialSun,
    Shade,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct PlantBed {
    pub id: Uuid,
    pub garden_id: Uuid,
    pub name: String,
    pub letter_code: String,
    pub location: Option<String>,
    pub size: Option<String>,
    pub soil_type: Option<String>,
    pub sun_exposure: Option<SunExposure>,
    pub description: Option<String>,
    pub season_year: Option<i64>,
    pub is_active: bool,
    #[ts(type = "Date")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "Date")]
    pub updated_at: DateTime<Utc>,
}

/// Snapshot of a soft-deleted bed, kept for the trash listing.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct DeletedPlantBed {
    pub id: Uuid,
    pub original_id: Uuid,
    pub garden_id: Uuid,
    pub letter_code: String,
    pub name: String,
    #[ts(type = "Date")]
    pub deleted_at: DateTime<Utc>,
}

/// Payload for creating a bed. The letter code is assigned by the service
/// layer, never by the caller.
#[derive(Debug, Deserialize, TS)]
pub struct CreatePlantBed {
    pub garden_id: Uuid,
    pub location: Option<String>,
    pub size: Option<String>,
    pub soil_type: Option<String>,
    pub sun_exposure: Option<SunExposure>,
    pub description: Option<String>,
    pub season_year: Option<i64>,
}

#[derive(Debug, Deserialize, TS)]
pub struct UpdatePlantBed {
    pub name: Option<String>,
    pub location: Option<String>,
    pub size: Option<String>,
    pub soil_type: Option<String>,
    pub sun_exposure: Option<SunExposure>,
    pub description: Option<String>,
    pub season_year: Option<i64>,
}

const BED_COLUMNS: &str = r#"id, garden_id, name, letter_code, location, size, soil_type,
sun_exposure, description, season_year, is_active, created_at, updated_at"#;

impl PlantBed {
    pub async fn find_by_garden(
        pool: &SqlitePool,
        garden_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, PlantBed>(&format!(
            r#"SELECT {BED_COLUMNS} FROM plant_beds
               WHERE garden_id = $1 AND is_active = 1
               ORDER BY letter_code ASC"#
        ))
        .bind(garden_id)
        .fetch_all(pool)
        .await
    }

    /// Letter codes currently taken in a garden (active beds only).
    pub async fn letter_codes_for_garden(
        pool: &SqlitePool,
        garden_id: Uuid,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT letter_code FROM plant_beds WHERE garden_id = $1 AND is_active = 1",
        )
        .bind(garden_id)
        .fetch_all(pool)
        .await
    }

    pub async fn letter_code_in_use(
        pool: &SqlitePool,
        garden_id: Uuid,
        letter_code: &str,
    ) -> Result<bool, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM plant_beds WHERE garden_id = $1 AND letter_code = $2 AND is_active = 1",
        )
        .bind(garden_id)
        .bind(letter_code)
        .fetch_one(pool)
        .await?;
        Ok(count > 0)
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, PlantBed>(&format!(
            "SELECT {BED_COLUMNS} FROM plant_beds WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn create(
        pool: &SqlitePool,
        data: &CreatePlantBed,
        letter_code: &str,
        id: Uuid,
    ) -> Result<Self, sqlx::Error> {
        // The bed is named after its letter code unless renamed later.
        sqlx::query_as::<_, PlantBed>(&format!(
            r#"INSERT INTO plant_beds (id, garden_id, name, letter_code, location, size,
                                       soil_type, sun_exposure, description, season_year)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
               RETURNING {BED_COLUMNS}"#
        ))
        .bind(id)
        .bind(data.garden_id)
        .bind(letter_code)
        .bind(letter_code)
        .bind(&data.location)
        .bind(&data.size)
        .bind(&data.soil_type)
        .bind(&data.sun_exposure)
        .bind(&data.description)
        .bind(data.season_year)
        .fetch_one(pool)
        .await
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &UpdatePlantBed,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, PlantBed>(&format!(
            r#"UPDATE plant_beds
               SET name = COALESCE($2, name),
                   location = COALESCE($3, location),
                   size = COALESCE($4, size),
                   soil_type = COALESCE($5, soil_type),
                   sun_exposure = COALESCE($6, sun_exposure),
                   description = COALESCE($7, description),
                   season_year = COALESCE($8, season_year),
                   updated_at = datetime('now', 'subsec')
               WHERE id = $1
               RETURNING {BED_COLUMNS}"#
        ))
        .bind(id)
        .bind(&data.name)
        .bind(&data.location)
        .bind(&data.size)
        .bind(&data.soil_type)
        .bind(&data.sun_exposure)
        .bind(&data.description)
        .bind(data.season_year)
        .fetch_one(pool)
        .await
    }

    /// Soft delete a bed and snapshot it into the trash.
    /// Both writes happen in one transaction, retried if the database
    /// is briefly locked by another writer.
    pub async fn soft_delete(pool: &SqlitePool, id: Uuid) -> Result<bool, sqlx::Error> {
        with_retry(&RetryConfig::default(), "soft_delete_plant_bed", || {
            Self::soft_delete_once(pool, id)
        })
        .await
    }

    async fn soft_delete_once(pool: &SqlitePool, id: Uuid) -> Result<bool, sqlx::Error> {
        let Some(bed) = Self::find_by_id(pool, id).await? else {
            return Ok(false);
        };
        if !bed.is_active {
            return Ok(false);
        }

        let mut tx = pool.begin().await?;

        sqlx::query(
            "UPDATE plant_beds SET is_active = 0, updated_at = datetime('now', 'subsec') WHERE id = $1",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"INSERT INTO deleted_plant_beds (id, original_id, garden_id, letter_code, name)
               VALUES ($1, $2, $3, $4, $5)"#,
        )
        .bind(Uuid::new_v4())
        .bind(bed.id)
        .bind(bed.garden_id)
        .bind(&bed.letter_code)
        .bind(&bed.name)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(true)
    }

    /// Reactivate a soft-deleted bed and drop its trash snapshot.
    pub async fn restore(pool: &SqlitePool, original_id: Uuid) -> Result<bool, sqlx::Error> {
        with_retry(&RetryConfig::default(), "restore_plant_bed", || {
            Self::restore_once(pool, original_id)
        })
        .await
    }

    async fn restore_once(pool: &SqlitePool, original_id: Uuid) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let result = sqlx::query(
            "UPDATE plant_beds SET is_active = 1, updated_at = datetime('now', 'subsec') WHERE id = $1 AND is_active = 0",
        )
        .bind(original_id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        sqlx::query("DELETE FROM deleted_plant_beds WHERE original_id = $1")
            .bind(original_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }

    /// Remove a soft-deleted bed for good, along with its trash snapshot.
    pub async fn permanently_delete(pool: &SqlitePool, original_id: Uuid) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let result = sqlx::query("DELETE FROM plant_beds WHERE id = $1 AND is_active = 0")
            .bind(original_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM deleted_plant_beds WHERE original_id = $1")
            .bind(original_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}

impl DeletedPlantBed {
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, DeletedPlantBed>(
            r#"SELECT id, original_id, garden_id, letter_code, name, deleted_at
               FROM deleted_plant_beds
               ORDER BY deleted_at DESC"#,
        )
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_original_id(
        pool: &SqlitePool,
        original_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, DeletedPlantBed>(
            r#"SELECT id, original_id, garden_id, letter_code, name, deleted_at
               FROM deleted_plant_beds
               WHERE original_id = $1"#,
        )
        .bind(original_id)
        .fetch_optional(pool)
        .await
    }
}
