//! Plant (bloem) model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool, Type};
use strum::{Display, EnumString};
use ts_rs::TS;
use uuid::Uuid;

use super::plant_bed::SunExposure;

/// Health status of a plant, in the Dutch wording the front end shows.
#[derive(
    Debug, Clone, Type, Serialize, Deserialize, PartialEq, TS, EnumString, Display, Default,
)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PlantStatus {
    #[default]
    Gezond,
    AandachtNodig,
    Ziek,
    Dood,
    Geoogst,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct Plant {
    pub id: Uuid,
    pub plant_bed_id: Uuid,
    pub name: String,
    pub scientific_name: Option<String>,
    pub variety: Option<String>,
    pub color: Option<String>,
    pub height: Option<f64>,
    pub plants_per_sqm: Option<i64>,
    pub sun_preference: Option<SunExposure>,
    pub status: PlantStatus,
    /// Free-text Dutch month range, e.g. "Juni-September".
    pub bloom_period: Option<String>,
    pub planting_date: Option<NaiveDate>,
    pub expected_harvest_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub care_instructions: Option<String>,
    pub watering_frequency: Option<i64>,
    pub fertilizer_schedule: Option<String>,
    #[ts(type = "Date")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "Date")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, TS)]
pub struct CreatePlant {
    pub plant_bed_id: Uuid,
    pub name: String,
    pub scientific_name: Option<String>,
    pub variety: Option<String>,
    pub color: Option<String>,
    pub height: Option<f64>,
    pub plants_per_sqm: Option<i64>,
    pub sun_preference: Option<SunExposure>,
    pub status: Option<PlantStatus>,
    pub bloom_period: Option<String>,
    pub planting_date: Option<NaiveDate>,
    pub expected_harvest_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub care_instructions: Option<String>,
    pub watering_frequency: Option<i64>,
    pub fertilizer_schedule: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
pub struct UpdatePlant {
    pub name: Option<String>,
    pub scientific_name: Option<String>,
    pub variety: Option<String>,
    pub color: Option<String>,
    pub height: Option<f64>,
    pub plants_per_sqm: Option<i64>,
    pub sun_preference: Option<SunExposure>,
    pub status: Option<PlantStatus>,
    pub bloom_period: Option<String>,
    pub planting_date: Option<NaiveDate>,
    pub expected_harvest_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub care_instructions: Option<String>,
    pub watering_frequency: Option<i64>,
    pub fertilizer_schedule: Option<String>,
}

const PLANT_COLUMNS: &str = r#"id, plant_bed_id, name, scientific_name, variety, color, height,
plants_per_sqm, sun_preference, status, bloom_period, planting_date, expected_harvest_date,
notes, care_instructions, watering_frequency, fertilizer_schedule, created_at, updated_at"#;

impl Plant {
    pub async fn find_by_bed(
        pool: &SqlitePool,
        plant_bed_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Plant>(&format!(
            "SELECT {PLANT_COLUMNS} FROM plants WHERE plant_bed_id = $1 ORDER BY name ASC"
        ))
        .bind(plant_bed_id)
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Plant>(&format!(
            "SELECT {PLANT_COLUMNS} FROM plants WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn create(
        pool: &SqlitePool,
        data: &CreatePlant,
        id: Uuid,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Plant>(&format!(
            r#"INSERT INTO plants (id, plant_bed_id, name, scientific_name, variety, color,
                                   height, plants_per_sqm, sun_preference, status, bloom_period,
                                   planting_date, expected_harvest_date, notes, care_instructions,
                                   watering_frequency, fertilizer_schedule)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
               RETURNING {PLANT_COLUMNS}"#
        ))
        .bind(id)
        .bind(data.plant_bed_id)
        .bind(&data.name)
        .bind(&data.scientific_name)
        .bind(&data.variety)
        .bind(&data.color)
        .bind(data.height)
        .bind(data.plants_per_sqm)
        .bind(&data.sun_preference)
        .bind(data.status.clone().unwrap_or_default())
        .bind(&data.bloom_period)
        .bind(data.planting_date)
        .bind(data.expected_harvest_date)
        .bind(&data.notes)
        .bind(&data.care_instructions)
        .bind(data.watering_frequency)
        .bind(&data.fertilizer_schedule)
        .fetch_one(pool)
        .await
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &UpdatePlant,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Plant>(&format!(
            r#"UPDATE plants
               SET name = COALESCE($2, name),
                   scientific_name = COALESCE($3, scientific_name),
                   variety = COALESCE($4, variety),
                   color = COALESCE($5, color),
                   height = COALESCE($6, height),
                   plants_per_sqm = COALESCE($7, plants_per_sqm),
                   sun_preference = COALESCE($8, sun_preference),
                   status = COALESCE($9, status),
                   bloom_period = COALESCE($10, bloom_period),
                   planting_date = COALESCE($11, planting_date),
                   expected_harvest_date = COALESCE($12, expected_harvest_date),
                   notes = COALESCE($13, notes),
                   care_instructions = COALESCE($14, care_instructions),
                   watering_frequency = COALESCE($15, watering_frequency),
                   fertilizer_schedule = COALESCE($16, fertilizer_schedule),
                   updated_at = datetime('now', 'subsec')
               WHERE id = $1
               RETURNING {PLANT_COLUMNS}"#
        ))
        .bind(id)
        .bind(&data.name)
        .bind(&data.scientific_name)
        .bind(&data.variety)
        .bind(&data.color)
        .bind(data.height)
        .bind(data.plants_per_sqm)
        .bind(&data.sun_preference)
        .bind(&data.status)
        .bind(&data.bloom_period)
        .bind(data.planting_date)
        .bind(data.expected_harvest_date)
        .bind(&data.notes)
        .bind(&data.care_instructions)
        .bind(data.watering_frequency)
        .bind(&data.fertilizer_schedule)
        .fetch_one(pool)
        .await
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM plants WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::plant_bed::{CreatePlantBed, PlantBed, tests::setup_garden};
    use crate::test_utils::create_test_pool;

    async fn setup_bed(pool: &SqlitePool) -> Uuid {
        let garden_id = setup_garden(pool).await;
        let data = CreatePlantBed {
            garden_id,
            location: None,
            size: None,
            soil_type: None,
            sun_exposure: None,
            description: None,
            season_year: None,
        };
        PlantBed::create(pool, &data, "A", Uuid::new_v4())
            .await
            .expect("Failed to create bed")
            .id
    }

    #[tokio::test]
    async fn test_create_defaults_status_to_gezond() {
        let (pool, _temp_dir) = create_test_pool().await;
        let bed_id = setup_bed(&pool).await;

        let data = CreatePlant {
            plant_bed_id: bed_id,
            name: "Zonnebloem".to_string(),
            scientific_name: Some("Helianthus annuus".to_string()),
            variety: None,
            color: Some("geel".to_string()),
            height: Some(180.0),
            plants_per_sqm: Some(4),
            sun_preference: Some(SunExposure::FullSun),
            status: None,
            bloom_period: Some("Juli-September".to_string()),
            planting_date: None,
            expected_harvest_date: None,
            notes: None,
            care_instructions: None,
            watering_frequency: Some(2),
            fertilizer_schedule: None,
        };
        let plant = Plant::create(&pool, &data, Uuid::new_v4())
            .await
            .expect("Failed to create plant");
        assert_eq!(plant.status, PlantStatus::Gezond);
        assert_eq!(plant.bloom_period.as_deref(), Some("Juli-September"));

        let in_bed = Plant::find_by_bed(&pool, bed_id).await.expect("Query failed");
        assert_eq!(in_bed.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_removes_row() {
        let (pool, _temp_dir) = create_test_pool().await;
        let bed_id = setup_bed(&pool).await;

        let data = CreatePlant {
            plant_bed_id: bed_id,
            name: "Lavendel".to_string(),
            scientific_name: None,
            variety: None,
            color: None,
            height: None,
            plants_per_sqm: None,
            sun_preference: None,
            status: Some(PlantStatus::AandachtNodig),
            bloom_period: None,
            planting_date: None,
            expected_harvest_date: None,
            notes: None,
            care_instructions: None,
            watering_frequency: None,
            fertilizer_schedule: None,
        };
        let plant = Plant::create(&pool, &data, Uuid::new_v4())
            .await
            .expect("Failed to create plant");

        assert_eq!(Plant::delete(&pool, plant.id).await.expect("Delete failed"), 1);
        assert!(
            Plant::find_by_id(&pool, plant.id)
                .await
                .expect("Query failed")
                .is_none()
        );
    }
}
