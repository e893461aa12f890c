//! Plant bed creation and deletion on top of the model layer.
//!
//! Creation assigns the next free letter code within the garden and
//! runs the insert through the save-retry wrapper, so transient
//! failures get retried and surfaced as notifications.

use db::models::plant_bed::{CreatePlantBed, PlantBed};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::bed_codes::next_letter_code;
use super::notify::Notifier;
use super::save_retry::{SaveError, SaveOptions, execute_save_with_retry};

pub struct PlantBedService;

impl PlantBedService {
    /// Create a bed with a freshly assigned letter code. Freed codes
    /// are reused before the sequence grows.
    ///
    /// The code is picked inside the retried closure: when a concurrent
    /// create grabs the same code and the unique index rejects ours,
    /// the next attempt sees the taken code and picks a fresh one.
    pub async fn create(
        pool: &SqlitePool,
        notifier: &dyn Notifier,
        data: &CreatePlantBed,
    ) -> Result<PlantBed, SaveError> {
        execute_save_with_retry(notifier, &SaveOptions::default(), || async move {
            let existing = PlantBed::letter_codes_for_garden(pool, data.garden_id).await?;
            let letter_code = next_letter_code(&existing);
            tracing::debug!(garden_id = %data.garden_id, letter_code, "assigning bed letter code");
            PlantBed::create(pool, data, &letter_code, Uuid::new_v4()).await
        })
        .await
    }

    /// Move a bed to the trash. Returns false if it was already gone.
    pub async fn soft_delete(pool: &SqlitePool, id: Uuid) -> Result<bool, sqlx::Error> {
        PlantBed::soft_delete(pool, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::notify::test_support::RecordingNotifier;
    use db::models::garden::{CreateGarden, Garden};
    use db::test_utils::create_test_pool;

    async fn setup_garden(pool: &SqlitePool) -> Uuid {
        let data = CreateGarden {
            name: "Testtuin".to_string(),
            location: "Utrecht".to_string(),
            description: None,
            total_area: None,
            length: None,
            width: None,
            garden_type: None,
            established_date: None,
            notes: None,
        };
        Garden::create(pool, &data, Uuid::new_v4())
            .await
            .expect("Failed to create garden")
            .id
    }

    fn bed_fixture(garden_id: Uuid) -> CreatePlantBed {
        CreatePlantBed {
            garden_id,
            location: None,
            size: None,
            soil_type: None,
            sun_exposure: None,
            description: None,
            season_year: None,
        }
    }

    #[tokio::test]
    async fn test_sequential_codes_and_gap_reuse() {
        let (pool, _temp_dir) = create_test_pool().await;
        let notifier = RecordingNotifier::default();
        let garden_id = setup_garden(&pool).await;

        let a = PlantBedService::create(&pool, &notifier, &bed_fixture(garden_id))
            .await
            .expect("Create failed");
        let b = PlantBedService::create(&pool, &notifier, &bed_fixture(garden_id))
            .await
            .expect("Create failed");
        assert_eq!(a.letter_code, "A");
        assert_eq!(b.letter_code, "B");
        assert_eq!(a.name, "A");

        assert!(PlantBedService::soft_delete(&pool, a.id)
            .await
            .expect("Delete failed"));

        let reused = PlantBedService::create(&pool, &notifier, &bed_fixture(garden_id))
            .await
            .expect("Create failed");
        assert_eq!(reused.letter_code, "A");
    }

    #[tokio::test]
    async fn test_concurrent_creates_get_distinct_codes() {
        let (pool, _temp_dir) = create_test_pool().await;
        let notifier = RecordingNotifier::default();
        let garden_id = setup_garden(&pool).await;

        // Interleaved creates may both pick "A"; the loser's retry must
        // come back with the next free code instead of "A" again.
        let fixture_one = bed_fixture(garden_id);
        let fixture_two = bed_fixture(garden_id);
        let (first, second) = tokio::join!(
            PlantBedService::create(&pool, &notifier, &fixture_one),
            PlantBedService::create(&pool, &notifier, &fixture_two),
        );
        let first = first.expect("Create failed");
        let second = second.expect("Create failed");
        assert_ne!(first.letter_code, second.letter_code);

        let mut codes = vec![first.letter_code, second.letter_code];
        codes.sort();
        assert_eq!(codes, vec!["A", "B"]);
    }
}
