//! Trash: listing, restoring and purging soft-deleted items.
//!
//! Two kinds of items end up here: deactivated users and deleted plant
//! beds (kept as snapshots so the bed list stays clean). Restoring a
//! bed is refused when its letter code has been handed out again in the
//! meantime.

use db::models::plant_bed::{DeletedPlantBed, PlantBed};
use db::models::user::User;
use serde::Serialize;
use sqlx::SqlitePool;
use thiserror::Error;
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum TrashError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error("Item not found in trash")]
    NotFound,
    #[error("Letter code {0} is already in use in this garden")]
    LetterCodeTaken(String),
}

#[derive(Debug, Serialize, TS)]
pub struct TrashContents {
    pub deleted_users: Vec<User>,
    pub deleted_plant_beds: Vec<DeletedPlantBed>,
}

pub struct TrashService;

impl TrashService {
    pub async fn list(pool: &SqlitePool) -> Result<TrashContents, sqlx::Error> {
        Ok(TrashContents {
            deleted_users: User::find_deactivated(pool).await?,
            deleted_plant_beds: DeletedPlantBed::find_all(pool).await?,
        })
    }

    /// Restore a soft-deleted bed, refusing when its letter code has
    /// been reassigned since deletion.
    pub async fn restore_plant_bed(pool: &SqlitePool, original_id: Uuid) -> Result<(), TrashError> {
        let Some(snapshot) = DeletedPlantBed::find_by_original_id(pool, original_id).await? else {
            return Err(TrashError::NotFound);
        };

        if PlantBed::letter_code_in_use(pool, snapshot.garden_id, &snapshot.letter_code).await? {
            return Err(TrashError::LetterCodeTaken(snapshot.letter_code));
        }

        if !PlantBed::restore(pool, original_id).await? {
            return Err(TrashError::NotFound);
        }
        tracing::info!(%original_id, letter_code = snapshot.letter_code, "restored plant bed");
        Ok(())
    }

    pub async fn restore_user(pool: &SqlitePool, user_id: Uuid) -> Result<(), TrashError> {
        if User::reactivate(pool, user_id).await? == 0 {
            return Err(TrashError::NotFound);
        }
        Ok(())
    }

    pub async fn permanently_delete_plant_bed(
        pool: &SqlitePool,
        original_id: Uuid,
    ) -> Result<(), TrashError> {
        if !PlantBed::permanently_delete(pool, original_id).await? {
            return Err(TrashError::NotFound);
        }
        Ok(())
    }

    pub async fn permanently_delete_user(
        pool: &SqlitePool,
        user_id: Uuid,
    ) -> Result<(), TrashError> {
        let Some(user) = User::find_by_id(pool, user_id).await? else {
            return Err(TrashError::NotFound);
        };
        // Only items already in the trash can be purged.
        if user.is_active {
            return Err(TrashError::NotFound);
        }
        User::delete(pool, user_id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::notify::test_support::RecordingNotifier;
    use crate::services::plant_beds::PlantBedService;
    use db::models::garden::{CreateGarden, Garden};
    use db::models::plant_bed::CreatePlantBed;
    use db::models::user::CreateUser;
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
    async fn test_restore_bed_roundtrip() {
        let (pool, _temp_dir) = create_test_pool().await;
        let notifier = RecordingNotifier::default();
        let garden_id = setup_garden(&pool).await;

        let bed = PlantBedService::create(&pool, &notifier, &bed_fixture(garden_id))
            .await
            .expect("Create failed");
        PlantBedService::soft_delete(&pool, bed.id)
            .await
            .expect("Delete failed");

        let trash = TrashService::list(&pool).await.expect("List failed");
        assert_eq!(trash.deleted_plant_beds.len(), 1);
        assert_eq!(trash.deleted_plant_beds[0].letter_code, "A");

        TrashService::restore_plant_bed(&pool, bed.id)
            .await
            .expect("Restore failed");
        assert!(TrashService::list(&pool)
            .await
            .expect("List failed")
            .deleted_plant_beds
            .is_empty());
    }

    #[tokio::test]
    async fn test_restore_refused_when_code_reassigned() {
        let (pool, _temp_dir) = create_test_pool().await;
        let notifier = RecordingNotifier::default();
        let garden_id = setup_garden(&pool).await;

        let bed = PlantBedService::create(&pool, &notifier, &bed_fixture(garden_id))
            .await
            .expect("Create failed");
        PlantBedService::soft_delete(&pool, bed.id)
            .await
            .expect("Delete failed");

        // "A" is free again and goes to the next bed created.
        let replacement = PlantBedService::create(&pool, &notifier, &bed_fixture(garden_id))
            .await
            .expect("Create failed");
        assert_eq!(replacement.letter_code, "A");

        let result = TrashService::restore_plant_bed(&pool, bed.id).await;
        assert!(matches!(result, Err(TrashError::LetterCodeTaken(code)) if code == "A"));
    }

    #[tokio::test]
    async fn test_user_trash_cycle() {
        let (pool, _temp_dir) = create_test_pool().await;

        let user = User::create(
            &pool,
            &CreateUser {
                email: "jan@example.com".to_string(),
                full_name: None,
                role: None,
            },
            Uuid::new_v4(),
        )
        .await
        .expect("Failed to create user");

        // Active users cannot be purged straight from the trash.
        assert!(matches!(
            TrashService::permanently_delete_user(&pool, user.id).await,
            Err(TrashError::NotFound)
        ));

        User::deactivate(&pool, user.id).await.expect("Deactivate failed");
        assert_eq!(
            TrashService::list(&pool)
                .await
                .expect("List failed")
                .deleted_users
                .len(),
            1
        );

        TrashService::restore_user(&pool, user.id)
            .await
            .expect("Restore failed");

        User::deactivate(&pool, user.id).await.expect("Deactivate failed");
        TrashService::permanently_delete_user(&pool, user.id)
            .await
            .expect("Purge failed");
        assert!(User::find_by_id(&pool, user.id)
            .await
            .expect("Query failed")
            .is_none());
    }
}
