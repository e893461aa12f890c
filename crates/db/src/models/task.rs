//! Garden task model.
//!
//! A task targets exactly one of a plant or a whole plant bed (enforced by a
//! CHECK constraint). List views join plant/bed/garden names in as
//! [`TaskWithContext`].

use chrono::{DateTime, NaiveDate, Utc};
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
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(
    Debug, Clone, Type, Serialize, Deserialize, PartialEq, TS, EnumString, Display, Default,
)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TaskType {
    Watering,
    Fertilizing,
    Pruning,
    Harvesting,
    Planting,
    PestControl,
    #[default]
    General,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct Task {
    pub id: Uuid,
    pub plant_id: Option<Uuid>,
    pub plant_bed_id: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
    pub due_date: NaiveDate,
    pub completed: bool,
    #[ts(type = "Date | null")]
    pub completed_at: Option<DateTime<Utc>>,
    pub priority: TaskPriority,
    pub task_type: TaskType,
    pub notes: Option<String>,
    #[ts(type = "Date")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "Date")]
    pub updated_at: DateTime<Utc>,
}

/// Task with the names of the plant/bed/garden it belongs to, for list views.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct TaskWithContext {
    #[sqlx(flatten)]
    #[serde(flatten)]
    #[ts(flatten)]
    pub task: Task,
    pub plant_name: Option<String>,
    pub plant_bed_name: String,
    pub garden_name: String,
}

#[derive(Debug, Deserialize, TS)]
pub struct CreateTask {
    pub plant_id: Option<Uuid>,
    pub plant_bed_id: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
    pub due_date: NaiveDate,
    pub priority: Option<TaskPriority>,
    pub task_type: Option<TaskType>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<TaskPriority>,
    pub task_type: Option<TaskType>,
    pub notes: Option<String>,
}

const TASK_COLUMNS: &str = r#"id, plant_id, plant_bed_id, title, description, due_date,
completed, completed_at, priority, task_type, notes, created_at, updated_at"#;

// priority is stored as text, so rank it explicitly instead of sorting
// the strings (which would put 'medium' above 'high').
const PRIORITY_RANK: &str =
    "CASE priority WHEN 'high' THEN 3 WHEN 'medium' THEN 2 ELSE 1 END";

impl Task {
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks ORDER BY due_date ASC, {PRIORITY_RANK} DESC"
        ))
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_plant(pool: &SqlitePool, plant_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE plant_id = $1 ORDER BY due_date ASC"
        ))
        .bind(plant_id)
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_plant_bed(
        pool: &SqlitePool,
        plant_bed_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE plant_bed_id = $1 ORDER BY due_date ASC"
        ))
        .bind(plant_bed_id)
        .fetch_all(pool)
        .await
    }

    /// All tasks joined with the plant, bed and garden names they belong to.
    /// Plant-level tasks resolve the bed through the plant; bed-level tasks
    /// resolve it directly.
    pub async fn find_all_with_context(
        pool: &SqlitePool,
    ) -> Result<Vec<TaskWithContext>, sqlx::Error> {
        sqlx::query_as::<_, TaskWithContext>(&format!(
            r#"SELECT t.id, t.plant_id, t.plant_bed_id, t.title, t.description, t.due_date,
                      t.completed, t.completed_at, t.priority, t.task_type, t.notes,
                      t.created_at, t.updated_at,
                      p.name AS plant_name,
                      pb.name AS plant_bed_name,
                      g.name AS garden_name
               FROM tasks t
               LEFT JOIN plants p ON p.id = t.plant_id
               JOIN plant_beds pb ON pb.id = COALESCE(t.plant_bed_id, p.plant_bed_id)
               JOIN gardens g ON g.id = pb.garden_id
               ORDER BY t.due_date ASC, {PRIORITY_RANK} DESC"#
        ))
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn create(
        pool: &SqlitePool,
        data: &CreateTask,
        id: Uuid,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Task>(&format!(
            r#"INSERT INTO tasks (id, plant_id, plant_bed_id, title, description, due_date,
                                  priority, task_type, notes)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
               RETURNING {TASK_COLUMNS}"#
        ))
        .bind(id)
        .bind(data.plant_id)
        .bind(data.plant_bed_id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.due_date)
        .bind(data.priority.clone().unwrap_or_default())
        .bind(data.task_type.clone().unwrap_or_default())
        .bind(&data.notes)
        .fetch_one(pool)
        .await
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &UpdateTask,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Task>(&format!(
            r#"UPDATE tasks
               SET title = COALESCE($2, title),
                   description = COALESCE($3, description),
                   due_date = COALESCE($4, due_date),
                   priority = COALESCE($5, priority),
                   task_type = COALESCE($6, task_type),
                   notes = COALESCE($7, notes),
                   updated_at = datetime('now', 'subsec')
               WHERE id = $1
               RETURNING {TASK_COLUMNS}"#
        ))
        .bind(id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.due_date)
        .bind(&data.priority)
        .bind(&data.task_type)
        .bind(&data.notes)
        .fetch_one(pool)
        .await
    }

    /// Toggle completion. Completing stamps completed_at; un-completing
    /// clears it again.
    pub async fn set_completed(
        pool: &SqlitePool,
        id: Uuid,
        completed: bool,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Task>(&format!(
            r#"UPDATE tasks
               SET completed = $2,
                   completed_at = CASE WHEN $2 THEN datetime('now', 'subsec') ELSE NULL END,
                   updated_at = datetime('now', 'subsec')
               WHERE id = $1
               RETURNING {TASK_COLUMNS}"#
        ))
        .bind(id)
        .bind(completed)
        .fetch_one(pool)
        .await
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
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

    fn task_fixture(plant_bed_id: Uuid) -> CreateTask {
        CreateTask {
            plant_id: None,
            plant_bed_id: Some(plant_bed_id),
            title: "Water geven".to_string(),
            description: None,
            due_date: NaiveDate::from_ymd_opt(2025, 6, 20).unwrap(),
            priority: Some(TaskPriority::High),
            task_type: Some(TaskType::Watering),
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_complete() {
        let (pool, _temp_dir) = create_test_pool().await;
        let bed_id = setup_bed(&pool).await;

        let task = Task::create(&pool, &task_fixture(bed_id), Uuid::new_v4())
            .await
            .expect("Failed to create task");
        assert!(!task.completed);
        assert!(task.completed_at.is_none());
        assert_eq!(task.task_type, TaskType::Watering);

        let done = Task::set_completed(&pool, task.id, true)
            .await
            .expect("Complete failed");
        assert!(done.completed);
        assert!(done.completed_at.is_some());

        let undone = Task::set_completed(&pool, task.id, false)
            .await
            .expect("Uncomplete failed");
        assert!(!undone.completed);
        assert!(undone.completed_at.is_none());
    }

    #[tokio::test]
    async fn test_check_constraint_rejects_targetless_task() {
        let (pool, _temp_dir) = create_test_pool().await;
        setup_bed(&pool).await;

        let mut data = task_fixture(Uuid::new_v4());
        data.plant_bed_id = None;
        let result = Task::create(&pool, &data, Uuid::new_v4()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_find_all_ranks_priority_not_alphabet() {
        let (pool, _temp_dir) = create_test_pool().await;
        let bed_id = setup_bed(&pool).await;

        for (title, priority) in [
            ("snoeien", TaskPriority::Low),
            ("bemesten", TaskPriority::Medium),
            ("water geven", TaskPriority::High),
        ] {
            let mut data = task_fixture(bed_id);
            data.title = title.to_string();
            data.priority = Some(priority);
            Task::create(&pool, &data, Uuid::new_v4())
                .await
                .expect("Failed to create task");
        }

        let tasks = Task::find_all(&pool).await.expect("Query failed");
        let titles: Vec<&str> = tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["water geven", "bemesten", "snoeien"]);
    }

    #[tokio::test]
    async fn test_find_with_context_joins_names() {
        let (pool, _temp_dir) = create_test_pool().await;
        let bed_id = setup_bed(&pool).await;

        Task::create(&pool, &task_fixture(bed_id), Uuid::new_v4())
            .await
            .expect("Failed to create task");

        let with_context = Task::find_all_with_context(&pool)
            .await
            .expect("Query failed");
        assert_eq!(with_context.len(), 1);
        assert_eq!(with_context[0].plant_bed_name, "A");
        assert_eq!(with_context[0].garden_name, "Testtuin");
        assert!(with_context[0].plant_name.is_none());
    }
}
