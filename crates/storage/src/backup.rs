//! Structured full-store exchange. The document layout is the wire
//! contract: five top-level arrays of flat records whose field names match
//! the persisted schema. This is the authoritative round-trip format; the
//! text dialects in [`crate::text`] are not.

use std::path::Path;

use chrono::{DateTime, Utc};
use log::debug;
use rusqlite::params;
use serde::{Deserialize, Serialize};

use kalos_domain as domain;

use crate::{
    ExportError, ImportError, ParseError,
    sqlite::{SqliteStore, datetime_from_sql, storage},
};

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreDocument {
    #[serde(default)]
    pub workouts: Option<Vec<Workout>>,
    #[serde(default)]
    pub exercises: Option<Vec<Exercise>>,
    #[serde(default)]
    pub progressions: Option<Vec<Progression>>,
    #[serde(default, rename = "workoutExercises")]
    pub workout_exercises: Option<Vec<WorkoutExercise>>,
    #[serde(default)]
    pub sets: Option<Vec<Set>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub goal: String,
    pub comments: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub subtype: String,
    pub is_custom: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progression {
    pub id: i64,
    pub exercise_id: i64,
    pub name: String,
    pub description: String,
    pub goal: String,
    pub difficulty: i64,
    pub prev_progression_id: Option<i64>,
    pub next_progression_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutExercise {
    pub id: i64,
    pub workout_id: i64,
    pub exercise_id: i64,
    pub progression_id: Option<i64>,
    pub reps: i64,
    pub sets: i64,
    pub time_seconds: i64,
    pub weight: Option<f64>,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Set {
    pub id: i64,
    pub workout_exercise_id: i64,
    pub set_number: i64,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
}

impl SqliteStore {
    /// Reads all five tables in one transaction and assembles the exchange
    /// document. Column values are passed through untouched so a backup
    /// reproduces the store byte for byte on import.
    pub fn export_document(&self) -> Result<StoreDocument, domain::StorageError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction().map_err(storage)?;

        let workouts = tx
            .prepare("SELECT id, name, created_at, goal, comments FROM workouts ORDER BY id")
            .map_err(storage)?
            .query_map([], |row| {
                Ok(Workout {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    created_at: datetime_from_sql(2, &row.get::<_, String>(2)?)?,
                    goal: row.get(3)?,
                    comments: row.get(4)?,
                })
            })
            .map_err(storage)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(storage)?;

        let exercises = tx
            .prepare("SELECT id, name, category, subtype, is_custom FROM exercises ORDER BY id")
            .map_err(storage)?
            .query_map([], |row| {
                Ok(Exercise {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    category: row.get(2)?,
                    subtype: row.get(3)?,
                    is_custom: row.get(4)?,
                })
            })
            .map_err(storage)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(storage)?;

        let progressions = tx
            .prepare(
                "SELECT id, exercise_id, name, description, goal, difficulty,
                        prev_progression_id, next_progression_id
                 FROM progressions ORDER BY id",
            )
            .map_err(storage)?
            .query_map([], |row| {
                Ok(Progression {
                    id: row.get(0)?,
                    exercise_id: row.get(1)?,
                    name: row.get(2)?,
                    description: row.get(3)?,
                    goal: row.get(4)?,
                    difficulty: row.get(5)?,
                    prev_progression_id: row.get(6)?,
                    next_progression_id: row.get(7)?,
                })
            })
            .map_err(storage)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(storage)?;

        let workout_exercises = tx
            .prepare(
                "SELECT id, workout_id, exercise_id, progression_id, reps, sets,
                        time_seconds, weight, notes
                 FROM workout_exercises ORDER BY id",
            )
            .map_err(storage)?
            .query_map([], |row| {
                Ok(WorkoutExercise {
                    id: row.get(0)?,
                    workout_id: row.get(1)?,
                    exercise_id: row.get(2)?,
                    progression_id: row.get(3)?,
                    reps: row.get(4)?,
                    sets: row.get(5)?,
                    time_seconds: row.get(6)?,
                    weight: row.get(7)?,
                    notes: row.get(8)?,
                })
            })
            .map_err(storage)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(storage)?;

        let sets = tx
            .prepare(
                "SELECT id, workout_exercise_id, set_number, completed, completed_at
                 FROM sets ORDER BY id",
            )
            .map_err(storage)?
            .query_map([], |row| {
                Ok(Set {
                    id: row.get(0)?,
                    workout_exercise_id: row.get(1)?,
                    set_number: row.get(2)?,
                    completed: row.get(3)?,
                    completed_at: row
                        .get::<_, Option<String>>(4)?
                        .map(|value| datetime_from_sql(4, &value))
                        .transpose()?,
                })
            })
            .map_err(storage)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(storage)?;

        Ok(StoreDocument {
            workouts: Some(workouts),
            exercises: Some(exercises),
            progressions: Some(progressions),
            workout_exercises: Some(workout_exercises),
            sets: Some(sets),
        })
    }

    /// Serializes the exchange document and writes it to the given path.
    /// Handing the file to the platform share mechanism is the caller's
    /// job; a failed share does not undo the written file.
    pub fn export_to_path(&self, path: &Path) -> Result<(), ExportError> {
        let document = self.export_document()?;
        let content =
            serde_json::to_string_pretty(&document).map_err(|err| ExportError::Io(err.into()))?;
        std::fs::write(path, content)?;
        debug!("store exported to {}", path.display());
        Ok(())
    }

    /// Parses and imports an exchange document. Malformed JSON fails before
    /// anything is written.
    pub fn import_json(&self, content: &str) -> Result<(), ImportError> {
        let document = serde_json::from_str(content).map_err(ParseError::Json)?;
        self.import_document(&document)
    }

    /// Upserts every present record by id, in dependency order, inside one
    /// transaction. Absent top-level keys are skipped, never treated as a
    /// deletion.
    pub fn import_document(&self, document: &StoreDocument) -> Result<(), ImportError> {
        let mut conn = self.lock().map_err(ImportError::Storage)?;
        let tx = conn.transaction().map_err(storage)?;

        for exercise in document.exercises.iter().flatten() {
            tx.execute(
                "INSERT OR REPLACE INTO exercises (id, name, category, subtype, is_custom)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    exercise.id,
                    exercise.name,
                    exercise.category,
                    exercise.subtype,
                    exercise.is_custom
                ],
            )
            .map_err(storage)?;
        }

        for progression in document.progressions.iter().flatten() {
            tx.execute(
                "INSERT OR REPLACE INTO progressions
                 (id, exercise_id, name, description, goal, difficulty,
                  prev_progression_id, next_progression_id)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    progression.id,
                    progression.exercise_id,
                    progression.name,
                    progression.description,
                    progression.goal,
                    progression.difficulty,
                    progression.prev_progression_id,
                    progression.next_progression_id
                ],
            )
            .map_err(storage)?;
        }

        for workout in document.workouts.iter().flatten() {
            tx.execute(
                "INSERT OR REPLACE INTO workouts (id, name, created_at, goal, comments)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    workout.id,
                    workout.name,
                    workout.created_at.to_rfc3339(),
                    workout.goal,
                    workout.comments
                ],
            )
            .map_err(storage)?;
        }

        for workout_exercise in document.workout_exercises.iter().flatten() {
            tx.execute(
                "INSERT OR REPLACE INTO workout_exercises
                 (id, workout_id, exercise_id, progression_id, reps, sets,
                  time_seconds, weight, notes)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    workout_exercise.id,
                    workout_exercise.workout_id,
                    workout_exercise.exercise_id,
                    workout_exercise.progression_id,
                    workout_exercise.reps,
                    workout_exercise.sets,
                    workout_exercise.time_seconds,
                    workout_exercise.weight,
                    workout_exercise.notes
                ],
            )
            .map_err(storage)?;
        }

        for set in document.sets.iter().flatten() {
            tx.execute(
                "INSERT OR REPLACE INTO sets
                 (id, workout_exercise_id, set_number, completed, completed_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    set.id,
                    set.workout_exercise_id,
                    set.set_number,
                    set.completed,
                    set.completed_at.map(|datetime| datetime.to_rfc3339())
                ],
            )
            .map_err(storage)?;
        }

        tx.commit().map_err(storage)?;
        debug!("document imported");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use kalos_domain::{ExerciseRepository, WorkoutRepository};

    use crate::tests::data;

    use super::*;

    #[tokio::test]
    async fn test_round_trip_reproduces_every_row() {
        let store = data::populated_store().await;
        let document = store.export_document().unwrap();

        let restored = data::empty_store();
        restored.import_document(&document).unwrap();

        assert_eq!(restored.export_document().unwrap(), document);
    }

    #[tokio::test]
    async fn test_import_overwrites_by_id() {
        let store = data::populated_store().await;
        let mut document = store.export_document().unwrap();
        let workouts = document.workouts.as_mut().unwrap();
        workouts[0].goal = "Hypertrophy".to_string();
        let expected_id = workouts[0].id;

        store.import_document(&document).unwrap();

        let workout = store.read_workouts().await.unwrap().remove(0);
        assert_eq!(workout.goal, "Hypertrophy");
        assert_eq!(*workout.id, expected_id);
    }

    #[tokio::test]
    async fn test_import_with_partial_keys_leaves_other_tables_unchanged() {
        let store = data::populated_store().await;
        let before = store.export_document().unwrap();

        store
            .import_document(&StoreDocument {
                exercises: Some(vec![Exercise {
                    id: 100,
                    name: "Muscle-up".to_string(),
                    category: "pull-ups".to_string(),
                    subtype: "dynamic".to_string(),
                    is_custom: true,
                }]),
                ..StoreDocument::default()
            })
            .unwrap();

        let after = store.export_document().unwrap();
        assert_eq!(after.workouts, before.workouts);
        assert_eq!(after.progressions, before.progressions);
        assert_eq!(after.workout_exercises, before.workout_exercises);
        assert_eq!(after.sets, before.sets);
        assert_eq!(
            after.exercises.unwrap().len(),
            before.exercises.unwrap().len() + 1
        );
    }

    #[tokio::test]
    async fn test_import_empty_document_is_a_no_op() {
        let store = data::populated_store().await;
        let before = store.export_document().unwrap();

        store.import_document(&StoreDocument::default()).unwrap();

        assert_eq!(store.export_document().unwrap(), before);
    }

    #[tokio::test]
    async fn test_import_malformed_json_fails_without_writes() {
        let store = data::populated_store().await;
        let before = store.export_document().unwrap();

        let result = store.import_json("{ not json ]");

        assert!(matches!(
            result,
            Err(ImportError::Parse(ParseError::Json(_)))
        ));
        assert_eq!(store.export_document().unwrap(), before);
    }

    #[tokio::test]
    async fn test_import_json_round_trip() {
        let store = data::populated_store().await;
        let content = serde_json::to_string(&store.export_document().unwrap()).unwrap();

        let restored = data::empty_store();
        restored.import_json(&content).unwrap();

        assert_eq!(
            restored.export_document().unwrap(),
            store.export_document().unwrap()
        );
    }

    #[tokio::test]
    async fn test_wire_field_names() {
        let store = data::populated_store().await;
        let content = serde_json::to_string(&store.export_document().unwrap()).unwrap();

        for field in [
            "\"workouts\"",
            "\"exercises\"",
            "\"progressions\"",
            "\"workoutExercises\"",
            "\"sets\"",
            "\"createdAt\"",
            "\"isCustom\"",
            "\"exerciseId\"",
            "\"prevProgressionId\"",
            "\"nextProgressionId\"",
            "\"workoutId\"",
            "\"progressionId\"",
            "\"timeSeconds\"",
            "\"workoutExerciseId\"",
            "\"setNumber\"",
            "\"completedAt\"",
        ] {
            assert!(content.contains(field), "missing {field}");
        }
    }

    #[tokio::test]
    async fn test_export_to_path_writes_file() {
        let store = data::populated_store().await;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("backup.json");

        store.export_to_path(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let document: StoreDocument = serde_json::from_str(&content).unwrap();
        assert_eq!(document, store.export_document().unwrap());
    }

    #[tokio::test]
    async fn test_imported_custom_exercise_is_readable() {
        let store = data::empty_store();
        store
            .import_json(
                r#"{"exercises": [{"id": 7, "name": "Muscle-up", "category": "pull-ups",
                    "subtype": "dynamic", "isCustom": true}]}"#,
            )
            .unwrap();

        let exercise = store.read_exercise(7.into()).await.unwrap().unwrap();
        assert_eq!(exercise.name, domain::Name::new("Muscle-up").unwrap());
        assert!(exercise.is_custom);
    }
}
