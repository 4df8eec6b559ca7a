use std::{
    path::Path,
    sync::{Mutex, MutexGuard},
};

use chrono::{DateTime, Utc};
use log::debug;
use rusqlite::{Connection, OptionalExtension, Transaction, params, types::Type};
use strum::AsRefStr;

use kalos_domain as domain;

/// Embedded single-writer store backed by SQLite. All mutations run inside
/// the connection's transaction scope; the mutex serializes access so that
/// multi-statement operations never interleave.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

#[derive(AsRefStr, Clone, Copy)]
pub(crate) enum Table {
    #[strum(serialize = "workouts")]
    Workouts,
    #[strum(serialize = "exercises")]
    Exercises,
    #[strum(serialize = "progressions")]
    Progressions,
    #[strum(serialize = "workout_exercises")]
    WorkoutExercises,
    #[strum(serialize = "sets")]
    Sets,
}

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS workouts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    created_at TEXT NOT NULL,
    goal TEXT NOT NULL DEFAULT '',
    comments TEXT NOT NULL DEFAULT ''
);
CREATE TABLE IF NOT EXISTS exercises (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    category TEXT NOT NULL DEFAULT '',
    subtype TEXT NOT NULL DEFAULT '',
    is_custom INTEGER NOT NULL DEFAULT 0
);
CREATE TABLE IF NOT EXISTS progressions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    exercise_id INTEGER NOT NULL,
    name TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    goal TEXT NOT NULL DEFAULT '',
    difficulty INTEGER NOT NULL,
    prev_progression_id INTEGER,
    next_progression_id INTEGER
);
CREATE TABLE IF NOT EXISTS workout_exercises (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    workout_id INTEGER NOT NULL,
    exercise_id INTEGER NOT NULL,
    progression_id INTEGER,
    reps INTEGER NOT NULL DEFAULT 0,
    sets INTEGER NOT NULL DEFAULT 1,
    time_seconds INTEGER NOT NULL DEFAULT 0,
    weight REAL,
    notes TEXT NOT NULL DEFAULT ''
);
CREATE TABLE IF NOT EXISTS sets (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    workout_exercise_id INTEGER NOT NULL,
    set_number INTEGER NOT NULL,
    completed INTEGER NOT NULL,
    completed_at TEXT
);
";

impl SqliteStore {
    /// Opens (or creates) the store at the given path and ensures the
    /// schema exists. A store that cannot be opened is fatal.
    pub fn open(path: &Path) -> Result<Self, domain::StorageError> {
        let conn = Connection::open(path)
            .map_err(|err| domain::StorageError::Unavailable(err.to_string()))?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.ensure_schema()?;
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self, domain::StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|err| domain::StorageError::Unavailable(err.to_string()))?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.ensure_schema()?;
        Ok(store)
    }

    /// Creates all tables if absent. Idempotent; never drops or alters
    /// existing tables and never seeds data.
    pub fn ensure_schema(&self) -> Result<(), domain::StorageError> {
        self.lock()?
            .execute_batch(SCHEMA)
            .map_err(|err| domain::StorageError::Unavailable(err.to_string()))?;
        debug!("schema ensured");
        Ok(())
    }

    /// Inserts the built-in exercise catalog, keyed by the catalog's stable
    /// IDs. Existing rows, including user edits to built-ins, are left
    /// untouched; calling this again is a no-op.
    pub fn ensure_builtins(&self) -> Result<(), domain::StorageError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction().map_err(storage)?;
        let mut inserted = 0;

        for exercise in &domain::catalog::EXERCISES {
            inserted += tx
                .execute(
                    "INSERT OR IGNORE INTO exercises (id, name, category, subtype, is_custom)
                     VALUES (?1, ?2, ?3, ?4, 0)",
                    params![
                        exercise.id,
                        exercise.name,
                        exercise.category,
                        exercise.subtype
                    ],
                )
                .map_err(storage)?;

            for (position, progression) in exercise.progressions.iter().enumerate() {
                let prev = (position > 0).then(|| exercise.progressions[position - 1].id);
                let next = exercise.progressions.get(position + 1).map(|p| p.id);
                inserted += tx
                    .execute(
                        "INSERT OR IGNORE INTO progressions
                         (id, exercise_id, name, description, goal, difficulty,
                          prev_progression_id, next_progression_id)
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                        params![
                            progression.id,
                            exercise.id,
                            progression.name,
                            progression.description,
                            progression.goal,
                            progression.difficulty,
                            prev,
                            next
                        ],
                    )
                    .map_err(storage)?;
            }
        }

        tx.commit().map_err(storage)?;
        debug!("builtins ensured, {inserted} rows inserted");
        Ok(())
    }

    pub fn close(self) -> Result<(), domain::StorageError> {
        let conn = self
            .conn
            .into_inner()
            .map_err(|_| domain::StorageError::Unavailable("store lock poisoned".into()))?;
        conn.close().map_err(|(_, err)| storage(err))
    }

    pub(crate) fn lock(&self) -> Result<MutexGuard<'_, Connection>, domain::StorageError> {
        self.conn
            .lock()
            .map_err(|_| domain::StorageError::Unavailable("store lock poisoned".into()))
    }
}

pub(crate) fn storage(err: rusqlite::Error) -> domain::StorageError {
    domain::StorageError::Other(Box::new(err))
}

fn exists(tx: &Transaction, table: Table, id: i64) -> Result<bool, rusqlite::Error> {
    tx.query_row(
        &format!(
            "SELECT EXISTS (SELECT 1 FROM {} WHERE id = ?1)",
            table.as_ref()
        ),
        [id],
        |row| row.get(0),
    )
}

fn conversion_failure(
    index: usize,
    ty: Type,
    err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(index, ty, Box::new(err))
}

pub(crate) fn name_from_sql(index: usize, value: &str) -> rusqlite::Result<domain::Name> {
    domain::Name::new(value).map_err(|err| conversion_failure(index, Type::Text, err))
}

pub(crate) fn datetime_from_sql(index: usize, value: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|datetime| datetime.with_timezone(&Utc))
        .map_err(|err| conversion_failure(index, Type::Text, err))
}

fn u32_from_sql(index: usize, value: i64) -> rusqlite::Result<u32> {
    u32::try_from(value).map_err(|err| conversion_failure(index, Type::Integer, err))
}

fn workout_from_row(row: &rusqlite::Row) -> rusqlite::Result<domain::Workout> {
    Ok(domain::Workout {
        id: row.get::<_, i64>(0)?.into(),
        name: name_from_sql(1, &row.get::<_, String>(1)?)?,
        created_at: datetime_from_sql(2, &row.get::<_, String>(2)?)?,
        goal: row.get(3)?,
        comments: row.get(4)?,
    })
}

fn exercise_from_row(row: &rusqlite::Row) -> rusqlite::Result<domain::Exercise> {
    Ok(domain::Exercise {
        id: row.get::<_, i64>(0)?.into(),
        name: name_from_sql(1, &row.get::<_, String>(1)?)?,
        category: row.get(2)?,
        subtype: row.get(3)?,
        is_custom: row.get(4)?,
    })
}

fn progression_from_row(row: &rusqlite::Row) -> rusqlite::Result<domain::Progression> {
    let difficulty = u8::try_from(row.get::<_, i64>(5)?)
        .map_err(|err| conversion_failure(5, Type::Integer, err))?;
    Ok(domain::Progression {
        id: row.get::<_, i64>(0)?.into(),
        exercise_id: row.get::<_, i64>(1)?.into(),
        name: name_from_sql(2, &row.get::<_, String>(2)?)?,
        description: row.get(3)?,
        goal: row.get(4)?,
        difficulty: domain::Difficulty::new(difficulty)
            .map_err(|err| conversion_failure(5, Type::Integer, err))?,
        prev_progression_id: row.get::<_, Option<i64>>(6)?.map(Into::into),
        next_progression_id: row.get::<_, Option<i64>>(7)?.map(Into::into),
    })
}

fn workout_exercise_from_row(row: &rusqlite::Row) -> rusqlite::Result<domain::WorkoutExercise> {
    #[allow(clippy::cast_possible_truncation)]
    let weight = row
        .get::<_, Option<f64>>(7)?
        .map(|value| {
            domain::Weight::new(value as f32)
                .map_err(|err| conversion_failure(7, Type::Real, err))
        })
        .transpose()?;
    Ok(domain::WorkoutExercise {
        id: row.get::<_, i64>(0)?.into(),
        workout_id: row.get::<_, i64>(1)?.into(),
        exercise_id: row.get::<_, i64>(2)?.into(),
        progression_id: row.get::<_, Option<i64>>(3)?.map(Into::into),
        reps: domain::Reps::new(u32_from_sql(4, row.get(4)?)?)
            .map_err(|err| conversion_failure(4, Type::Integer, err))?,
        sets: domain::Sets::new(u32_from_sql(5, row.get(5)?)?)
            .map_err(|err| conversion_failure(5, Type::Integer, err))?,
        time: domain::Time::new(u32_from_sql(6, row.get(6)?)?)
            .map_err(|err| conversion_failure(6, Type::Integer, err))?,
        weight,
        notes: row.get(8)?,
    })
}

fn set_record_from_row(row: &rusqlite::Row) -> rusqlite::Result<domain::SetRecord> {
    Ok(domain::SetRecord {
        id: row.get::<_, i64>(0)?.into(),
        workout_exercise_id: row.get::<_, i64>(1)?.into(),
        set_number: u32_from_sql(2, row.get(2)?)?,
        completed: row.get(3)?,
        completed_at: row
            .get::<_, Option<String>>(4)?
            .map(|value| datetime_from_sql(4, &value))
            .transpose()?,
    })
}

impl domain::ExerciseRepository for SqliteStore {
    async fn read_exercises(
        &self,
        filter: &domain::ExerciseFilter,
    ) -> Result<Vec<domain::Exercise>, domain::ReadError> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare("SELECT id, name, category, subtype, is_custom FROM exercises ORDER BY id")
            .map_err(storage)?;
        let exercises = stmt
            .query_map([], exercise_from_row)
            .map_err(storage)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(storage)?;
        Ok(exercises
            .into_iter()
            .filter(|exercise| filter.matches(exercise))
            .collect())
    }

    async fn read_exercise(
        &self,
        id: domain::ExerciseID,
    ) -> Result<Option<domain::Exercise>, domain::ReadError> {
        let conn = self.lock()?;
        conn.query_row(
            "SELECT id, name, category, subtype, is_custom FROM exercises WHERE id = ?1",
            [*id],
            exercise_from_row,
        )
        .optional()
        .map_err(storage)
        .map_err(Into::into)
    }

    async fn create_exercise(
        &self,
        name: domain::Name,
        category: String,
        subtype: String,
    ) -> Result<domain::Exercise, domain::CreateError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO exercises (name, category, subtype, is_custom) VALUES (?1, ?2, ?3, 1)",
            params![name.as_ref(), category, subtype],
        )
        .map_err(storage)?;
        Ok(domain::Exercise {
            id: conn.last_insert_rowid().into(),
            name,
            category,
            subtype,
            is_custom: true,
        })
    }

    async fn replace_exercise(
        &self,
        exercise: domain::Exercise,
    ) -> Result<usize, domain::UpdateError> {
        let conn = self.lock()?;
        conn.execute(
            "UPDATE exercises SET name = ?2, category = ?3, subtype = ?4, is_custom = ?5
             WHERE id = ?1",
            params![
                *exercise.id,
                exercise.name.as_ref(),
                exercise.category,
                exercise.subtype,
                exercise.is_custom
            ],
        )
        .map_err(storage)
        .map_err(Into::into)
    }

    async fn delete_exercise(&self, id: domain::ExerciseID) -> Result<usize, domain::DeleteError> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM exercises WHERE id = ?1", [*id])
            .map_err(storage)
            .map_err(Into::into)
    }
}

impl domain::ProgressionRepository for SqliteStore {
    async fn read_progressions(
        &self,
        exercise_id: domain::ExerciseID,
    ) -> Result<Vec<domain::Progression>, domain::ReadError> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, exercise_id, name, description, goal, difficulty,
                        prev_progression_id, next_progression_id
                 FROM progressions WHERE exercise_id = ?1 ORDER BY difficulty ASC",
            )
            .map_err(storage)?;
        let progressions = stmt
            .query_map([*exercise_id], progression_from_row)
            .map_err(storage)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(storage)?;
        Ok(progressions)
    }

    async fn create_progression(
        &self,
        progression: domain::Progression,
    ) -> Result<domain::Progression, domain::CreateError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction().map_err(storage)?;
        if !exists(&tx, Table::Exercises, *progression.exercise_id).map_err(storage)? {
            return Err(domain::CreateError::MissingParent("exercise"));
        }
        tx.execute(
            "INSERT INTO progressions
             (exercise_id, name, description, goal, difficulty,
              prev_progression_id, next_progression_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                *progression.exercise_id,
                progression.name.as_ref(),
                progression.description,
                progression.goal,
                u8::from(progression.difficulty),
                progression.prev_progression_id.map(|id| *id),
                progression.next_progression_id.map(|id| *id)
            ],
        )
        .map_err(storage)?;
        let id = tx.last_insert_rowid();
        tx.commit().map_err(storage)?;
        Ok(domain::Progression {
            id: id.into(),
            ..progression
        })
    }

    async fn replace_progression(
        &self,
        progression: domain::Progression,
    ) -> Result<usize, domain::UpdateError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction().map_err(storage)?;
        if !exists(&tx, Table::Exercises, *progression.exercise_id).map_err(storage)? {
            return Err(domain::UpdateError::MissingParent("exercise"));
        }
        let rows = tx
            .execute(
                "UPDATE progressions
                 SET exercise_id = ?2, name = ?3, description = ?4, goal = ?5, difficulty = ?6,
                     prev_progression_id = ?7, next_progression_id = ?8
                 WHERE id = ?1",
                params![
                    *progression.id,
                    *progression.exercise_id,
                    progression.name.as_ref(),
                    progression.description,
                    progression.goal,
                    u8::from(progression.difficulty),
                    progression.prev_progression_id.map(|id| *id),
                    progression.next_progression_id.map(|id| *id)
                ],
            )
            .map_err(storage)?;
        tx.commit().map_err(storage)?;
        Ok(rows)
    }

    async fn delete_progression(
        &self,
        id: domain::ProgressionID,
    ) -> Result<usize, domain::DeleteError> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM progressions WHERE id = ?1", [*id])
            .map_err(storage)
            .map_err(Into::into)
    }
}

impl domain::WorkoutRepository for SqliteStore {
    async fn read_workouts(&self) -> Result<Vec<domain::Workout>, domain::ReadError> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, name, created_at, goal, comments FROM workouts
                 ORDER BY created_at DESC",
            )
            .map_err(storage)?;
        let workouts = stmt
            .query_map([], workout_from_row)
            .map_err(storage)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(storage)?;
        Ok(workouts)
    }

    async fn read_workout(
        &self,
        id: domain::WorkoutID,
    ) -> Result<Option<domain::Workout>, domain::ReadError> {
        let conn = self.lock()?;
        conn.query_row(
            "SELECT id, name, created_at, goal, comments FROM workouts WHERE id = ?1",
            [*id],
            workout_from_row,
        )
        .optional()
        .map_err(storage)
        .map_err(Into::into)
    }

    async fn create_workout(
        &self,
        name: domain::Name,
        goal: String,
        comments: String,
    ) -> Result<domain::Workout, domain::CreateError> {
        let created_at = Utc::now();
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO workouts (name, created_at, goal, comments) VALUES (?1, ?2, ?3, ?4)",
            params![name.as_ref(), created_at.to_rfc3339(), goal, comments],
        )
        .map_err(storage)?;
        Ok(domain::Workout {
            id: conn.last_insert_rowid().into(),
            name,
            created_at,
            goal,
            comments,
        })
    }

    async fn modify_workout(
        &self,
        id: domain::WorkoutID,
        name: Option<domain::Name>,
        goal: Option<String>,
        comments: Option<String>,
    ) -> Result<usize, domain::UpdateError> {
        let conn = self.lock()?;
        conn.execute(
            "UPDATE workouts
             SET name = COALESCE(?2, name),
                 goal = COALESCE(?3, goal),
                 comments = COALESCE(?4, comments)
             WHERE id = ?1",
            params![*id, name.map(|n| n.as_ref().to_string()), goal, comments],
        )
        .map_err(storage)
        .map_err(Into::into)
    }

    async fn delete_workout(&self, id: domain::WorkoutID) -> Result<usize, domain::DeleteError> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM workouts WHERE id = ?1", [*id])
            .map_err(storage)
            .map_err(Into::into)
    }
}

impl domain::WorkoutExerciseRepository for SqliteStore {
    async fn read_workout_exercises(
        &self,
        workout_id: domain::WorkoutID,
    ) -> Result<Vec<domain::WorkoutExerciseEntry>, domain::ReadError> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(
                "SELECT we.id, we.workout_id, we.exercise_id, we.progression_id, we.reps,
                        we.sets, we.time_seconds, we.weight, we.notes, e.name
                 FROM workout_exercises we
                 LEFT JOIN exercises e ON we.exercise_id = e.id
                 WHERE we.workout_id = ?1
                 ORDER BY we.id",
            )
            .map_err(storage)?;
        let entries = stmt
            .query_map([*workout_id], |row| {
                Ok(domain::WorkoutExerciseEntry {
                    workout_exercise: workout_exercise_from_row(row)?,
                    exercise_name: row.get(9)?,
                })
            })
            .map_err(storage)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(storage)?;
        Ok(entries)
    }

    async fn create_workout_exercise(
        &self,
        workout_exercise: domain::WorkoutExercise,
    ) -> Result<domain::WorkoutExercise, domain::CreateError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction().map_err(storage)?;
        if !exists(&tx, Table::Workouts, *workout_exercise.workout_id).map_err(storage)? {
            return Err(domain::CreateError::MissingParent("workout"));
        }
        if !exists(&tx, Table::Exercises, *workout_exercise.exercise_id).map_err(storage)? {
            return Err(domain::CreateError::MissingParent("exercise"));
        }
        tx.execute(
            "INSERT INTO workout_exercises
             (workout_id, exercise_id, progression_id, reps, sets, time_seconds, weight, notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                *workout_exercise.workout_id,
                *workout_exercise.exercise_id,
                workout_exercise.progression_id.map(|id| *id),
                u32::from(workout_exercise.reps),
                u32::from(workout_exercise.sets),
                u32::from(workout_exercise.time),
                workout_exercise.weight.map(f32::from),
                workout_exercise.notes
            ],
        )
        .map_err(storage)?;
        let id = tx.last_insert_rowid();
        tx.commit().map_err(storage)?;
        Ok(domain::WorkoutExercise {
            id: id.into(),
            ..workout_exercise
        })
    }

    async fn replace_workout_exercise(
        &self,
        workout_exercise: domain::WorkoutExercise,
    ) -> Result<usize, domain::UpdateError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction().map_err(storage)?;
        if !exists(&tx, Table::Workouts, *workout_exercise.workout_id).map_err(storage)? {
            return Err(domain::UpdateError::MissingParent("workout"));
        }
        if !exists(&tx, Table::Exercises, *workout_exercise.exercise_id).map_err(storage)? {
            return Err(domain::UpdateError::MissingParent("exercise"));
        }
        let rows = tx
            .execute(
                "UPDATE workout_exercises
                 SET workout_id = ?2, exercise_id = ?3, progression_id = ?4, reps = ?5,
                     sets = ?6, time_seconds = ?7, weight = ?8, notes = ?9
                 WHERE id = ?1",
                params![
                    *workout_exercise.id,
                    *workout_exercise.workout_id,
                    *workout_exercise.exercise_id,
                    workout_exercise.progression_id.map(|id| *id),
                    u32::from(workout_exercise.reps),
                    u32::from(workout_exercise.sets),
                    u32::from(workout_exercise.time),
                    workout_exercise.weight.map(f32::from),
                    workout_exercise.notes
                ],
            )
            .map_err(storage)?;
        tx.commit().map_err(storage)?;
        Ok(rows)
    }

    async fn delete_workout_exercise(
        &self,
        id: domain::WorkoutExerciseID,
    ) -> Result<usize, domain::DeleteError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction().map_err(storage)?;
        tx.execute("DELETE FROM sets WHERE workout_exercise_id = ?1", [*id])
            .map_err(storage)?;
        let rows = tx
            .execute("DELETE FROM workout_exercises WHERE id = ?1", [*id])
            .map_err(storage)?;
        tx.commit().map_err(storage)?;
        Ok(rows)
    }

    async fn increment_planned_sets(
        &self,
        id: domain::WorkoutExerciseID,
    ) -> Result<usize, domain::UpdateError> {
        let conn = self.lock()?;
        conn.execute(
            "UPDATE workout_exercises SET sets = sets + 1 WHERE id = ?1",
            [*id],
        )
        .map_err(storage)
        .map_err(Into::into)
    }
}

impl domain::SessionRepository for SqliteStore {
    async fn read_set_records(
        &self,
        workout_exercise_id: domain::WorkoutExerciseID,
    ) -> Result<Vec<domain::SetRecord>, domain::ReadError> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, workout_exercise_id, set_number, completed, completed_at
                 FROM sets WHERE workout_exercise_id = ?1 ORDER BY id",
            )
            .map_err(storage)?;
        let records = stmt
            .query_map([*workout_exercise_id], set_record_from_row)
            .map_err(storage)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(storage)?;
        Ok(records)
    }

    async fn complete_set(
        &self,
        workout_exercise_id: domain::WorkoutExerciseID,
        set_number: u32,
    ) -> Result<domain::SetRecord, domain::CreateError> {
        let completed_at = Utc::now();
        let mut conn = self.lock()?;
        let tx = conn.transaction().map_err(storage)?;
        if !exists(&tx, Table::WorkoutExercises, *workout_exercise_id).map_err(storage)? {
            return Err(domain::CreateError::MissingParent("workout exercise"));
        }
        tx.execute(
            "INSERT INTO sets (workout_exercise_id, set_number, completed, completed_at)
             VALUES (?1, ?2, 1, ?3)",
            params![*workout_exercise_id, set_number, completed_at.to_rfc3339()],
        )
        .map_err(storage)?;
        let id = tx.last_insert_rowid();
        tx.commit().map_err(storage)?;
        Ok(domain::SetRecord {
            id: id.into(),
            workout_exercise_id,
            set_number,
            completed: true,
            completed_at: Some(completed_at),
        })
    }
}
