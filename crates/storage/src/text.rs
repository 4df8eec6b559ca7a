//! Human-readable text export and its best-effort reverse. Three dialects:
//! single workout, full workout history and the exercise library. The
//! format is line oriented and deliberately lossy; the JSON exchange in
//! [`crate::backup`] is the authoritative round-trip format.

use std::{collections::HashMap, fmt::Write as _};

use chrono::Utc;
use log::debug;
use rusqlite::{OptionalExtension, Transaction, params};

use kalos_domain as domain;

use crate::{
    ImportError, ParseError,
    sqlite::{SqliteStore, datetime_from_sql, storage},
};

struct EntryLine {
    exercise_name: Option<String>,
    progression_id: Option<i64>,
    sets: i64,
    reps: i64,
    time_seconds: i64,
    weight: Option<f64>,
    notes: String,
}

struct EntryDraft {
    exercise_name: String,
    progression_id: Option<i64>,
    sets: i64,
    reps: i64,
}

impl SqliteStore {
    /// Renders one workout as a text block headed by `# Workout: <name>`.
    pub fn export_workout_text(&self, id: domain::WorkoutID) -> Result<String, domain::ReadError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction().map_err(storage)?;

        let (name, created_at, goal, comments) = tx
            .query_row(
                "SELECT name, created_at, goal, comments FROM workouts WHERE id = ?1",
                [*id],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        datetime_from_sql(1, &row.get::<_, String>(1)?)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                    ))
                },
            )
            .optional()
            .map_err(storage)?
            .ok_or(domain::ReadError::NotFound)?;
        let entries = entry_lines(&tx, *id).map_err(storage)?;

        let mut content = String::new();
        let _ = writeln!(content, "# Workout: {name}");
        let _ = writeln!(content, "Date: {}", created_at.format("%Y-%m-%d"));
        let _ = writeln!(content, "Goal: {goal}");
        let _ = writeln!(content, "Comments: {comments}");
        for entry in &entries {
            push_entry(&mut content, entry);
        }
        content.push('\n');
        Ok(content)
    }

    /// Renders every workout, newest first is not guaranteed; blocks appear
    /// in creation order under a `# Workout History` banner.
    pub fn export_history_text(&self) -> Result<String, domain::ReadError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction().map_err(storage)?;

        let workouts = tx
            .prepare("SELECT id, name, created_at, goal, comments FROM workouts ORDER BY id")
            .map_err(storage)?
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    datetime_from_sql(2, &row.get::<_, String>(2)?)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                ))
            })
            .map_err(storage)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(storage)?;

        let mut content = String::from("# Workout History\n\n");
        for (id, name, created_at, goal, comments) in workouts {
            let _ = writeln!(content, "Workout: {name} - {}", created_at.format("%Y-%m-%d"));
            content.push_str("-------------------------------\n");
            let _ = writeln!(content, "Goal: {goal}");
            let _ = writeln!(content, "Comments: {comments}");
            for entry in entry_lines(&tx, id).map_err(storage)? {
                push_entry(&mut content, &entry);
            }
            content.push('\n');
        }
        Ok(content)
    }

    /// Renders the exercise library with each exercise's progressions.
    pub fn export_library_text(&self) -> Result<String, domain::ReadError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction().map_err(storage)?;

        let exercises = tx
            .prepare("SELECT id, name, category, subtype, is_custom FROM exercises ORDER BY id")
            .map_err(storage)?
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, bool>(4)?,
                ))
            })
            .map_err(storage)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(storage)?;

        let mut content = String::from("# Exercise Database\n\n");
        for (id, name, category, subtype, is_custom) in exercises {
            let _ = writeln!(content, "Exercise: {name}");
            let _ = writeln!(content, "Category: {category}");
            let _ = writeln!(content, "Subtype: {subtype}");
            let _ = writeln!(content, "Custom: {}", if is_custom { "Yes" } else { "No" });

            let progressions = tx
                .prepare(
                    "SELECT name, description, goal, difficulty FROM progressions
                     WHERE exercise_id = ?1 ORDER BY difficulty ASC",
                )
                .map_err(storage)?
                .query_map([id], |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, i64>(3)?,
                    ))
                })
                .map_err(storage)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(storage)?;
            for (name, description, goal, difficulty) in progressions {
                let _ = writeln!(content, "  - {name} (Goal: {goal}, Difficulty: {difficulty}/10)");
                let _ = writeln!(content, "    {description}");
            }
            content.push('\n');
        }
        Ok(content)
    }

    /// Imports workouts from the single-workout text dialect. Blocks are
    /// split on the `# Workout:` header; exercises are resolved by
    /// normalized name and created as custom exercises when absent. Only
    /// `Sets:` and `Reps:` are recovered per block line; time, weight and
    /// notes are not round-tripped. Atomic: either every block is imported
    /// or none is.
    pub fn import_workouts_text(&self, content: &str) -> Result<Vec<domain::Workout>, ImportError> {
        let mut conn = self.lock().map_err(ImportError::Storage)?;
        let tx = conn.transaction().map_err(storage)?;
        let mut index = exercise_index(&tx).map_err(storage)?;
        let mut imported = vec![];

        for block in content.split("# Workout:").skip(1) {
            let lines = block.lines().map(str::trim).collect::<Vec<_>>();
            let name = domain::Name::new(lines.first().copied().unwrap_or_default())
                .map_err(ParseError::Name)?;
            let goal = metadata_value(&lines, "Goal:");
            let comments = metadata_value(&lines, "Comments:");
            let created_at = Utc::now();

            tx.execute(
                "INSERT INTO workouts (name, created_at, goal, comments) VALUES (?1, ?2, ?3, ?4)",
                params![name.as_ref(), created_at.to_rfc3339(), goal, comments],
            )
            .map_err(storage)?;
            let workout_id = tx.last_insert_rowid();

            for entry in parse_entries(&lines) {
                let Ok(exercise_name) = domain::Name::new(&entry.exercise_name) else {
                    continue;
                };
                let exercise_id =
                    resolve_exercise(&tx, &mut index, &exercise_name).map_err(storage)?;
                tx.execute(
                    "INSERT INTO workout_exercises
                     (workout_id, exercise_id, progression_id, reps, sets,
                      time_seconds, weight, notes)
                     VALUES (?1, ?2, ?3, ?4, ?5, 0, NULL, '')",
                    params![
                        workout_id,
                        exercise_id,
                        entry.progression_id,
                        entry.reps,
                        entry.sets
                    ],
                )
                .map_err(storage)?;
            }

            imported.push(domain::Workout {
                id: workout_id.into(),
                name,
                created_at,
                goal,
                comments,
            });
        }

        tx.commit().map_err(storage)?;
        debug!("imported {} workouts from text", imported.len());
        Ok(imported)
    }

    /// Imports custom exercises from the library text dialect. Exercises
    /// whose normalized name already exists are left untouched.
    pub fn import_exercises_text(
        &self,
        content: &str,
    ) -> Result<Vec<domain::Exercise>, ImportError> {
        let mut conn = self.lock().map_err(ImportError::Storage)?;
        let tx = conn.transaction().map_err(storage)?;
        let mut index = exercise_index(&tx).map_err(storage)?;
        let mut imported = vec![];

        for block in content.split("Exercise:").skip(1) {
            let lines = block.lines().map(str::trim).collect::<Vec<_>>();
            let name = domain::Name::new(lines.first().copied().unwrap_or_default())
                .map_err(ParseError::Name)?;
            if index.contains_key(&name.normalized()) {
                continue;
            }
            let category = metadata_value(&lines, "Category:");
            let subtype = metadata_value(&lines, "Subtype:");

            tx.execute(
                "INSERT INTO exercises (name, category, subtype, is_custom) VALUES (?1, ?2, ?3, 1)",
                params![name.as_ref(), category, subtype],
            )
            .map_err(storage)?;
            let id = tx.last_insert_rowid();
            index.insert(name.normalized(), id);

            imported.push(domain::Exercise {
                id: id.into(),
                name,
                category,
                subtype,
                is_custom: true,
            });
        }

        tx.commit().map_err(storage)?;
        debug!("imported {} exercises from text", imported.len());
        Ok(imported)
    }
}

fn entry_lines(tx: &Transaction, workout_id: i64) -> rusqlite::Result<Vec<EntryLine>> {
    tx.prepare(
        "SELECT e.name, we.progression_id, we.sets, we.reps, we.time_seconds, we.weight, we.notes
         FROM workout_exercises we
         LEFT JOIN exercises e ON we.exercise_id = e.id
         WHERE we.workout_id = ?1
         ORDER BY we.id",
    )?
    .query_map([workout_id], |row| {
        Ok(EntryLine {
            exercise_name: row.get(0)?,
            progression_id: row.get(1)?,
            sets: row.get(2)?,
            reps: row.get(3)?,
            time_seconds: row.get(4)?,
            weight: row.get(5)?,
            notes: row.get(6)?,
        })
    })?
    .collect()
}

fn push_entry(content: &mut String, entry: &EntryLine) {
    let _ = writeln!(
        content,
        "- {} - Progression: {}",
        entry.exercise_name.as_deref().unwrap_or_default(),
        entry.progression_id.map(|id| id.to_string()).unwrap_or_default()
    );
    let _ = writeln!(content, "  Sets: {}", entry.sets);
    let _ = writeln!(content, "  Reps: {}", entry.reps);
    let _ = writeln!(
        content,
        "  Time: {}",
        if entry.time_seconds > 0 {
            entry.time_seconds.to_string()
        } else {
            String::new()
        }
    );
    let _ = writeln!(
        content,
        "  Weight: {}",
        entry.weight.map(|weight| weight.to_string()).unwrap_or_default()
    );
    let _ = writeln!(content, "  Notes: {}", entry.notes);
}

fn metadata_value(lines: &[&str], prefix: &str) -> String {
    lines
        .iter()
        .find_map(|line| line.strip_prefix(prefix))
        .map(str::trim)
        .unwrap_or_default()
        .to_string()
}

fn parse_entries(lines: &[&str]) -> Vec<EntryDraft> {
    let mut entries: Vec<EntryDraft> = vec![];

    for line in lines {
        if let Some(rest) = line.strip_prefix("- ") {
            let (name, progression) = rest.split_once(" - Progression: ").unwrap_or((rest, ""));
            entries.push(EntryDraft {
                exercise_name: name.trim().to_string(),
                progression_id: progression.trim().parse().ok(),
                sets: 1,
                reps: 0,
            });
        } else if let Some(value) = line.strip_prefix("Sets:") {
            if let (Some(entry), Ok(sets)) = (entries.last_mut(), value.trim().parse::<i64>()) {
                if sets >= 1 {
                    entry.sets = sets;
                }
            }
        } else if let Some(value) = line.strip_prefix("Reps:") {
            if let (Some(entry), Ok(reps)) = (entries.last_mut(), value.trim().parse::<i64>()) {
                if reps >= 0 {
                    entry.reps = reps;
                }
            }
        }
    }

    entries
}

/// Normalized exercise name to id, lowest id winning on collisions.
fn exercise_index(tx: &Transaction) -> rusqlite::Result<HashMap<String, i64>> {
    let mut index = HashMap::new();
    for row in tx
        .prepare("SELECT id, name FROM exercises ORDER BY id")?
        .query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))?
    {
        let (id, name) = row?;
        index.entry(name.trim().to_lowercase()).or_insert(id);
    }
    Ok(index)
}

fn resolve_exercise(
    tx: &Transaction,
    index: &mut HashMap<String, i64>,
    name: &domain::Name,
) -> rusqlite::Result<i64> {
    if let Some(id) = index.get(&name.normalized()) {
        return Ok(*id);
    }
    tx.execute(
        "INSERT INTO exercises (name, category, subtype, is_custom) VALUES (?1, '', '', 1)",
        [name.as_ref()],
    )?;
    let id = tx.last_insert_rowid();
    index.insert(name.normalized(), id);
    Ok(id)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use kalos_domain::{ExerciseRepository, WorkoutExerciseRepository, WorkoutRepository};

    use crate::tests::data;

    use super::*;

    #[tokio::test]
    async fn test_export_workout_text() {
        let store = data::populated_store().await;
        let workout = store.read_workouts().await.unwrap().remove(0);

        let content = store.export_workout_text(workout.id).unwrap();

        let expected = format!(
            "# Workout: Push Day\n\
             Date: {}\n\
             Goal: Strength\n\
             Comments: Focus on form\n\
             - Ring Row - Progression: \n\
             \x20 Sets: 3\n\
             \x20 Reps: 10\n\
             \x20 Time: \n\
             \x20 Weight: 12.5\n\
             \x20 Notes: slow tempo\n\
             \n",
            workout.created_at.format("%Y-%m-%d")
        );
        assert_eq!(content, expected);
    }

    #[tokio::test]
    async fn test_export_workout_text_not_found() {
        let store = data::empty_store();
        assert!(matches!(
            store.export_workout_text(99.into()),
            Err(domain::ReadError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_export_history_text() {
        let store = data::populated_store().await;

        let content = store.export_history_text().unwrap();

        assert!(content.starts_with("# Workout History\n\n"));
        assert!(content.contains("Workout: Push Day - "));
        assert!(content.contains("-------------------------------\n"));
        assert!(content.contains("- Ring Row - Progression: \n"));
    }

    #[tokio::test]
    async fn test_export_library_text() {
        let store = data::seeded_store();

        let content = store.export_library_text().unwrap();

        assert!(content.starts_with("# Exercise Database\n\n"));
        assert!(content.contains("Exercise: Pull-up\nCategory: pull-ups\nSubtype: dynamic\nCustom: No\n"));
        assert!(content.contains("  - Negative Pull-up (Goal: strength, Difficulty: 2/10)\n"));
        assert!(content.contains("    Lowering phase only\n"));
    }

    #[tokio::test]
    async fn test_import_workouts_text_round_trip() {
        let store = data::populated_store().await;
        let workout = store.read_workouts().await.unwrap().remove(0);
        let content = store.export_workout_text(workout.id).unwrap();

        let restored = data::seeded_store();
        let imported = restored.import_workouts_text(&content).unwrap();

        assert_eq!(imported.len(), 1);
        assert_eq!(imported[0].name, domain::Name::new("Push Day").unwrap());
        assert_eq!(imported[0].goal, "Strength");
        assert_eq!(imported[0].comments, "Focus on form");

        let entries = restored
            .read_workout_exercises(imported[0].id)
            .await
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].exercise_name.as_deref(), Some("Ring Row"));
        assert_eq!(u32::from(entries[0].workout_exercise.sets), 3);
        assert_eq!(u32::from(entries[0].workout_exercise.reps), 10);

        let created = restored
            .read_exercises(&domain::ExerciseFilter {
                search: "ring row".to_string(),
                ..domain::ExerciseFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(created.len(), 1);
        assert!(created[0].is_custom);
    }

    #[tokio::test]
    async fn test_import_workouts_text_resolves_exercises_case_insensitively() {
        let store = data::empty_store();
        store
            .create_exercise(
                domain::Name::new("Ring Row").unwrap(),
                "rows".to_string(),
                "dynamic".to_string(),
            )
            .await
            .unwrap();

        store
            .import_workouts_text(
                "# Workout: Pull Day\nGoal: \nComments: \n- RING ROW - Progression: \n  Sets: 2\n  Reps: 8\n",
            )
            .unwrap();

        let exercises = store
            .read_exercises(&domain::ExerciseFilter::default())
            .await
            .unwrap();
        assert_eq!(exercises.len(), 1);
    }

    #[tokio::test]
    async fn test_import_workouts_text_without_name_fails_atomically() {
        let store = data::empty_store();

        let result = store.import_workouts_text("# Workout: \nGoal: x\n");

        assert!(matches!(
            result,
            Err(ImportError::Parse(ParseError::Name(_)))
        ));
        assert!(store.read_workouts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_import_exercises_text() {
        let store = data::empty_store();

        let imported = store
            .import_exercises_text(
                "# Exercise Database\n\n\
                 Exercise: Muscle-up\nCategory: pull-ups\nSubtype: dynamic\nCustom: No\n\n\
                 Exercise: Wall Sit\nCategory: legs\nSubtype: static\n\n",
            )
            .unwrap();

        assert_eq!(imported.len(), 2);
        assert!(imported.iter().all(|exercise| exercise.is_custom));
        assert_eq!(imported[0].category, "pull-ups");
        assert_eq!(imported[1].subtype, "static");
    }

    #[tokio::test]
    async fn test_import_exercises_text_skips_existing_names() {
        let store = data::seeded_store();

        let imported = store
            .import_exercises_text("Exercise: PULL-UP\nCategory: x\nSubtype: y\n")
            .unwrap();

        assert!(imported.is_empty());
        let matches = store
            .read_exercises(&domain::ExerciseFilter {
                search: "pull-up".to_string(),
                ..domain::ExerciseFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(
            matches
                .iter()
                .filter(|exercise| exercise.name.normalized() == "pull-up")
                .count(),
            1
        );
    }

    #[test]
    fn test_parse_entries() {
        let entries = parse_entries(&[
            "- Ring Row - Progression: 4",
            "Sets: 3",
            "Reps: 10",
            "Time: ",
            "Weight: ",
            "Notes: slow tempo",
            "- Wall Sit",
            "Sets: 0",
        ]);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].exercise_name, "Ring Row");
        assert_eq!(entries[0].progression_id, Some(4));
        assert_eq!(entries[0].sets, 3);
        assert_eq!(entries[0].reps, 10);
        assert_eq!(entries[1].exercise_name, "Wall Sit");
        assert_eq!(entries[1].progression_id, None);
        assert_eq!(entries[1].sets, 1);
        assert_eq!(entries[1].reps, 0);
    }
}
