use kalos_domain as domain;
use kalos_domain::{
    ExerciseRepository, SessionRepository, WorkoutExerciseRepository, WorkoutRepository,
};

use crate::SqliteStore;

pub fn empty_store() -> SqliteStore {
    SqliteStore::open_in_memory().unwrap()
}

pub fn seeded_store() -> SqliteStore {
    let store = empty_store();
    store.ensure_builtins().unwrap();
    store
}

pub fn workout_exercise(
    workout_id: domain::WorkoutID,
    exercise_id: domain::ExerciseID,
) -> domain::WorkoutExercise {
    domain::WorkoutExercise {
        id: domain::WorkoutExerciseID::nil(),
        workout_id,
        exercise_id,
        progression_id: None,
        reps: domain::Reps::new(10).unwrap(),
        sets: domain::Sets::new(3).unwrap(),
        time: domain::Time::new(0).unwrap(),
        weight: Some(domain::Weight::new(12.5).unwrap()),
        notes: "slow tempo".to_string(),
    }
}

/// Seeded store with one workout containing one custom-exercise block and
/// one completed set.
pub async fn populated_store() -> SqliteStore {
    let store = seeded_store();
    let workout = store
        .create_workout(
            domain::Name::new("Push Day").unwrap(),
            "Strength".to_string(),
            "Focus on form".to_string(),
        )
        .await
        .unwrap();
    let exercise = store
        .create_exercise(
            domain::Name::new("Ring Row").unwrap(),
            "rows".to_string(),
            "dynamic".to_string(),
        )
        .await
        .unwrap();
    let block = store
        .create_workout_exercise(workout_exercise(workout.id, exercise.id))
        .await
        .unwrap();
    store.complete_set(block.id, 1).await.unwrap();
    store
}
