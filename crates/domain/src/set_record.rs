use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use derive_more::Deref;

use crate::{CreateError, Name, ReadError, WorkoutExerciseID};

#[allow(async_fn_in_trait)]
pub trait SessionRepository {
    async fn read_set_records(
        &self,
        workout_exercise_id: WorkoutExerciseID,
    ) -> Result<Vec<SetRecord>, ReadError>;
    /// Logs the completion of one set. Every call appends a new record, so
    /// repeat completions of the same set number are preserved as history;
    /// deduplication is the live session's responsibility.
    async fn complete_set(
        &self,
        workout_exercise_id: WorkoutExerciseID,
        set_number: u32,
    ) -> Result<SetRecord, CreateError>;
}

#[allow(async_fn_in_trait)]
pub trait SessionService {
    async fn get_set_records(
        &self,
        workout_exercise_id: WorkoutExerciseID,
    ) -> Result<Vec<SetRecord>, ReadError>;
    async fn complete_set(
        &self,
        workout_exercise_id: WorkoutExerciseID,
        set_number: u32,
    ) -> Result<SetRecord, CreateError>;
}

/// A logged completion of one set within a planned exercise block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetRecord {
    pub id: SetRecordID,
    pub workout_exercise_id: WorkoutExerciseID,
    pub set_number: u32,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct SetRecordID(i64);

impl SetRecordID {
    #[must_use]
    pub fn nil() -> Self {
        Self(0)
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0 == 0
    }
}

impl From<i64> for SetRecordID {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// The set numbers already completed for a block, in ascending order.
#[must_use]
pub fn completed_set_numbers(records: &[SetRecord]) -> BTreeSet<u32> {
    records
        .iter()
        .filter(|r| r.completed)
        .map(|r| r.set_number)
        .collect()
}

/// Summary of a finished session as handed to the platform health sync.
/// Duration and calories are estimated by the caller, not the store.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub name: Name,
    pub duration_seconds: u32,
    pub calories_estimate: u32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn record(id: i64, set_number: u32, completed: bool) -> SetRecord {
        SetRecord {
            id: id.into(),
            workout_exercise_id: 1.into(),
            set_number,
            completed,
            completed_at: completed.then(Utc::now),
        }
    }

    #[test]
    fn test_completed_set_numbers() {
        assert_eq!(
            completed_set_numbers(&[
                record(1, 2, true),
                record(2, 1, true),
                record(3, 3, false),
                record(4, 2, true),
            ]),
            BTreeSet::from([1, 2])
        );
    }

    #[test]
    fn test_completed_set_numbers_empty() {
        assert_eq!(completed_set_numbers(&[]), BTreeSet::new());
    }
}
