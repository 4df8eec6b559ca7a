use chrono::{DateTime, Utc};
use derive_more::{Deref, Display, Into};

use crate::{
    CreateError, DeleteError, ExerciseID, Name, ProgressionID, ReadError, UpdateError,
};

#[allow(async_fn_in_trait)]
pub trait WorkoutRepository {
    /// All workouts, newest first.
    async fn read_workouts(&self) -> Result<Vec<Workout>, ReadError>;
    async fn read_workout(&self, id: WorkoutID) -> Result<Option<Workout>, ReadError>;
    async fn create_workout(
        &self,
        name: Name,
        goal: String,
        comments: String,
    ) -> Result<Workout, CreateError>;
    /// Updates the given fields in place. `created_at` is immutable.
    async fn modify_workout(
        &self,
        id: WorkoutID,
        name: Option<Name>,
        goal: Option<String>,
        comments: Option<String>,
    ) -> Result<usize, UpdateError>;
    async fn delete_workout(&self, id: WorkoutID) -> Result<usize, DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait WorkoutService {
    async fn get_workouts(&self) -> Result<Vec<Workout>, ReadError>;
    async fn get_workout(&self, id: WorkoutID) -> Result<Workout, ReadError>;
    async fn create_workout(
        &self,
        name: Name,
        goal: String,
        comments: String,
    ) -> Result<Workout, CreateError>;
    async fn modify_workout(
        &self,
        id: WorkoutID,
        name: Option<Name>,
        goal: Option<String>,
        comments: Option<String>,
    ) -> Result<usize, UpdateError>;
    async fn delete_workout(&self, id: WorkoutID) -> Result<usize, DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait WorkoutExerciseRepository {
    /// The planned blocks of a workout, each joined with the owning
    /// exercise's name. A missing exercise row yields a `None` name instead
    /// of dropping the block.
    async fn read_workout_exercises(
        &self,
        workout_id: WorkoutID,
    ) -> Result<Vec<WorkoutExerciseEntry>, ReadError>;
    async fn create_workout_exercise(
        &self,
        workout_exercise: WorkoutExercise,
    ) -> Result<WorkoutExercise, CreateError>;
    async fn replace_workout_exercise(
        &self,
        workout_exercise: WorkoutExercise,
    ) -> Result<usize, UpdateError>;
    /// Deletes the block and all its set records in one transaction.
    async fn delete_workout_exercise(&self, id: WorkoutExerciseID) -> Result<usize, DeleteError>;
    /// Adds one planned set as a single atomic update.
    async fn increment_planned_sets(&self, id: WorkoutExerciseID) -> Result<usize, UpdateError>;
}

#[allow(async_fn_in_trait)]
pub trait WorkoutExerciseService {
    async fn get_workout_exercises(
        &self,
        workout_id: WorkoutID,
    ) -> Result<Vec<WorkoutExerciseEntry>, ReadError>;
    async fn create_workout_exercise(
        &self,
        workout_exercise: WorkoutExercise,
    ) -> Result<WorkoutExercise, CreateError>;
    async fn replace_workout_exercise(
        &self,
        workout_exercise: WorkoutExercise,
    ) -> Result<usize, UpdateError>;
    async fn delete_workout_exercise(&self, id: WorkoutExerciseID) -> Result<usize, DeleteError>;
    async fn increment_planned_sets(&self, id: WorkoutExerciseID) -> Result<usize, UpdateError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workout {
    pub id: WorkoutID,
    pub name: Name,
    pub created_at: DateTime<Utc>,
    pub goal: String,
    pub comments: String,
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkoutID(i64);

impl WorkoutID {
    #[must_use]
    pub fn nil() -> Self {
        Self(0)
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0 == 0
    }
}

impl From<i64> for WorkoutID {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// One planned exercise block within a workout.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutExercise {
    pub id: WorkoutExerciseID,
    pub workout_id: WorkoutID,
    pub exercise_id: ExerciseID,
    pub progression_id: Option<ProgressionID>,
    pub reps: Reps,
    pub sets: Sets,
    pub time: Time,
    pub weight: Option<Weight>,
    pub notes: String,
}

impl WorkoutExercise {
    /// Whether the block is an isometric hold rather than a repetition count.
    #[must_use]
    pub fn is_hold(&self) -> bool {
        u32::from(self.time) > 0
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkoutExerciseID(i64);

impl WorkoutExerciseID {
    #[must_use]
    pub fn nil() -> Self {
        Self(0)
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0 == 0
    }
}

impl From<i64> for WorkoutExerciseID {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutExerciseEntry {
    pub workout_exercise: WorkoutExercise,
    pub exercise_name: Option<String>,
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Reps(u32);

impl Reps {
    pub fn new(value: u32) -> Result<Self, RepsError> {
        if !(0..1000).contains(&value) {
            return Err(RepsError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Reps {
    type Error = RepsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<u32>() {
            Ok(parsed_value) => Reps::new(parsed_value),
            Err(_) => Err(RepsError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RepsError {
    #[error("Reps must be in the range 0 to 999")]
    OutOfRange,
    #[error("Reps must be an integer")]
    ParseError,
}

#[derive(Debug, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Sets(u32);

impl Sets {
    pub fn new(value: u32) -> Result<Self, SetsError> {
        if !(1..1000).contains(&value) {
            return Err(SetsError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl Default for Sets {
    fn default() -> Self {
        Self(1)
    }
}

impl TryFrom<&str> for Sets {
    type Error = SetsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<u32>() {
            Ok(parsed_value) => Sets::new(parsed_value),
            Err(_) => Err(SetsError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SetsError {
    #[error("Sets must be in the range 1 to 999")]
    OutOfRange,
    #[error("Sets must be an integer")]
    ParseError,
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Time(u32);

impl Time {
    pub fn new(value: u32) -> Result<Self, TimeError> {
        if !(0..1000).contains(&value) {
            return Err(TimeError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Time {
    type Error = TimeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<u32>() {
            Ok(parsed_value) => Time::new(parsed_value),
            Err(_) => Err(TimeError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum TimeError {
    #[error("Time must be in the range 0 to 999 s")]
    OutOfRange,
    #[error("Time must be an integer")]
    ParseError,
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Weight(f32);

impl Weight {
    pub fn new(value: f32) -> Result<Self, WeightError> {
        if !(0.0..1000.0).contains(&value) {
            return Err(WeightError::OutOfRange);
        }

        if (value * 10.0 % 1.0).abs() > f32::EPSILON {
            return Err(WeightError::InvalidResolution);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Weight {
    type Error = WeightError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<f32>() {
            Ok(parsed_value) => Weight::new(parsed_value),
            Err(_) => Err(WeightError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WeightError {
    #[error("Weight must be in the range 0.0 to 999.9 kg")]
    OutOfRange,
    #[error("Weight must be a multiple of 0.1 kg")]
    InvalidResolution,
    #[error("Weight must be a decimal")]
    ParseError,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0, Ok(Reps(0)))]
    #[case(999, Ok(Reps(999)))]
    #[case(1000, Err(RepsError::OutOfRange))]
    fn test_reps_new(#[case] value: u32, #[case] expected: Result<Reps, RepsError>) {
        assert_eq!(Reps::new(value), expected);
    }

    #[rstest]
    #[case("10", Ok(Reps(10)))]
    #[case("1000", Err(RepsError::OutOfRange))]
    #[case("ten", Err(RepsError::ParseError))]
    fn test_reps_try_from_str(#[case] value: &str, #[case] expected: Result<Reps, RepsError>) {
        assert_eq!(Reps::try_from(value), expected);
    }

    #[rstest]
    #[case(1, Ok(Sets(1)))]
    #[case(999, Ok(Sets(999)))]
    #[case(0, Err(SetsError::OutOfRange))]
    #[case(1000, Err(SetsError::OutOfRange))]
    fn test_sets_new(#[case] value: u32, #[case] expected: Result<Sets, SetsError>) {
        assert_eq!(Sets::new(value), expected);
    }

    #[test]
    fn test_sets_default() {
        assert_eq!(Sets::default(), Sets(1));
    }

    #[rstest]
    #[case(0, Ok(Time(0)))]
    #[case(999, Ok(Time(999)))]
    #[case(1000, Err(TimeError::OutOfRange))]
    fn test_time_new(#[case] value: u32, #[case] expected: Result<Time, TimeError>) {
        assert_eq!(Time::new(value), expected);
    }

    #[rstest]
    #[case(0.0, Ok(Weight(0.0)))]
    #[case(80.5, Ok(Weight(80.5)))]
    #[case(1000.0, Err(WeightError::OutOfRange))]
    #[case(80.55, Err(WeightError::InvalidResolution))]
    fn test_weight_new(#[case] value: f32, #[case] expected: Result<Weight, WeightError>) {
        assert_eq!(Weight::new(value), expected);
    }

    #[rstest]
    #[case(Time(0), false)]
    #[case(Time(30), true)]
    fn test_workout_exercise_is_hold(#[case] time: Time, #[case] expected: bool) {
        let workout_exercise = WorkoutExercise {
            id: 1.into(),
            workout_id: 1.into(),
            exercise_id: 1.into(),
            progression_id: None,
            reps: Reps::default(),
            sets: Sets::default(),
            time,
            weight: None,
            notes: String::new(),
        };

        assert_eq!(workout_exercise.is_hold(), expected);
    }
}
