#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod catalog;

mod error;
mod exercise;
mod name;
mod progression;
mod service;
mod set_record;
mod workout;

pub use error::{CreateError, DeleteError, ReadError, StorageError, UpdateError};
pub use exercise::{
    Exercise, ExerciseFilter, ExerciseID, ExerciseRepository, ExerciseService,
};
pub use name::{Name, NameError};
pub use progression::{
    ChainError, Difficulty, DifficultyError, Progression, ProgressionID, ProgressionRepository,
    ProgressionService, chain_order, validate_chain,
};
pub use service::Service;
pub use set_record::{
    SessionRepository, SessionService, SessionSummary, SetRecord, SetRecordID,
    completed_set_numbers,
};
pub use workout::{
    Reps, RepsError, Sets, SetsError, Time, TimeError, Weight, WeightError, Workout,
    WorkoutExercise, WorkoutExerciseEntry, WorkoutExerciseID, WorkoutExerciseRepository,
    WorkoutExerciseService, WorkoutID, WorkoutRepository, WorkoutService,
};
