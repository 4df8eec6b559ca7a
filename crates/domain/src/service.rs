use log::{debug, error};

use crate::{
    CreateError, DeleteError, Exercise, ExerciseFilter, ExerciseID, ExerciseRepository,
    ExerciseService, Name, Progression, ProgressionID, ProgressionRepository, ProgressionService,
    ReadError, SessionRepository, SessionService, SetRecord, UpdateError, Workout,
    WorkoutExercise, WorkoutExerciseEntry, WorkoutExerciseID, WorkoutExerciseRepository,
    WorkoutExerciseService, WorkoutID, WorkoutRepository, WorkoutService,
};

/// Application-facing facade over a repository aggregate. Forwards every
/// call and logs failures.
pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::Unavailable(_)) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: ExerciseRepository> ExerciseService for Service<R> {
    async fn get_exercises(&self, filter: &ExerciseFilter) -> Result<Vec<Exercise>, ReadError> {
        log_on_error!(
            self.repository.read_exercises(filter),
            ReadError,
            "get",
            "exercises"
        )
    }

    async fn get_exercise(&self, id: ExerciseID) -> Result<Exercise, ReadError> {
        log_on_error!(self.repository.read_exercise(id), ReadError, "get", "exercise")?
            .ok_or(ReadError::NotFound)
    }

    async fn create_exercise(
        &self,
        name: Name,
        category: String,
        subtype: String,
    ) -> Result<Exercise, CreateError> {
        log_on_error!(
            self.repository.create_exercise(name, category, subtype),
            CreateError,
            "create",
            "exercise"
        )
    }

    async fn replace_exercise(&self, exercise: Exercise) -> Result<usize, UpdateError> {
        log_on_error!(
            self.repository.replace_exercise(exercise),
            UpdateError,
            "replace",
            "exercise"
        )
    }

    async fn delete_exercise(&self, id: ExerciseID) -> Result<usize, DeleteError> {
        log_on_error!(
            self.repository.delete_exercise(id),
            DeleteError,
            "delete",
            "exercise"
        )
    }
}

impl<R: ProgressionRepository> ProgressionService for Service<R> {
    async fn get_progressions(
        &self,
        exercise_id: ExerciseID,
    ) -> Result<Vec<Progression>, ReadError> {
        log_on_error!(
            self.repository.read_progressions(exercise_id),
            ReadError,
            "get",
            "progressions"
        )
    }

    async fn create_progression(
        &self,
        progression: Progression,
    ) -> Result<Progression, CreateError> {
        log_on_error!(
            self.repository.create_progression(progression),
            CreateError,
            "create",
            "progression"
        )
    }

    async fn replace_progression(&self, progression: Progression) -> Result<usize, UpdateError> {
        log_on_error!(
            self.repository.replace_progression(progression),
            UpdateError,
            "replace",
            "progression"
        )
    }

    async fn delete_progression(&self, id: ProgressionID) -> Result<usize, DeleteError> {
        log_on_error!(
            self.repository.delete_progression(id),
            DeleteError,
            "delete",
            "progression"
        )
    }
}

impl<R: WorkoutRepository> WorkoutService for Service<R> {
    async fn get_workouts(&self) -> Result<Vec<Workout>, ReadError> {
        log_on_error!(self.repository.read_workouts(), ReadError, "get", "workouts")
    }

    async fn get_workout(&self, id: WorkoutID) -> Result<Workout, ReadError> {
        log_on_error!(self.repository.read_workout(id), ReadError, "get", "workout")?
            .ok_or(ReadError::NotFound)
    }

    async fn create_workout(
        &self,
        name: Name,
        goal: String,
        comments: String,
    ) -> Result<Workout, CreateError> {
        log_on_error!(
            self.repository.create_workout(name, goal, comments),
            CreateError,
            "create",
            "workout"
        )
    }

    async fn modify_workout(
        &self,
        id: WorkoutID,
        name: Option<Name>,
        goal: Option<String>,
        comments: Option<String>,
    ) -> Result<usize, UpdateError> {
        log_on_error!(
            self.repository.modify_workout(id, name, goal, comments),
            UpdateError,
            "modify",
            "workout"
        )
    }

    async fn delete_workout(&self, id: WorkoutID) -> Result<usize, DeleteError> {
        log_on_error!(
            self.repository.delete_workout(id),
            DeleteError,
            "delete",
            "workout"
        )
    }
}

impl<R: WorkoutExerciseRepository> WorkoutExerciseService for Service<R> {
    async fn get_workout_exercises(
        &self,
        workout_id: WorkoutID,
    ) -> Result<Vec<WorkoutExerciseEntry>, ReadError> {
        log_on_error!(
            self.repository.read_workout_exercises(workout_id),
            ReadError,
            "get",
            "workout exercises"
        )
    }

    async fn create_workout_exercise(
        &self,
        workout_exercise: WorkoutExercise,
    ) -> Result<WorkoutExercise, CreateError> {
        log_on_error!(
            self.repository.create_workout_exercise(workout_exercise),
            CreateError,
            "create",
            "workout exercise"
        )
    }

    async fn replace_workout_exercise(
        &self,
        workout_exercise: WorkoutExercise,
    ) -> Result<usize, UpdateError> {
        log_on_error!(
            self.repository.replace_workout_exercise(workout_exercise),
            UpdateError,
            "replace",
            "workout exercise"
        )
    }

    async fn delete_workout_exercise(&self, id: WorkoutExerciseID) -> Result<usize, DeleteError> {
        log_on_error!(
            self.repository.delete_workout_exercise(id),
            DeleteError,
            "delete",
            "workout exercise"
        )
    }

    async fn increment_planned_sets(&self, id: WorkoutExerciseID) -> Result<usize, UpdateError> {
        log_on_error!(
            self.repository.increment_planned_sets(id),
            UpdateError,
            "increment sets of",
            "workout exercise"
        )
    }
}

impl<R: SessionRepository> SessionService for Service<R> {
    async fn get_set_records(
        &self,
        workout_exercise_id: WorkoutExerciseID,
    ) -> Result<Vec<SetRecord>, ReadError> {
        log_on_error!(
            self.repository.read_set_records(workout_exercise_id),
            ReadError,
            "get",
            "set records"
        )
    }

    async fn complete_set(
        &self,
        workout_exercise_id: WorkoutExerciseID,
        set_number: u32,
    ) -> Result<SetRecord, CreateError> {
        log_on_error!(
            self.repository.complete_set(workout_exercise_id, set_number),
            CreateError,
            "complete",
            "set"
        )
    }
}
