use std::collections::BTreeSet;

use derive_more::{Deref, Display, Into};

use crate::{CreateError, DeleteError, ExerciseID, Name, ReadError, UpdateError};

#[allow(async_fn_in_trait)]
pub trait ProgressionRepository {
    /// Progressions of one exercise, ordered by ascending difficulty.
    async fn read_progressions(
        &self,
        exercise_id: ExerciseID,
    ) -> Result<Vec<Progression>, ReadError>;
    async fn create_progression(
        &self,
        progression: Progression,
    ) -> Result<Progression, CreateError>;
    async fn replace_progression(&self, progression: Progression) -> Result<usize, UpdateError>;
    async fn delete_progression(&self, id: ProgressionID) -> Result<usize, DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait ProgressionService {
    async fn get_progressions(&self, exercise_id: ExerciseID)
    -> Result<Vec<Progression>, ReadError>;
    async fn create_progression(
        &self,
        progression: Progression,
    ) -> Result<Progression, CreateError>;
    async fn replace_progression(&self, progression: Progression) -> Result<usize, UpdateError>;
    async fn delete_progression(&self, id: ProgressionID) -> Result<usize, DeleteError>;
}

/// One difficulty variant of an exercise. The `prev`/`next` references form a
/// doubly-linked chain per exercise, from easiest to hardest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progression {
    pub id: ProgressionID,
    pub exercise_id: ExerciseID,
    pub name: Name,
    pub description: String,
    pub goal: String,
    pub difficulty: Difficulty,
    pub prev_progression_id: Option<ProgressionID>,
    pub next_progression_id: Option<ProgressionID>,
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ProgressionID(i64);

impl ProgressionID {
    #[must_use]
    pub fn nil() -> Self {
        Self(0)
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0 == 0
    }
}

impl From<i64> for ProgressionID {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

#[derive(Deref, Debug, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Difficulty(u8);

impl Difficulty {
    pub fn new(value: u8) -> Result<Self, DifficultyError> {
        if !(1..=10).contains(&value) {
            return Err(DifficultyError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Difficulty {
    type Error = DifficultyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<u8>() {
            Ok(parsed_value) => Difficulty::new(parsed_value),
            Err(_) => Err(DifficultyError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum DifficultyError {
    #[error("Difficulty must be in the range 1 to 10")]
    OutOfRange,
    #[error("Difficulty must be an integer")]
    ParseError,
}

/// Checks the chain invariants for the progressions of a single exercise:
/// acyclic, at most one head (`prev` unset), at most one tail (`next` unset)
/// and no links to progressions outside the given set.
pub fn validate_chain(progressions: &[Progression]) -> Result<(), ChainError> {
    let ids = progressions.iter().map(|p| p.id).collect::<BTreeSet<_>>();

    for progression in progressions {
        for linked in [
            progression.prev_progression_id,
            progression.next_progression_id,
        ]
        .into_iter()
        .flatten()
        {
            if !ids.contains(&linked) {
                return Err(ChainError::Dangling(linked));
            }
        }
    }

    if progressions
        .iter()
        .filter(|p| p.prev_progression_id.is_none())
        .count()
        > 1
    {
        return Err(ChainError::MultipleHeads);
    }

    if progressions
        .iter()
        .filter(|p| p.next_progression_id.is_none())
        .count()
        > 1
    {
        return Err(ChainError::MultipleTails);
    }

    chain_order(progressions).map(|_| ())
}

/// Resolves the linked order of a chain, head to tail. Fails on cycles.
pub fn chain_order(progressions: &[Progression]) -> Result<Vec<&Progression>, ChainError> {
    let Some(head) = progressions
        .iter()
        .find(|p| p.prev_progression_id.is_none())
    else {
        return if progressions.is_empty() {
            Ok(vec![])
        } else {
            Err(ChainError::Cycle)
        };
    };

    let mut order = vec![head];
    let mut visited = BTreeSet::from([head.id]);
    let mut current = head;

    while let Some(next_id) = current.next_progression_id {
        if visited.contains(&next_id) {
            return Err(ChainError::Cycle);
        }
        let Some(next) = progressions.iter().find(|p| p.id == next_id) else {
            return Err(ChainError::Dangling(next_id));
        };
        visited.insert(next.id);
        order.push(next);
        current = next;
    }

    Ok(order)
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ChainError {
    #[error("progression chain contains a cycle")]
    Cycle,
    #[error("progression chain has more than one head")]
    MultipleHeads,
    #[error("progression chain has more than one tail")]
    MultipleTails,
    #[error("progression chain references unknown progression {0:?}")]
    Dangling(ProgressionID),
}
