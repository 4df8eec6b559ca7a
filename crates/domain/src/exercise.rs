use derive_more::Deref;

use crate::{CreateError, DeleteError, Name, ReadError, UpdateError};

#[allow(async_fn_in_trait)]
pub trait ExerciseRepository {
    async fn read_exercises(&self, filter: &ExerciseFilter) -> Result<Vec<Exercise>, ReadError>;
    async fn read_exercise(&self, id: ExerciseID) -> Result<Option<Exercise>, ReadError>;
    async fn create_exercise(
        &self,
        name: Name,
        category: String,
        subtype: String,
    ) -> Result<Exercise, CreateError>;
    async fn replace_exercise(&self, exercise: Exercise) -> Result<usize, UpdateError>;
    async fn delete_exercise(&self, id: ExerciseID) -> Result<usize, DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait ExerciseService {
    async fn get_exercises(&self, filter: &ExerciseFilter) -> Result<Vec<Exercise>, ReadError>;
    async fn get_exercise(&self, id: ExerciseID) -> Result<Exercise, ReadError>;
    async fn create_exercise(
        &self,
        name: Name,
        category: String,
        subtype: String,
    ) -> Result<Exercise, CreateError>;
    async fn replace_exercise(&self, exercise: Exercise) -> Result<usize, UpdateError>;
    async fn delete_exercise(&self, id: ExerciseID) -> Result<usize, DeleteError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    pub id: ExerciseID,
    pub name: Name,
    pub category: String,
    pub subtype: String,
    pub is_custom: bool,
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExerciseID(i64);

impl ExerciseID {
    #[must_use]
    pub fn nil() -> Self {
        Self(0)
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0 == 0
    }
}

impl From<i64> for ExerciseID {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExerciseFilter {
    pub search: String,
    pub category: Option<String>,
    pub subtype: Option<String>,
}

impl ExerciseFilter {
    #[must_use]
    pub fn matches(&self, exercise: &Exercise) -> bool {
        exercise
            .name
            .as_ref()
            .to_lowercase()
            .contains(self.search.to_lowercase().trim())
            && self
                .category
                .as_ref()
                .is_none_or(|category| exercise.category == *category)
            && self
                .subtype
                .as_ref()
                .is_none_or(|subtype| exercise.subtype == *subtype)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty() && self.category.is_none() && self.subtype.is_none()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn exercise(name: &str, category: &str, subtype: &str) -> Exercise {
        Exercise {
            id: 1.into(),
            name: Name::new(name).unwrap(),
            category: category.to_string(),
            subtype: subtype.to_string(),
            is_custom: false,
        }
    }

    #[rstest]
    #[case::empty(ExerciseFilter::default(), true)]
    #[case::name_lower_case(
        ExerciseFilter { search: "push".into(), ..ExerciseFilter::default() },
        true
    )]
    #[case::name_upper_case(
        ExerciseFilter { search: "PUSH".into(), ..ExerciseFilter::default() },
        true
    )]
    #[case::name_no_match(
        ExerciseFilter { search: "squat".into(), ..ExerciseFilter::default() },
        false
    )]
    #[case::category(
        ExerciseFilter { category: Some("push-ups".into()), ..ExerciseFilter::default() },
        true
    )]
    #[case::category_no_match(
        ExerciseFilter { category: Some("pull-ups".into()), ..ExerciseFilter::default() },
        false
    )]
    #[case::category_case_sensitive(
        ExerciseFilter { category: Some("Push-Ups".into()), ..ExerciseFilter::default() },
        false
    )]
    #[case::subtype(
        ExerciseFilter { subtype: Some("dynamic".into()), ..ExerciseFilter::default() },
        true
    )]
    #[case::subtype_no_match(
        ExerciseFilter { subtype: Some("static".into()), ..ExerciseFilter::default() },
        false
    )]
    #[case::combined(
        ExerciseFilter {
            search: "hand".into(),
            category: Some("push-ups".into()),
            subtype: Some("dynamic".into()),
        },
        true
    )]
    fn test_exercise_filter_matches(#[case] filter: ExerciseFilter, #[case] expected: bool) {
        assert_eq!(
            filter.matches(&exercise("Handstand Push Up", "push-ups", "dynamic")),
            expected
        );
    }

    #[test]
    fn test_exercise_filter_is_empty() {
        assert!(ExerciseFilter::default().is_empty());
        assert!(
            ExerciseFilter {
                search: "  ".into(),
                ..ExerciseFilter::default()
            }
            .is_empty()
        );
        assert!(
            !ExerciseFilter {
                category: Some("core".into()),
                ..ExerciseFilter::default()
            }
            .is_empty()
        );
    }
}
