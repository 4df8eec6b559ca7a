//! Built-in exercises and their progression chains. IDs are stable across
//! releases; the seed loader inserts rows keyed by these IDs and never
//! overwrites existing ones.

pub struct Exercise {
    pub id: i64,
    pub name: &'static str,
    pub category: &'static str,
    pub subtype: &'static str,
    pub progressions: &'static [Progression],
}

/// Listed easiest to hardest; the seed loader derives the `prev`/`next`
/// links from the order within the slice.
pub struct Progression {
    pub id: i64,
    pub name: &'static str,
    pub description: &'static str,
    pub goal: &'static str,
    pub difficulty: u8,
}

pub const EXERCISES: [Exercise; 5] = [
    Exercise {
        id: 1,
        name: "Pull-up",
        category: "pull-ups",
        subtype: "dynamic",
        progressions: &[
            Progression {
                id: 1,
                name: "Negative Pull-up",
                description: "Lowering phase only",
                goal: "strength",
                difficulty: 2,
            },
            Progression {
                id: 2,
                name: "Australian Pull-up",
                description: "Body at angle",
                goal: "strength",
                difficulty: 3,
            },
            Progression {
                id: 3,
                name: "Assisted Pull-up",
                description: "With band or partner",
                goal: "strength",
                difficulty: 4,
            },
            Progression {
                id: 4,
                name: "Standard Pull-up",
                description: "Full range",
                goal: "strength",
                difficulty: 6,
            },
            Progression {
                id: 5,
                name: "Archer Pull-up",
                description: "One arm assists",
                goal: "strength",
                difficulty: 8,
            },
            Progression {
                id: 6,
                name: "One-Arm Pull-up",
                description: "Advanced",
                goal: "strength",
                difficulty: 10,
            },
        ],
    },
    Exercise {
        id: 2,
        name: "Push-up",
        category: "push-ups",
        subtype: "dynamic",
        progressions: &[
            Progression {
                id: 7,
                name: "Wall Push-up",
                description: "Standing, hands against a wall",
                goal: "strength",
                difficulty: 1,
            },
            Progression {
                id: 8,
                name: "Incline Push-up",
                description: "Hands elevated on a bench",
                goal: "strength",
                difficulty: 2,
            },
            Progression {
                id: 9,
                name: "Knee Push-up",
                description: "Knees on the floor",
                goal: "strength",
                difficulty: 3,
            },
            Progression {
                id: 10,
                name: "Standard Push-up",
                description: "Full range",
                goal: "strength",
                difficulty: 4,
            },
            Progression {
                id: 11,
                name: "Diamond Push-up",
                description: "Hands together under the chest",
                goal: "strength",
                difficulty: 6,
            },
            Progression {
                id: 12,
                name: "Archer Push-up",
                description: "One arm assists",
                goal: "strength",
                difficulty: 8,
            },
            Progression {
                id: 13,
                name: "One-Arm Push-up",
                description: "Advanced",
                goal: "strength",
                difficulty: 10,
            },
        ],
    },
    Exercise {
        id: 3,
        name: "Squat",
        category: "squats",
        subtype: "dynamic",
        progressions: &[
            Progression {
                id: 14,
                name: "Assisted Squat",
                description: "Holding a support",
                goal: "strength",
                difficulty: 1,
            },
            Progression {
                id: 15,
                name: "Standard Squat",
                description: "Full depth, bodyweight",
                goal: "strength",
                difficulty: 2,
            },
            Progression {
                id: 16,
                name: "Split Squat",
                description: "Staggered stance",
                goal: "strength",
                difficulty: 4,
            },
            Progression {
                id: 17,
                name: "Bulgarian Split Squat",
                description: "Rear foot elevated",
                goal: "strength",
                difficulty: 6,
            },
            Progression {
                id: 18,
                name: "Shrimp Squat",
                description: "Rear foot held behind",
                goal: "strength",
                difficulty: 8,
            },
            Progression {
                id: 19,
                name: "Pistol Squat",
                description: "One leg, other extended forward",
                goal: "strength",
                difficulty: 9,
            },
        ],
    },
    Exercise {
        id: 4,
        name: "Dip",
        category: "dips",
        subtype: "dynamic",
        progressions: &[
            Progression {
                id: 20,
                name: "Bench Dip",
                description: "Hands on a bench behind the body",
                goal: "strength",
                difficulty: 2,
            },
            Progression {
                id: 21,
                name: "Support Hold",
                description: "Locked out on parallel bars",
                goal: "strength",
                difficulty: 3,
            },
            Progression {
                id: 22,
                name: "Negative Dip",
                description: "Lowering phase only",
                goal: "strength",
                difficulty: 4,
            },
            Progression {
                id: 23,
                name: "Standard Dip",
                description: "Full range on parallel bars",
                goal: "strength",
                difficulty: 5,
            },
            Progression {
                id: 24,
                name: "Ring Dip",
                description: "On gymnastic rings",
                goal: "strength",
                difficulty: 7,
            },
            Progression {
                id: 25,
                name: "Korean Dip",
                description: "On a single bar behind the body",
                goal: "strength",
                difficulty: 9,
            },
        ],
    },
    Exercise {
        id: 5,
        name: "Hanging Leg Raise",
        category: "core",
        subtype: "dynamic",
        progressions: &[
            Progression {
                id: 26,
                name: "Lying Knee Tuck",
                description: "On the floor, knees to chest",
                goal: "strength",
                difficulty: 1,
            },
            Progression {
                id: 27,
                name: "Hanging Knee Raise",
                description: "Knees to hip height",
                goal: "strength",
                difficulty: 3,
            },
            Progression {
                id: 28,
                name: "Hanging Leg Raise",
                description: "Straight legs to horizontal",
                goal: "strength",
                difficulty: 5,
            },
            Progression {
                id: 29,
                name: "Toes to Bar",
                description: "Straight legs to the bar",
                goal: "strength",
                difficulty: 7,
            },
            Progression {
                id: 30,
                name: "L-sit Hold",
                description: "Static hold, legs horizontal",
                goal: "strength",
                difficulty: 8,
            },
        ],
    },
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_exercise_ids_unique() {
        let mut ids = HashSet::new();

        for exercise in &EXERCISES {
            assert!(ids.insert(exercise.id));
        }
    }

    #[test]
    fn test_progression_ids_unique() {
        let mut ids = HashSet::new();

        for exercise in &EXERCISES {
            for progression in exercise.progressions {
                assert!(ids.insert(progression.id));
            }
        }
    }

    #[test]
    fn test_progression_difficulty_non_decreasing() {
        for exercise in &EXERCISES {
            for pair in exercise.progressions.windows(2) {
                assert!(
                    pair[0].difficulty <= pair[1].difficulty,
                    "{} harder than its successor",
                    pair[0].name
                );
            }
        }
    }

    #[test]
    fn test_progression_difficulty_in_range() {
        for exercise in &EXERCISES {
            for progression in exercise.progressions {
                assert!((1..=10).contains(&progression.difficulty));
            }
        }
    }

    #[test]
    fn test_names_non_empty() {
        for exercise in &EXERCISES {
            assert!(!exercise.name.is_empty());

            for progression in exercise.progressions {
                assert!(!progression.name.is_empty());
            }
        }
    }
}
