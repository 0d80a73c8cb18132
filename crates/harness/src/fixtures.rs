use liftlog_core::{
    Equipment, Exercise, MuscleGroup, PlannedSets, StockRoutine, StockRoutineDay,
};
use liftlog_storage::{SqliteStorage, Storage, StorageError};

/// Curated exercises every test backend starts with.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub bench_press: Exercise,
    pub back_squat: Exercise,
    pub dumbbell_row: Exercise,
    pub goblet_squat: Exercise,
    pub push_up: Exercise,
    pub pull_up: Exercise,
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            bench_press: Exercise::curated("Bench Press", MuscleGroup::Chest, Equipment::Barbell),
            back_squat: Exercise::curated("Back Squat", MuscleGroup::Legs, Equipment::Barbell),
            dumbbell_row: Exercise::curated("Dumbbell Row", MuscleGroup::Back, Equipment::Dumbbells),
            goblet_squat: Exercise::curated("Goblet Squat", MuscleGroup::Legs, Equipment::Kettlebell),
            push_up: Exercise::curated("Push-up", MuscleGroup::Chest, Equipment::BodyWeight),
            pull_up: Exercise::curated("Pull-up", MuscleGroup::Back, Equipment::BodyWeight),
        }
    }

    pub fn all(&self) -> [&Exercise; 6] {
        [
            &self.bench_press,
            &self.back_squat,
            &self.dumbbell_row,
            &self.goblet_squat,
            &self.push_up,
            &self.pull_up,
        ]
    }

    pub fn install(&self, storage: &mut SqliteStorage) -> Result<(), StorageError> {
        for exercise in self.all() {
            storage.insert_exercise(exercise)?;
        }
        Ok(())
    }

    /// Onboarding templates, one per equipment family.
    pub fn stock_routines(&self) -> Result<Vec<StockRoutine>, StorageError> {
        Ok(vec![
            StockRoutine {
                name: "Barbell Strength".into(),
                equipment: Equipment::Barbell,
                days: vec![
                    stock_day("Squat Day", &self.back_squat, 5)?,
                    stock_day("Press Day", &self.bench_press, 5)?,
                ],
            },
            StockRoutine {
                name: "Dumbbell Basics".into(),
                equipment: Equipment::Dumbbells,
                days: vec![stock_day("Pull", &self.dumbbell_row, 3)?],
            },
            StockRoutine {
                name: "Bodyweight Anywhere".into(),
                equipment: Equipment::BodyWeight,
                days: vec![
                    stock_day("Push", &self.push_up, 3)?,
                    stock_day("Pull", &self.pull_up, 3)?,
                ],
            },
        ])
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

fn stock_day(
    title: &str,
    exercise: &Exercise,
    planned_sets: i64,
) -> Result<StockRoutineDay, StorageError> {
    Ok(StockRoutineDay {
        title: title.to_string(),
        muscle_group: exercise.muscle_group,
        exercise_id: exercise.id,
        planned_sets: PlannedSets::new(planned_sets)?,
    })
}
