use liftlog_core::{Equipment, Exercise, ExerciseId, MuscleGroup};
use liftlog_storage::Storage;

use crate::{Engine, EngineError};

impl Engine {
    /// Curated exercises plus the caller's own, with the caller's favorites
    /// marked.
    pub fn exercises(&self) -> Result<Vec<Exercise>, EngineError> {
        Ok(self.storage.list_exercises(self.user_id)?)
    }

    pub fn exercise(&self, exercise_id: ExerciseId) -> Result<Exercise, EngineError> {
        self.require_exercise(exercise_id)
    }

    pub fn create_exercise(
        &mut self,
        name: &str,
        muscle_group: MuscleGroup,
        equipment: Equipment,
    ) -> Result<Exercise, EngineError> {
        let exercise = Exercise {
            id: ExerciseId::new(),
            name: exercise_name(name)?.to_string(),
            muscle_group,
            equipment,
            is_curated: false,
            created_by: Some(self.user_id),
            is_favorite: false,
        };
        self.storage.insert_exercise(&exercise)?;
        log::info!("created exercise {} ({})", exercise.id, exercise.name);
        Ok(exercise)
    }

    /// Edit an exercise the caller created. Curated exercises and those of
    /// other users are reported as not found.
    pub fn update_exercise(
        &mut self,
        exercise_id: ExerciseId,
        name: &str,
        muscle_group: MuscleGroup,
        equipment: Equipment,
    ) -> Result<Exercise, EngineError> {
        let name = exercise_name(name)?;
        let mut exercise = self.require_exercise(exercise_id)?;
        if !exercise.is_editable_by(self.user_id) {
            return Err(EngineError::NotFound(format!("editable exercise {exercise_id}")));
        }
        exercise.name = name.to_string();
        exercise.muscle_group = muscle_group;
        exercise.equipment = equipment;
        self.storage.update_exercise(&exercise)?;
        Ok(exercise)
    }

    pub fn set_favorite(
        &mut self,
        exercise_id: ExerciseId,
        favorite: bool,
    ) -> Result<Exercise, EngineError> {
        let mut exercise = self.require_exercise(exercise_id)?;
        self.storage.set_favorite(self.user_id, exercise_id, favorite)?;
        exercise.is_favorite = favorite;
        Ok(exercise)
    }
}

fn exercise_name(name: &str) -> Result<&str, EngineError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(EngineError::Validation("exercise name cannot be empty".into()));
    }
    Ok(name)
}
