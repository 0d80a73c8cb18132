use liftlog_core::{
    ExerciseId, PlannedSets, Routine, RoutineDay, RoutineDayId, RoutineId, UserProfile,
    order::{self, Direction},
};
use liftlog_storage::{RoutineRecord, Storage};

use crate::{Engine, EngineError};

impl Engine {
    /// The caller's routines, oldest first, each with its days in order.
    pub fn routines(&self) -> Result<Vec<Routine>, EngineError> {
        Ok(self.storage.list_routines(self.user_id)?)
    }

    pub fn routine(&self, routine_id: RoutineId) -> Result<Routine, EngineError> {
        let record = self.require_routine(routine_id)?;
        Ok(Routine {
            days: self.storage.list_routine_days(routine_id)?,
            id: record.routine_id,
            user_id: record.user_id,
            name: record.name,
        })
    }

    pub fn create_routine(&mut self, name: &str) -> Result<Routine, EngineError> {
        let name = routine_name(name)?;
        let record = RoutineRecord {
            routine_id: RoutineId::new(),
            user_id: self.user_id,
            name: name.to_string(),
            created_at: self.now()?,
        };
        self.storage.insert_routine(&record)?;
        log::info!("created routine {} ({name})", record.routine_id);
        self.routine(record.routine_id)
    }

    pub fn rename_routine(
        &mut self,
        routine_id: RoutineId,
        name: &str,
    ) -> Result<Routine, EngineError> {
        let name = routine_name(name)?;
        self.require_routine(routine_id)?;
        self.storage.rename_routine(routine_id, name)?;
        self.routine(routine_id)
    }

    /// Delete a routine and its days. The caller's last routine and their
    /// active routine cannot be deleted.
    pub fn delete_routine(&mut self, routine_id: RoutineId) -> Result<(), EngineError> {
        self.require_routine(routine_id)?;
        if self.routines()?.len() <= 1 {
            return Err(EngineError::Validation("cannot delete the last routine".into()));
        }
        if self.profile()?.active_routine_id == Some(routine_id) {
            return Err(EngineError::Validation("cannot delete the active routine".into()));
        }
        if !self.storage.delete_routine(routine_id)? {
            return Err(EngineError::NotFound(format!("routine {routine_id}")));
        }
        log::info!("deleted routine {routine_id}");
        Ok(())
    }

    pub fn set_active_routine(
        &mut self,
        routine_id: RoutineId,
    ) -> Result<UserProfile, EngineError> {
        self.require_routine(routine_id)?;
        let mut profile = self.profile()?;
        profile.active_routine_id = Some(routine_id);
        self.storage.upsert_profile(&profile)?;
        Ok(profile)
    }

    /// Append an exercise to the end of a routine. Without an explicit count
    /// the configured default number of sets is planned.
    pub fn add_entry(
        &mut self,
        routine_id: RoutineId,
        exercise_id: ExerciseId,
        planned_sets: Option<i64>,
    ) -> Result<RoutineDay, EngineError> {
        let planned_sets = PlannedSets::new(
            planned_sets.unwrap_or(i64::from(self.config.default_planned_sets)),
        )?;
        self.require_routine(routine_id)?;
        let exercise = self.require_exercise(exercise_id)?;

        let days = self.storage.list_routine_days(routine_id)?;
        let day = RoutineDay {
            id: RoutineDayId::new(),
            routine_id,
            title: exercise.name,
            muscle_group: exercise.muscle_group,
            exercise_id,
            planned_sets,
            sort_order: days.iter().map(|d| d.sort_order).max().unwrap_or(0) + 1,
        };
        self.storage.insert_routine_day(&day)?;
        Ok(day)
    }

    /// Swap the entry at `index` with its neighbor and renumber the whole
    /// routine. Moving past either end leaves the routine untouched.
    pub fn reorder(
        &mut self,
        routine_id: RoutineId,
        direction: Direction,
        index: usize,
    ) -> Result<Vec<RoutineDay>, EngineError> {
        self.require_routine(routine_id)?;
        let mut days = self.storage.list_routine_days(routine_id)?;
        order::sort_days(&mut days);

        if !order::swap_adjacent(&mut days, index, direction) {
            log::debug!("reorder {direction:?} at {index} in routine {routine_id} is out of bounds");
            return Ok(days);
        }
        self.write_order(routine_id, &mut days)?;
        log::info!("moved entry {index} {direction:?} in routine {routine_id}");
        Ok(days)
    }

    /// Remove one entry. The store renumbers what is left in the same write,
    /// so positions never show a gap.
    pub fn delete_entry(&mut self, day_id: RoutineDayId) -> Result<Vec<RoutineDay>, EngineError> {
        let day = self.require_day(day_id)?;
        if !self.storage.delete_routine_day(day_id)? {
            return Err(EngineError::NotFound(format!("routine day {day_id}")));
        }
        let days = self.storage.list_routine_days(day.routine_id)?;
        log::info!("removed {day_id} from routine {}, {} left", day.routine_id, days.len());
        Ok(days)
    }

    /// Change how many sets an entry plans. Counts outside `1..=20` are
    /// ignored and reported as `false`.
    pub fn update_planned_sets(
        &mut self,
        day_id: RoutineDayId,
        planned_sets: i64,
    ) -> Result<bool, EngineError> {
        self.require_day(day_id)?;
        let planned_sets = match PlannedSets::new(planned_sets) {
            Ok(planned_sets) => planned_sets,
            Err(e) => {
                log::debug!("ignoring planned sets update for {day_id}: {e}");
                return Ok(false);
            }
        };
        Ok(self.storage.update_planned_sets(day_id, planned_sets)?)
    }

    /// A routine day whose routine belongs to the caller.
    pub(crate) fn require_day(&self, day_id: RoutineDayId) -> Result<RoutineDay, EngineError> {
        let not_found = || EngineError::NotFound(format!("routine day {day_id}"));
        let day = self.storage.get_routine_day(day_id)?.ok_or_else(not_found)?;
        self.require_routine(day.routine_id).map_err(|_| not_found())?;
        Ok(day)
    }

    fn write_order(
        &mut self,
        routine_id: RoutineId,
        days: &mut [RoutineDay],
    ) -> Result<(), EngineError> {
        order::renumber(days);
        self.storage
            .renumber_routine_days(routine_id, &order::ordered_ids(days))?;
        Ok(())
    }
}

fn routine_name(name: &str) -> Result<&str, EngineError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(EngineError::Validation("routine name cannot be empty".into()));
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use liftlog_core::{Equipment, Exercise, MuscleGroup, UserId};
    use liftlog_storage::SqliteStorage;

    use super::*;

    fn engine_with_routine(entries: usize) -> (Engine, RoutineId, Vec<RoutineDayId>) {
        let mut storage = SqliteStorage::open_in_memory().unwrap();
        let exercises: Vec<Exercise> = (0..entries)
            .map(|i| Exercise::curated(&format!("Lift {i}"), MuscleGroup::Legs, Equipment::Barbell))
            .collect();
        for exercise in &exercises {
            storage.insert_exercise(exercise).unwrap();
        }
        let mut engine = Engine::new(UserId::new(), storage);
        let routine = engine.create_routine("Legs").unwrap();
        let ids = exercises
            .iter()
            .map(|e| engine.add_entry(routine.id, e.id, None).unwrap().id)
            .collect();
        (engine, routine.id, ids)
    }

    fn positions(days: &[RoutineDay]) -> Vec<u32> {
        days.iter().map(|d| d.sort_order).collect()
    }

    #[test]
    fn entries_are_appended_in_order() {
        let (engine, routine_id, ids) = engine_with_routine(3);
        let routine = engine.routine(routine_id).unwrap();
        assert_eq!(order::ordered_ids(&routine.days), ids);
        assert_eq!(positions(&routine.days), vec![1, 2, 3]);
        assert_eq!(routine.days[0].title, "Lift 0");
        assert_eq!(routine.days[0].planned_sets.get(), 3);
    }

    #[test]
    fn reorder_up_from_top_is_noop() {
        let (mut engine, routine_id, ids) = engine_with_routine(3);
        let days = engine.reorder(routine_id, Direction::Up, 0).unwrap();
        assert_eq!(order::ordered_ids(&days), ids);
        let days = engine.reorder(routine_id, Direction::Down, 2).unwrap();
        assert_eq!(order::ordered_ids(&days), ids);
        let days = engine.reorder(routine_id, Direction::Down, 7).unwrap();
        assert_eq!(order::ordered_ids(&days), ids);
    }

    #[test]
    fn reorder_swaps_and_persists() {
        let (mut engine, routine_id, ids) = engine_with_routine(3);
        let days = engine.reorder(routine_id, Direction::Down, 0).unwrap();
        assert_eq!(order::ordered_ids(&days), vec![ids[1], ids[0], ids[2]]);

        let stored = engine.routine(routine_id).unwrap().days;
        assert_eq!(order::ordered_ids(&stored), vec![ids[1], ids[0], ids[2]]);
        assert_eq!(positions(&stored), vec![1, 2, 3]);
    }

    #[test]
    fn delete_entry_renumbers_remaining() {
        let (mut engine, routine_id, ids) = engine_with_routine(4);
        let days = engine.delete_entry(ids[1]).unwrap();
        assert_eq!(order::ordered_ids(&days), vec![ids[0], ids[2], ids[3]]);
        assert_eq!(positions(&days), vec![1, 2, 3]);
        assert_eq!(positions(&engine.routine(routine_id).unwrap().days), vec![1, 2, 3]);
        assert!(matches!(engine.delete_entry(ids[1]), Err(EngineError::NotFound(_))));
    }

    #[test]
    fn planned_sets_update_ignores_out_of_range() {
        let (mut engine, routine_id, ids) = engine_with_routine(1);
        assert!(!engine.update_planned_sets(ids[0], 0).unwrap());
        assert!(!engine.update_planned_sets(ids[0], 21).unwrap());
        assert!(engine.update_planned_sets(ids[0], 20).unwrap());
        assert_eq!(engine.routine(routine_id).unwrap().days[0].planned_sets.get(), 20);
    }

    #[test]
    fn last_and_active_routines_are_protected() {
        let (mut engine, first, _) = engine_with_routine(1);
        assert!(matches!(engine.delete_routine(first), Err(EngineError::Validation(_))));

        let second = engine.create_routine("  Push ").unwrap();
        assert_eq!(second.name, "Push");
        engine.set_active_routine(second.id).unwrap();
        assert!(matches!(engine.delete_routine(second.id), Err(EngineError::Validation(_))));

        engine.delete_routine(first).unwrap();
        assert_eq!(engine.routines().unwrap().len(), 1);
    }

    #[test]
    fn blank_names_are_rejected() {
        let (mut engine, routine_id, _) = engine_with_routine(0);
        assert!(matches!(engine.create_routine("   "), Err(EngineError::Validation(_))));
        assert!(matches!(engine.rename_routine(routine_id, ""), Err(EngineError::Validation(_))));
        assert_eq!(engine.rename_routine(routine_id, "Upper").unwrap().name, "Upper");
    }

    #[test]
    fn foreign_routines_are_not_found() {
        let (mut engine, routine_id, ids) = engine_with_routine(2);
        let owner = engine.user_id();
        let mut stranger = Engine::new(UserId::new(), SqliteStorage::open_in_memory().unwrap());
        std::mem::swap(stranger.storage_mut(), engine.storage_mut());
        assert_ne!(stranger.user_id(), owner);

        assert!(matches!(stranger.routine(routine_id), Err(EngineError::NotFound(_))));
        assert!(matches!(
            stranger.reorder(routine_id, Direction::Down, 0),
            Err(EngineError::NotFound(_))
        ));
        assert!(matches!(stranger.delete_entry(ids[0]), Err(EngineError::NotFound(_))));
        assert!(matches!(stranger.update_planned_sets(ids[0], 4), Err(EngineError::NotFound(_))));
    }
}
