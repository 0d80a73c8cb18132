use liftlog_core::{
    ComposedSession, ExerciseId, PlannedSets, SessionHeader, SessionId, SessionStatus, SetSlot,
    compose::{compose, next_slot},
    ids::RoutineDayId,
    prefill::{PriorSet, SeedRow, seed_rows},
};
use liftlog_storage::{Storage, StorageError};

use crate::{Engine, EngineError};

impl Engine {
    /// The caller's in-progress session, if any. Reads only.
    pub fn get_active(&self) -> Result<Option<ComposedSession>, EngineError> {
        match self.storage.get_active_session(self.user_id)? {
            Some(header) => Ok(Some(self.compose_header(header)?)),
            None => Ok(None),
        }
    }

    /// Any session owned by the caller, composed from its stored sets.
    pub fn session(&self, session_id: SessionId) -> Result<ComposedSession, EngineError> {
        let header = self.require_session(session_id)?;
        self.compose_header(header)
    }

    /// Completed sessions, most recently completed first.
    pub fn history(&self) -> Result<Vec<ComposedSession>, EngineError> {
        self.storage
            .list_completed_sessions(self.user_id)?
            .into_iter()
            .map(|header| self.compose_header(header))
            .collect()
    }

    /// Start a session and seed it from the last completed one for the same
    /// exercise.
    ///
    /// Fails with `SessionConflict` if the caller already has a session in
    /// progress. The store decides, so concurrent calls cannot both succeed.
    pub fn create(
        &mut self,
        exercise_id: ExerciseId,
        planned_sets: i64,
    ) -> Result<ComposedSession, EngineError> {
        let planned_sets = PlannedSets::new(planned_sets)?;
        let exercise = self.require_exercise(exercise_id)?;
        let target_reps = match self.storage.get_profile(self.user_id)? {
            Some(profile) => profile.rep_range,
            None => self.config.default_rep_range()?,
        };

        let header = SessionHeader {
            id: SessionId::new(),
            user_id: self.user_id,
            exercise_id,
            status: SessionStatus::InProgress,
            planned_sets,
            target_reps,
            started_at: self.now()?,
            completed_at: None,
        };

        let seeds = match self.prefill(exercise_id, planned_sets) {
            Ok(seeds) => seeds,
            Err(e) => {
                log::warn!("prefill lookup for exercise {exercise_id} failed, starting empty: {e}");
                Vec::new()
            }
        };

        let created = match self.storage.create_session(&header, &seeds) {
            Ok(created) => created,
            Err(e @ StorageError::ActiveSessionExists { .. }) => {
                return Err(match self.storage.get_active_session(self.user_id)? {
                    Some(active) => EngineError::SessionConflict { active: active.id },
                    None => EngineError::Storage(e),
                });
            }
            Err(e) => return Err(e.into()),
        };

        if let Some(failure) = &created.seed_failure {
            log::warn!(
                "seeding session {} rolled back, {} row(s) dropped: {failure}",
                header.id,
                seeds.len()
            );
        }
        log::info!(
            "started session {} for {} ({} planned, {} seeded)",
            header.id,
            exercise.name,
            planned_sets.get(),
            created.seeded.len()
        );

        Ok(compose(created.header, &created.seeded))
    }

    /// Start a session for a routine entry using its planned set count.
    pub fn start_from_routine_day(
        &mut self,
        day_id: RoutineDayId,
    ) -> Result<ComposedSession, EngineError> {
        let day = self.require_day(day_id)?;
        self.create(day.exercise_id, i64::from(day.planned_sets.get()))
    }

    /// The phantom slot after the current last slot. Nothing is written until
    /// the slot is saved with valid values.
    pub fn add_slot(&self, session_id: SessionId) -> Result<SetSlot, EngineError> {
        let header = self.require_in_progress(session_id)?;
        let session = self.compose_header(header)?;
        Ok(next_slot(&session))
    }

    /// Finish an in-progress session. Unfilled slots are allowed.
    ///
    /// Background saves still queued for the session are written first.
    pub fn complete(&mut self, session_id: SessionId) -> Result<ComposedSession, EngineError> {
        self.require_in_progress(session_id)?;

        let report = self.flush_session_saves(session_id);
        if report.failed > 0 {
            log::warn!(
                "{} queued set save(s) for session {session_id} failed before completion",
                report.failed
            );
        }

        let completed_at = self.now()?;
        if !self.storage.complete_session(session_id, completed_at)? {
            return Err(EngineError::SessionNotActive(session_id.to_string()));
        }
        log::info!("completed session {session_id}");
        self.session(session_id)
    }

    /// Delete an in-progress session and every set stored for it.
    pub fn discard(&mut self, session_id: SessionId) -> Result<(), EngineError> {
        self.require_in_progress(session_id)?;
        let dropped = self.drop_session_saves(session_id);
        if !self.storage.delete_session(session_id)? {
            return Err(EngineError::NotFound(format!("session {session_id}")));
        }
        log::info!("discarded session {session_id} ({dropped} queued save(s) dropped)");
        Ok(())
    }

    fn compose_header(&self, header: SessionHeader) -> Result<ComposedSession, EngineError> {
        let sets = self.storage.list_sets(header.id)?;
        Ok(compose(header, &sets))
    }

    fn prefill(
        &self,
        exercise_id: ExerciseId,
        planned_sets: PlannedSets,
    ) -> Result<Vec<SeedRow>, EngineError> {
        let Some(last) = self
            .storage
            .latest_completed_session(self.user_id, exercise_id)?
        else {
            return Ok(Vec::new());
        };
        let history: Vec<PriorSet> = self
            .storage
            .list_sets(last.id)?
            .iter()
            .map(PriorSet::from)
            .collect();
        Ok(seed_rows(&history, planned_sets))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use liftlog_core::{
        Equipment, Exercise, ManualClock, MuscleGroup, SetInput, UserId,
    };
    use liftlog_storage::{SqliteStorage, Storage};

    use super::*;

    fn engine_with(equipment: Equipment) -> (Engine, Exercise, Arc<ManualClock>) {
        let mut storage = SqliteStorage::open_in_memory().unwrap();
        let exercise = Exercise::curated("Row", MuscleGroup::Back, equipment);
        storage.insert_exercise(&exercise).unwrap();
        let clock = Arc::new(ManualClock::new(10_000));
        let engine = Engine::new(UserId::new(), storage).with_clock(clock.clone());
        (engine, exercise, clock)
    }

    #[test]
    fn fresh_session_is_all_phantoms() {
        let (mut engine, exercise, _) = engine_with(Equipment::Dumbbells);
        let session = engine.create(exercise.id, 3).unwrap();
        assert_eq!(session.slots.len(), 3);
        assert!(session.slots.iter().all(|s| !s.completed()));
        assert_eq!(session.header.started_at, 10_000);
        assert_eq!(engine.get_active().unwrap().unwrap().id(), session.id());
    }

    #[test]
    fn second_create_conflicts_and_leaves_first_alone() {
        let (mut engine, exercise, _) = engine_with(Equipment::Dumbbells);
        let first = engine.create(exercise.id, 3).unwrap();
        engine.save_slot(first.id(), 1, SetInput::weighted(10, 20.0)).unwrap();

        let err = engine.create(exercise.id, 5).unwrap_err();
        assert!(matches!(err, EngineError::SessionConflict { active } if active == first.id()));

        let active = engine.get_active().unwrap().unwrap();
        assert_eq!(active.id(), first.id());
        assert_eq!(active.header.planned_sets.get(), 3);
        assert_eq!(active.completed_count(), 1);
    }

    #[test]
    fn planned_sets_outside_range_is_invalid() {
        let (mut engine, exercise, _) = engine_with(Equipment::Dumbbells);
        for bad in [0, 21, -1] {
            let err = engine.create(exercise.id, bad).unwrap_err();
            assert!(err.is_validation());
        }
        assert!(engine.get_active().unwrap().is_none());
    }

    #[test]
    fn unknown_exercise_is_not_found() {
        let (mut engine, _, _) = engine_with(Equipment::Dumbbells);
        let err = engine.create(ExerciseId::new(), 3).unwrap_err();
        assert!(matches!(err, EngineError::NotFound(_)));
    }

    #[test]
    fn prefill_copies_last_completed_session() {
        let (mut engine, exercise, clock) = engine_with(Equipment::Barbell);

        let older = engine.create(exercise.id, 2).unwrap();
        engine.save_slot(older.id(), 1, SetInput::weighted(5, 40.0)).unwrap();
        engine.complete(older.id()).unwrap();

        clock.advance(60_000);
        let newer = engine.create(exercise.id, 2).unwrap();
        // Set 1 comes from the older session; only set 1 was logged there.
        assert_eq!(newer.slots[0].reps, Some(5));
        engine.save_slot(newer.id(), 1, SetInput::weighted(8, 50.0)).unwrap();
        engine.complete(newer.id()).unwrap();

        clock.advance(60_000);
        let next = engine.create(exercise.id, 2).unwrap();
        assert!(next.slots[0].completed());
        assert_eq!(next.slots[0].reps, Some(8));
        assert_eq!(next.slots[0].weight, Some(50.0));
        assert!(!next.slots[1].completed());
    }

    #[test]
    fn add_slot_does_not_write() {
        let (mut engine, exercise, _) = engine_with(Equipment::Dumbbells);
        let session = engine.create(exercise.id, 2).unwrap();
        let slot = engine.add_slot(session.id()).unwrap();
        assert_eq!(slot.set_number, 3);
        assert!(!slot.completed());
        assert_eq!(engine.session(session.id()).unwrap().slots.len(), 2);
        assert_eq!(engine.add_slot(session.id()).unwrap().set_number, 3);
    }

    #[test]
    fn completed_session_is_terminal() {
        let (mut engine, exercise, clock) = engine_with(Equipment::Dumbbells);
        let session = engine.create(exercise.id, 3).unwrap();
        clock.advance(1_000);
        let done = engine.complete(session.id()).unwrap();
        assert_eq!(done.header.status, SessionStatus::Completed);
        assert_eq!(done.header.completed_at, Some(11_000));

        assert!(matches!(engine.complete(session.id()), Err(EngineError::SessionNotActive(_))));
        assert!(matches!(engine.discard(session.id()), Err(EngineError::SessionNotActive(_))));
        assert!(matches!(engine.add_slot(session.id()), Err(EngineError::SessionNotActive(_))));
        assert!(engine.get_active().unwrap().is_none());
        assert_eq!(engine.history().unwrap().len(), 1);
    }

    #[test]
    fn discard_removes_session_and_sets() {
        let (mut engine, exercise, _) = engine_with(Equipment::Dumbbells);
        let session = engine.create(exercise.id, 3).unwrap();
        engine.save_slot(session.id(), 2, SetInput::weighted(9, 12.5)).unwrap();
        engine.discard(session.id()).unwrap();

        assert!(engine.get_active().unwrap().is_none());
        assert!(matches!(engine.session(session.id()), Err(EngineError::NotFound(_))));
        assert!(engine.storage().list_sets(session.id()).unwrap().is_empty());
        // A new session can start right away.
        engine.create(exercise.id, 3).unwrap();
    }

    #[test]
    fn sessions_of_other_users_are_invisible() {
        let (mut engine, exercise, _) = engine_with(Equipment::Dumbbells);
        let session = engine.create(exercise.id, 3).unwrap();

        let mut stranger = Engine::new(UserId::new(), SqliteStorage::open_in_memory().unwrap());
        std::mem::swap(stranger.storage_mut(), engine.storage_mut());
        assert!(matches!(stranger.session(session.id()), Err(EngineError::NotFound(_))));
        assert!(matches!(stranger.discard(session.id()), Err(EngineError::NotFound(_))));
        assert!(stranger.get_active().unwrap().is_none());
    }
}
