use liftlog_core::{
    prefill::SeedRow, Exercise, PlannedSets, Routine, RoutineDay, SessionHeader, SetRecord,
    TimestampMs, UserProfile, ids::*,
};

use crate::error::StorageError;

/// Result of inserting a session together with its prefill rows.
#[derive(Debug)]
pub struct CreatedSession {
    pub header: SessionHeader,
    /// Rows actually written. Empty when seeding was rolled back.
    pub seeded: Vec<SetRecord>,
    /// Why seeding was rolled back, if it was.
    pub seed_failure: Option<StorageError>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoutineRecord {
    pub routine_id: RoutineId,
    pub user_id: UserId,
    pub name: String,
    pub created_at: TimestampMs,
}

pub trait Storage {
    // Profiles

    fn get_profile(&self, user_id: UserId) -> Result<Option<UserProfile>, StorageError>;

    fn upsert_profile(&mut self, profile: &UserProfile) -> Result<(), StorageError>;

    // Exercises

    fn insert_exercise(&mut self, exercise: &Exercise) -> Result<(), StorageError>;

    fn update_exercise(&mut self, exercise: &Exercise) -> Result<(), StorageError>;

    /// Load an exercise with `is_favorite` resolved for `viewer`.
    fn get_exercise(
        &self,
        exercise_id: ExerciseId,
        viewer: UserId,
    ) -> Result<Option<Exercise>, StorageError>;

    /// Curated exercises plus those created by `viewer`, ordered by name.
    fn list_exercises(&self, viewer: UserId) -> Result<Vec<Exercise>, StorageError>;

    fn set_favorite(
        &mut self,
        user_id: UserId,
        exercise_id: ExerciseId,
        favorite: bool,
    ) -> Result<(), StorageError>;

    // Routines

    fn insert_routine(&mut self, record: &RoutineRecord) -> Result<(), StorageError>;

    fn get_routine_record(
        &self,
        routine_id: RoutineId,
    ) -> Result<Option<RoutineRecord>, StorageError>;

    /// Routines of `user_id` with their days, oldest routine first.
    fn list_routines(&self, user_id: UserId) -> Result<Vec<Routine>, StorageError>;

    fn rename_routine(&mut self, routine_id: RoutineId, name: &str) -> Result<bool, StorageError>;

    fn delete_routine(&mut self, routine_id: RoutineId) -> Result<bool, StorageError>;

    // Routine days

    fn insert_routine_day(&mut self, day: &RoutineDay) -> Result<(), StorageError>;

    fn get_routine_day(&self, day_id: RoutineDayId) -> Result<Option<RoutineDay>, StorageError>;

    /// Days of a routine ordered by `sort_order`.
    fn list_routine_days(&self, routine_id: RoutineId) -> Result<Vec<RoutineDay>, StorageError>;

    fn update_planned_sets(
        &mut self,
        day_id: RoutineDayId,
        planned_sets: PlannedSets,
    ) -> Result<bool, StorageError>;

    /// Delete one routine day and renumber the days left in its routine to
    /// `1..=n`, keeping their order. Both happen in one transaction. Returns
    /// false if the day does not exist.
    fn delete_routine_day(&mut self, day_id: RoutineDayId) -> Result<bool, StorageError>;

    /// Rewrite every position of `routine_id` so that `ordered[i]` sits at
    /// `i + 1`. Applied atomically.
    fn renumber_routine_days(
        &mut self,
        routine_id: RoutineId,
        ordered: &[RoutineDayId],
    ) -> Result<(), StorageError>;

    // Sessions

    /// Insert a new in-progress session and its seed rows.
    ///
    /// Fails with `ActiveSessionExists` if the user already has a session in
    /// progress. Seed rows are all-or-nothing: if one fails, none are kept and
    /// the session is still created.
    fn create_session(
        &mut self,
        header: &SessionHeader,
        seeds: &[SeedRow],
    ) -> Result<CreatedSession, StorageError>;

    fn get_session(&self, session_id: SessionId) -> Result<Option<SessionHeader>, StorageError>;

    fn get_active_session(&self, user_id: UserId) -> Result<Option<SessionHeader>, StorageError>;

    /// The most recently completed session of `user_id` for `exercise_id`.
    fn latest_completed_session(
        &self,
        user_id: UserId,
        exercise_id: ExerciseId,
    ) -> Result<Option<SessionHeader>, StorageError>;

    /// Completed sessions of `user_id`, most recently completed first.
    fn list_completed_sessions(&self, user_id: UserId) -> Result<Vec<SessionHeader>, StorageError>;

    /// Move an in-progress session to completed. Returns false if no
    /// in-progress session with that id exists.
    fn complete_session(
        &mut self,
        session_id: SessionId,
        completed_at: TimestampMs,
    ) -> Result<bool, StorageError>;

    /// Remove a session and all of its sets.
    fn delete_session(&mut self, session_id: SessionId) -> Result<bool, StorageError>;

    // Session sets

    /// Stored sets of a session ordered by `set_number`.
    fn list_sets(&self, session_id: SessionId) -> Result<Vec<SetRecord>, StorageError>;

    fn upsert_set(
        &mut self,
        session_id: SessionId,
        set_number: u32,
        reps: u32,
        weight: Option<f64>,
    ) -> Result<SetRecord, StorageError>;

    fn delete_set(&mut self, session_id: SessionId, set_number: u32) -> Result<bool, StorageError>;
}
