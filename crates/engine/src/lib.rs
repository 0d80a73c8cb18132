pub mod config;
pub mod editor;
pub mod error;
mod exercises;
mod profile;
mod routines;
mod sessions;
mod sets;

pub use config::EngineConfig;
pub use editor::SessionEditor;
pub use error::EngineError;
pub use sets::FlushReport;

use std::collections::BTreeMap;
use std::sync::Arc;

use liftlog_core::{
    Clock, Exercise, SessionHeader, SetInput, SystemClock, ids::*,
};
use liftlog_storage::{RoutineRecord, SqliteStorage, Storage};

/// Per-user entry point for sessions, sets, routines and the exercise catalog.
///
/// Every read and write is scoped to `user_id`: rows owned by someone else are
/// reported as not found.
pub struct Engine {
    user_id: UserId,
    storage: SqliteStorage,
    config: EngineConfig,
    clock: Arc<dyn Clock>,
    /// Background set saves not yet written, at most one per slot.
    pending: BTreeMap<(SessionId, u32), SetInput>,
}

impl Engine {
    pub fn new(user_id: UserId, storage: SqliteStorage) -> Self {
        Self::with_config(user_id, storage, EngineConfig::default())
    }

    pub fn with_config(user_id: UserId, storage: SqliteStorage, config: EngineConfig) -> Self {
        Self {
            user_id,
            storage,
            config,
            clock: Arc::new(SystemClock),
            pending: BTreeMap::new(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn storage(&self) -> &SqliteStorage {
        &self.storage
    }

    #[cfg(test)]
    pub(crate) fn storage_mut(&mut self) -> &mut SqliteStorage {
        &mut self.storage
    }

    fn now(&self) -> Result<liftlog_core::TimestampMs, EngineError> {
        Ok(self.clock.now_ms()?)
    }

    /// A session owned by the caller, whatever its status.
    fn require_session(&self, session_id: SessionId) -> Result<SessionHeader, EngineError> {
        match self.storage.get_session(session_id)? {
            Some(header) if header.user_id == self.user_id => Ok(header),
            _ => Err(EngineError::NotFound(format!("session {session_id}"))),
        }
    }

    fn require_in_progress(&self, session_id: SessionId) -> Result<SessionHeader, EngineError> {
        let header = self.require_session(session_id)?;
        if !header.is_in_progress() {
            return Err(EngineError::SessionNotActive(session_id.to_string()));
        }
        Ok(header)
    }

    /// An exercise visible to the caller: curated, or created by them.
    fn require_exercise(&self, exercise_id: ExerciseId) -> Result<Exercise, EngineError> {
        match self.storage.get_exercise(exercise_id, self.user_id)? {
            Some(exercise) if exercise.is_curated || exercise.created_by == Some(self.user_id) => {
                Ok(exercise)
            }
            _ => Err(EngineError::NotFound(format!("exercise {exercise_id}"))),
        }
    }

    fn require_routine(&self, routine_id: RoutineId) -> Result<RoutineRecord, EngineError> {
        match self.storage.get_routine_record(routine_id)? {
            Some(record) if record.user_id == self.user_id => Ok(record),
            _ => Err(EngineError::NotFound(format!("routine {routine_id}"))),
        }
    }
}
