use liftlog_core::{ComposedSession, Exercise, SessionId, SetInput, SetSlot, UserId};
use liftlog_engine::{Engine, EngineError, SessionEditor};

/// One client of a [`crate::TestBackend`], acting for a single user.
pub struct TestDevice {
    pub engine: Engine,
}

impl TestDevice {
    pub fn new(engine: Engine) -> Self {
        Self { engine }
    }

    pub fn user_id(&self) -> UserId {
        self.engine.user_id()
    }

    /// Start a session and commit `sets` as `(reps, weight)` in order.
    pub fn log_session(
        &mut self,
        exercise: &Exercise,
        planned_sets: i64,
        sets: &[(i64, f64)],
    ) -> Result<ComposedSession, EngineError> {
        let session = self.engine.create(exercise.id, planned_sets)?;
        for (i, (reps, weight)) in sets.iter().enumerate() {
            self.save(session.id(), i as u32 + 1, SetInput::weighted(*reps, *weight))?;
        }
        self.engine.session(session.id())
    }

    /// Like [`Self::log_session`], then complete it.
    pub fn finish_session(
        &mut self,
        exercise: &Exercise,
        planned_sets: i64,
        sets: &[(i64, f64)],
    ) -> Result<ComposedSession, EngineError> {
        let session = self.log_session(exercise, planned_sets, sets)?;
        self.engine.complete(session.id())
    }

    pub fn save(
        &mut self,
        session_id: SessionId,
        set_number: u32,
        input: SetInput,
    ) -> Result<SetSlot, EngineError> {
        self.engine.save_slot(session_id, set_number, input)
    }

    /// Editor on the active session. Fails with `NotFound` when there is none.
    pub fn editor(&self) -> Result<SessionEditor, EngineError> {
        SessionEditor::open(&self.engine)?
            .ok_or_else(|| EngineError::NotFound(format!("active session of {}", self.user_id())))
    }
}
