use liftlog_core::{SessionId, SetInput, SetSlot, SetWrite, set_policy::decide};
use liftlog_storage::Storage;

use crate::{Engine, EngineError};

/// Outcome of writing out queued background saves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushReport {
    pub applied: usize,
    pub failed: usize,
}

impl FlushReport {
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

impl Engine {
    /// Commit the values of one slot.
    ///
    /// Positive reps upsert the row for `(session_id, set_number)`; anything
    /// else deletes it, so the slot turns back into a phantom. The returned
    /// slot reflects what is now stored.
    pub fn save_slot(
        &mut self,
        session_id: SessionId,
        set_number: u32,
        input: SetInput,
    ) -> Result<SetSlot, EngineError> {
        if set_number == 0 {
            return Err(EngineError::Validation("set numbers start at 1".into()));
        }
        let header = self.require_in_progress(session_id)?;
        let exercise = self.require_exercise(header.exercise_id)?;

        match decide(&input, exercise.equipment, self.config.empty_weight)? {
            SetWrite::Upsert { reps, weight } => {
                let record = self.storage.upsert_set(session_id, set_number, reps, weight)?;
                log::debug!("saved set {set_number} of session {session_id}: {reps} reps");
                Ok(SetSlot::from(&record))
            }
            SetWrite::Delete => {
                if self.storage.delete_set(session_id, set_number)? {
                    log::debug!("cleared set {set_number} of session {session_id}");
                }
                Ok(SetSlot::phantom(session_id, set_number))
            }
        }
    }

    /// Record a background save. A later call for the same slot replaces the
    /// earlier one before it is written.
    pub fn queue_save(&mut self, session_id: SessionId, set_number: u32, input: SetInput) {
        if self.pending.insert((session_id, set_number), input).is_some() {
            log::trace!("replaced queued save for set {set_number} of session {session_id}");
        }
    }

    /// Drop the queued save for one slot, returning it if there was one.
    pub fn cancel_queued(&mut self, session_id: SessionId, set_number: u32) -> Option<SetInput> {
        self.pending.remove(&(session_id, set_number))
    }

    pub fn pending_saves(&self) -> usize {
        self.pending.len()
    }

    /// Write every queued save. Failures are logged and counted, never
    /// returned.
    pub fn flush_saves(&mut self) -> FlushReport {
        let queued = std::mem::take(&mut self.pending);
        self.apply_queued(queued)
    }

    /// Write the queued saves of one session.
    pub fn flush_session_saves(&mut self, session_id: SessionId) -> FlushReport {
        let keys = self.session_keys(session_id);
        let queued: Vec<_> = keys
            .into_iter()
            .filter_map(|key| self.pending.remove(&key).map(|input| (key, input)))
            .collect();
        self.apply_queued(queued)
    }

    pub(crate) fn drop_session_saves(&mut self, session_id: SessionId) -> usize {
        let keys = self.session_keys(session_id);
        for key in &keys {
            self.pending.remove(key);
        }
        keys.len()
    }

    fn session_keys(&self, session_id: SessionId) -> Vec<(SessionId, u32)> {
        self.pending
            .range((session_id, 0)..=(session_id, u32::MAX))
            .map(|(key, _)| *key)
            .collect()
    }

    fn apply_queued(
        &mut self,
        queued: impl IntoIterator<Item = ((SessionId, u32), SetInput)>,
    ) -> FlushReport {
        let mut report = FlushReport::default();
        for ((session_id, set_number), input) in queued {
            match self.save_slot(session_id, set_number, input) {
                Ok(_) => report.applied += 1,
                Err(e) => {
                    log::warn!("background save of set {set_number} in session {session_id} failed: {e}");
                    report.failed += 1;
                }
            }
        }
        report
    }
}
