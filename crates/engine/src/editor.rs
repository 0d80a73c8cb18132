use std::collections::BTreeMap;

use liftlog_core::{
    ComposedSession, Optimistic, SetInput, SetSlot, WeightInput, compose::next_slot,
};

use crate::{Engine, EngineError};

/// Client-side view of one session while the user types into it.
///
/// Edits are held as drafts and queued on the engine as background saves, so
/// the last value typed into a slot is the one written. The session view only
/// changes when a slot is committed, and goes back to the stored slot if that
/// write fails.
#[derive(Debug, Clone)]
pub struct SessionEditor {
    state: Optimistic<ComposedSession>,
    /// Raw field values per set number, as typed.
    drafts: BTreeMap<u32, SetInput>,
}

impl SessionEditor {
    pub fn new(session: ComposedSession) -> Self {
        Self {
            state: Optimistic::new(session),
            drafts: BTreeMap::new(),
        }
    }

    /// An editor on the caller's active session, if there is one.
    pub fn open(engine: &Engine) -> Result<Option<Self>, EngineError> {
        Ok(engine.get_active()?.map(Self::new))
    }

    pub fn session(&self) -> &ComposedSession {
        self.state.get()
    }

    /// What the fields of slot `index` currently hold.
    pub fn draft(&self, index: usize) -> Option<SetInput> {
        let slot = self.session().slots.get(index)?;
        Some(
            self.drafts
                .get(&slot.set_number)
                .copied()
                .unwrap_or_else(|| SetInput::from(slot)),
        )
    }

    /// Record what the fields of one slot hold and queue it as a background
    /// save. Input without positive reps queues the delete, replacing any
    /// earlier value still waiting. Returns false if there is no slot at
    /// `index`.
    pub fn edit_slot(&mut self, engine: &mut Engine, index: usize, input: SetInput) -> bool {
        let Some(slot) = self.session().slots.get(index) else {
            return false;
        };
        let (session_id, set_number) = (slot.session_id, slot.set_number);

        self.drafts.insert(set_number, input);
        engine.queue_save(session_id, set_number, input);
        true
    }

    /// Write the slot's current fields now, replacing any queued save for it.
    ///
    /// On failure the slot keeps its stored values, the draft is kept for
    /// another try, and the error is returned.
    pub fn commit_slot(
        &mut self,
        engine: &mut Engine,
        index: usize,
    ) -> Result<SetSlot, EngineError> {
        let Some(input) = self.draft(index) else {
            return Err(EngineError::Validation(format!("no slot at index {index}")));
        };
        let slot = &self.session().slots[index];
        let (session_id, set_number) = (slot.session_id, slot.set_number);
        engine.cancel_queued(session_id, set_number);

        let saved = self.state.apply(
            |session| preview(&mut session.slots[index], &input),
            |_| engine.save_slot(session_id, set_number, input),
        )?;

        self.drafts.remove(&set_number);
        let stored = saved.clone();
        self.state.update_local(|session| session.slots[index] = stored);
        Ok(saved)
    }

    /// Append a phantom slot after the last local slot.
    pub fn add_slot(&mut self, engine: &Engine) -> Result<SetSlot, EngineError> {
        // Checks the session is still in progress.
        engine.add_slot(self.session().id())?;
        let slot = next_slot(self.session());
        let added = slot.clone();
        self.state.update_local(|session| session.slots.push(added));
        Ok(slot)
    }

    /// Recompose from storage, dropping local drafts and unsaved slots.
    pub fn reload(&mut self, engine: &Engine) -> Result<(), EngineError> {
        let session = engine.session(self.session().id())?;
        self.state.reset(session);
        self.drafts.clear();
        Ok(())
    }
}

/// Show typed values on a slot without touching its identity.
fn preview(slot: &mut SetSlot, input: &SetInput) {
    slot.reps = input
        .reps
        .filter(|r| *r > 0)
        .and_then(|r| u32::try_from(r).ok());
    slot.weight = match input.weight {
        WeightInput::Value(w) => Some(w),
        WeightInput::Empty | WeightInput::BodyWeight => None,
    };
}
