use liftlog_core::{
    Equipment, RepRange, RoutineDay, RoutineDayId, RoutineId, StockRoutine, TimestampMs,
    UserProfile,
};
use liftlog_storage::{RoutineRecord, Storage};

use crate::{Engine, EngineError};

impl Engine {
    /// The stored profile, or a fresh one carrying the configured rep range.
    pub fn profile(&self) -> Result<UserProfile, EngineError> {
        match self.storage.get_profile(self.user_id)? {
            Some(profile) => Ok(profile),
            None => Ok(UserProfile::with_defaults(
                self.user_id,
                self.config.default_rep_range()?,
            )),
        }
    }

    /// Target reps for sessions started from now on. Running sessions keep
    /// the range they started with.
    pub fn set_rep_range(&mut self, min: u32, max: u32) -> Result<UserProfile, EngineError> {
        let mut profile = self.profile()?;
        profile.rep_range = RepRange::new(min, max)?;
        self.storage.upsert_profile(&profile)?;
        Ok(profile)
    }

    /// Copy the stock routines matching the chosen equipment into the
    /// caller's routines and mark onboarding done.
    ///
    /// The first copied routine becomes active; if none matched, any routine
    /// already active stays so.
    pub fn complete_onboarding(
        &mut self,
        selected_equipment: &[Equipment],
        templates: &[StockRoutine],
    ) -> Result<UserProfile, EngineError> {
        let now = self.now()?;
        let mut first_copied = None;

        for template in templates
            .iter()
            .filter(|t| selected_equipment.contains(&t.equipment))
        {
            let routine_id = self.copy_stock_routine(template, now)?;
            first_copied.get_or_insert(routine_id);
        }

        let mut profile = self.profile()?;
        if let Some(routine_id) = first_copied {
            profile.active_routine_id = Some(routine_id);
        }
        profile.onboarding_completed_at = Some(now);
        self.storage.upsert_profile(&profile)?;
        log::info!(
            "onboarding complete for {} (active routine {:?})",
            self.user_id,
            profile.active_routine_id
        );
        Ok(profile)
    }

    fn copy_stock_routine(
        &mut self,
        template: &StockRoutine,
        created_at: TimestampMs,
    ) -> Result<RoutineId, EngineError> {
        let record = RoutineRecord {
            routine_id: RoutineId::new(),
            user_id: self.user_id,
            name: template.name.clone(),
            created_at,
        };
        self.storage.insert_routine(&record)?;

        for (i, stock_day) in template.days.iter().enumerate() {
            let day = RoutineDay {
                id: RoutineDayId::new(),
                routine_id: record.routine_id,
                title: stock_day.title.clone(),
                muscle_group: stock_day.muscle_group,
                exercise_id: stock_day.exercise_id,
                planned_sets: stock_day.planned_sets,
                sort_order: i as u32 + 1,
            };
            self.storage.insert_routine_day(&day)?;
        }
        log::debug!(
            "copied stock routine {:?} with {} day(s)",
            template.name,
            template.days.len()
        );
        Ok(record.routine_id)
    }
}
