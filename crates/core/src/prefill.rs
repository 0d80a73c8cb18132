use crate::model::{PlannedSets, SetRecord};

/// A set from an earlier session, as far as prefill cares about it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriorSet {
    pub set_number: u32,
    pub reps: Option<i64>,
    pub weight: Option<f64>,
}

impl From<&SetRecord> for PriorSet {
    fn from(record: &SetRecord) -> Self {
        Self {
            set_number: record.set_number,
            reps: Some(i64::from(record.reps)),
            weight: record.weight,
        }
    }
}

/// A row to be written into a new session before the user touches it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeedRow {
    pub set_number: u32,
    pub reps: u32,
    pub weight: Option<f64>,
}

/// Pick the sets of the last completed session worth copying into a new one.
///
/// Only set numbers inside the new plan are considered, and only sets whose
/// rep count is a positive integer.
pub fn seed_rows(history: &[PriorSet], planned_sets: PlannedSets) -> Vec<SeedRow> {
    (1..=planned_sets.get())
        .filter_map(|set_number| {
            let prior = history.iter().find(|s| s.set_number == set_number)?;
            let reps = prior.reps.filter(|r| *r > 0)?;
            let reps = u32::try_from(reps).ok()?;
            Some(SeedRow {
                set_number,
                reps,
                weight: prior.weight,
            })
        })
        .collect()
}
