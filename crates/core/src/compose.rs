use std::collections::BTreeMap;

use crate::model::{ComposedSession, SessionHeader, SetRecord, SetSlot};

/// Project a session's sparse stored sets onto a dense slot list.
///
/// The list covers `1..=max(planned_sets, highest stored set_number)`. Numbers
/// with a stored row become completed slots; the rest are phantoms.
pub fn compose(header: SessionHeader, persisted: &[SetRecord]) -> ComposedSession {
    let by_number: BTreeMap<u32, &SetRecord> = persisted
        .iter()
        .filter(|record| record.set_number > 0)
        .map(|record| (record.set_number, record))
        .collect();

    let max_existing = by_number.keys().next_back().copied().unwrap_or(0);
    let total_slots = header.planned_sets.get().max(max_existing);

    let slots = (1..=total_slots)
        .map(|set_number| match by_number.get(&set_number) {
            Some(record) => SetSlot::from(*record),
            None => SetSlot::phantom(header.id, set_number),
        })
        .collect();

    ComposedSession { header, slots }
}

/// The phantom slot that follows the highest slot of `session`.
pub fn next_slot(session: &ComposedSession) -> SetSlot {
    SetSlot::phantom(session.id(), session.max_set_number() + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::*;
    use crate::model::{PlannedSets, RepRange, SessionStatus};

    fn header(planned: i64) -> SessionHeader {
        SessionHeader {
            id: SessionId::new(),
            user_id: UserId::new(),
            exercise_id: ExerciseId::new(),
            status: SessionStatus::InProgress,
            planned_sets: PlannedSets::new(planned).unwrap(),
            target_reps: RepRange::default(),
            started_at: 0,
            completed_at: None,
        }
    }

    fn record(session_id: SessionId, set_number: u32, reps: u32) -> SetRecord {
        SetRecord {
            id: SetId::new(),
            session_id,
            set_number,
            reps,
            weight: Some(40.0),
        }
    }

    #[test]
    fn no_rows_yields_planned_phantoms() {
        let session = compose(header(3), &[]);
        let numbers: Vec<u32> = session.slots.iter().map(|s| s.set_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert!(session.slots.iter().all(|s| !s.completed()));
        assert!(session.slots.iter().all(|s| s.reps.is_none() && s.weight.is_none()));
    }

    #[test]
    fn rows_beyond_plan_extend_the_view() {
        let h = header(3);
        let id = h.id;
        let session = compose(h, &[record(id, 4, 5), record(id, 1, 10)]);

        assert_eq!(session.slots.len(), 4);
        let completed: Vec<bool> = session.slots.iter().map(|s| s.completed()).collect();
        assert_eq!(completed, vec![true, false, false, true]);
        assert_eq!(session.slots[0].reps, Some(10));
        assert_eq!(session.slots[3].reps, Some(5));
        assert_eq!(session.active_slot_index(), Some(1));
    }

    #[test]
    fn density_holds_for_mixed_inputs() {
        for planned in 1..=6i64 {
            for stored in [vec![], vec![2], vec![1, 3, 9], vec![6, 7]] {
                let h = header(planned);
                let id = h.id;
                let rows: Vec<SetRecord> = stored.iter().map(|n| record(id, *n, 8)).collect();
                let session = compose(h, &rows);

                let expected = (planned as u32).max(stored.iter().copied().max().unwrap_or(0));
                assert_eq!(session.slots.len() as u32, expected);
                for (i, slot) in session.slots.iter().enumerate() {
                    assert_eq!(slot.set_number, i as u32 + 1);
                    assert_eq!(slot.completed(), stored.contains(&slot.set_number));
                }
            }
        }
    }

    #[test]
    fn phantom_ids_never_collide_with_persisted_ids() {
        let h = header(4);
        let id = h.id;
        let session = compose(h, &[record(id, 2, 6)]);
        let mut rendered: Vec<String> = session.slots.iter().map(|s| s.id.to_string()).collect();
        rendered.sort();
        rendered.dedup();
        assert_eq!(rendered.len(), 4);
    }

    #[test]
    fn next_slot_follows_highest_number() {
        let h = header(2);
        let id = h.id;
        let session = compose(h, &[record(id, 5, 6)]);
        let slot = next_slot(&session);
        assert_eq!(slot.set_number, 6);
        assert!(!slot.completed());
        assert_eq!(slot.session_id, id);
    }
}
