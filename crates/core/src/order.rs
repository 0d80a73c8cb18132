use serde::{Deserialize, Serialize};

use crate::ids::RoutineDayId;
use crate::model::RoutineDay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// The neighbor of `index` in this direction, if it lies inside `0..len`.
    pub fn neighbor(&self, index: usize, len: usize) -> Option<usize> {
        let target = match self {
            Self::Up => index.checked_sub(1)?,
            Self::Down => index.checked_add(1)?,
        };
        (index < len && target < len).then_some(target)
    }
}

/// Sort days by their stored position, breaking ties by id so the order is
/// stable even when positions have drifted.
pub fn sort_days(days: &mut [RoutineDay]) {
    days.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then(a.id.cmp(&b.id)));
}

/// Swap the day at `index` with its neighbor. Returns false, leaving `days`
/// untouched, when the neighbor does not exist.
pub fn swap_adjacent(days: &mut [RoutineDay], index: usize, direction: Direction) -> bool {
    match direction.neighbor(index, days.len()) {
        Some(target) => {
            days.swap(index, target);
            true
        }
        None => false,
    }
}

/// Assign positions `1..=N` following the current slice order.
pub fn renumber(days: &mut [RoutineDay]) {
    for (i, day) in days.iter_mut().enumerate() {
        day.sort_order = i as u32 + 1;
    }
}

pub fn ordered_ids(days: &[RoutineDay]) -> Vec<RoutineDayId> {
    days.iter().map(|day| day.id).collect()
}

pub fn is_contiguous(days: &[RoutineDay]) -> bool {
    let mut positions: Vec<u32> = days.iter().map(|day| day.sort_order).collect();
    positions.sort_unstable();
    positions.iter().enumerate().all(|(i, p)| *p == i as u32 + 1)
}
