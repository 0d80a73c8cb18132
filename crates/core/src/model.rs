use serde::{Deserialize, Serialize};

use crate::clock::TimestampMs;
use crate::ids::*;
use crate::CoreError;

pub const MIN_PLANNED_SETS: u32 = 1;
pub const MAX_PLANNED_SETS: u32 = 20;

pub const DEFAULT_REP_MIN: u32 = 10;
pub const DEFAULT_REP_MAX: u32 = 20;

macro_rules! string_enum {
    ($name:ident, $kind:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }

            pub fn parse(s: &str) -> Result<Self, CoreError> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    _ => Err(CoreError::UnknownVariant {
                        kind: $kind,
                        value: s.to_string(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MuscleGroup {
    Chest,
    Back,
    Shoulders,
    Arms,
    Legs,
    Core,
    FullBody,
}

string_enum!(MuscleGroup, "muscle group", {
    Chest => "Chest",
    Back => "Back",
    Shoulders => "Shoulders",
    Arms => "Arms",
    Legs => "Legs",
    Core => "Core",
    FullBody => "Full Body",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Equipment {
    BodyWeight,
    Dumbbells,
    Barbell,
    Kettlebell,
    Machine,
    Bands,
}

string_enum!(Equipment, "equipment", {
    BodyWeight => "BodyWeight",
    Dumbbells => "Dumbbells",
    Barbell => "Barbell",
    Kettlebell => "Kettlebell",
    Machine => "Machine",
    Bands => "Bands",
});

impl Equipment {
    pub fn is_body_weight(&self) -> bool {
        matches!(self, Self::BodyWeight)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionStatus {
    InProgress,
    Completed,
}

string_enum!(SessionStatus, "session status", {
    InProgress => "in_progress",
    Completed => "completed",
});

/// Number of sets planned for a routine entry or a session, always within
/// `MIN_PLANNED_SETS..=MAX_PLANNED_SETS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct PlannedSets(u32);

impl PlannedSets {
    pub fn new(value: i64) -> Result<Self, CoreError> {
        if value < MIN_PLANNED_SETS as i64 || value > MAX_PLANNED_SETS as i64 {
            return Err(CoreError::PlannedSetsOutOfRange {
                value,
                min: MIN_PLANNED_SETS,
                max: MAX_PLANNED_SETS,
            });
        }
        Ok(Self(value as u32))
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl TryFrom<i64> for PlannedSets {
    type Error = CoreError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PlannedSets> for u32 {
    fn from(value: PlannedSets) -> Self {
        value.0
    }
}

/// Informational target rep range attached to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepRange {
    pub min: u32,
    pub max: u32,
}

impl RepRange {
    pub fn new(min: u32, max: u32) -> Result<Self, CoreError> {
        if min == 0 || min > max {
            return Err(CoreError::InvalidRepRange { min, max });
        }
        Ok(Self { min, max })
    }
}

impl Default for RepRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_REP_MIN,
            max: DEFAULT_REP_MAX,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: UserId,
    pub rep_range: RepRange,
    pub active_routine_id: Option<RoutineId>,
    pub onboarding_completed_at: Option<TimestampMs>,
}

impl UserProfile {
    pub fn with_defaults(user_id: UserId, rep_range: RepRange) -> Self {
        Self {
            user_id,
            rep_range,
            active_routine_id: None,
            onboarding_completed_at: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: ExerciseId,
    pub name: String,
    pub muscle_group: MuscleGroup,
    pub equipment: Equipment,
    pub is_curated: bool,
    pub created_by: Option<UserId>,
    /// Per-viewer flag, derived from the favorites of whoever loaded the row.
    pub is_favorite: bool,
}

impl Exercise {
    pub fn curated(name: &str, muscle_group: MuscleGroup, equipment: Equipment) -> Self {
        Self {
            id: ExerciseId::new(),
            name: name.to_string(),
            muscle_group,
            equipment,
            is_curated: true,
            created_by: None,
            is_favorite: false,
        }
    }

    pub fn is_editable_by(&self, user_id: UserId) -> bool {
        !self.is_curated && self.created_by == Some(user_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutineDay {
    pub id: RoutineDayId,
    pub routine_id: RoutineId,
    pub title: String,
    pub muscle_group: MuscleGroup,
    pub exercise_id: ExerciseId,
    pub planned_sets: PlannedSets,
    pub sort_order: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Routine {
    pub id: RoutineId,
    pub user_id: UserId,
    pub name: String,
    /// Ordered by `sort_order`.
    pub days: Vec<RoutineDay>,
}

/// A routine template copied into a user's routines during onboarding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRoutine {
    pub name: String,
    pub equipment: Equipment,
    pub days: Vec<StockRoutineDay>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRoutineDay {
    pub title: String,
    pub muscle_group: MuscleGroup,
    pub exercise_id: ExerciseId,
    pub planned_sets: PlannedSets,
}

/// The stored part of a session, without its sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionHeader {
    pub id: SessionId,
    pub user_id: UserId,
    pub exercise_id: ExerciseId,
    pub status: SessionStatus,
    pub planned_sets: PlannedSets,
    pub target_reps: RepRange,
    pub started_at: TimestampMs,
    pub completed_at: Option<TimestampMs>,
}

impl SessionHeader {
    pub fn is_in_progress(&self) -> bool {
        self.status == SessionStatus::InProgress
    }
}

/// A stored set. Rows only exist for sets with a positive rep count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetRecord {
    pub id: SetId,
    pub session_id: SessionId,
    pub set_number: u32,
    pub reps: u32,
    /// `None` for body-weight exercises.
    pub weight: Option<f64>,
}

/// One entry of the dense slot view handed to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetSlot {
    pub id: SlotId,
    pub session_id: SessionId,
    pub set_number: u32,
    pub reps: Option<u32>,
    pub weight: Option<f64>,
}

impl SetSlot {
    pub fn phantom(session_id: SessionId, set_number: u32) -> Self {
        Self {
            id: SlotId::Phantom {
                session_id,
                set_number,
            },
            session_id,
            set_number,
            reps: None,
            weight: None,
        }
    }

    /// True iff a stored row backs this slot.
    pub fn completed(&self) -> bool {
        !self.id.is_phantom()
    }
}

impl From<&SetRecord> for SetSlot {
    fn from(record: &SetRecord) -> Self {
        Self {
            id: SlotId::Persisted(record.id),
            session_id: record.session_id,
            set_number: record.set_number,
            reps: Some(record.reps),
            weight: record.weight,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposedSession {
    pub header: SessionHeader,
    /// Ascending by `set_number`, numbered `1..=len` without gaps.
    pub slots: Vec<SetSlot>,
}

impl ComposedSession {
    pub fn id(&self) -> SessionId {
        self.header.id
    }

    /// Index of the slot the user is working on: the first incomplete slot,
    /// or the last slot once everything is logged.
    pub fn active_slot_index(&self) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| !slot.completed())
            .or_else(|| self.slots.len().checked_sub(1))
    }

    pub fn completed_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.completed()).count()
    }

    pub fn logged_sets(&self) -> impl Iterator<Item = &SetSlot> {
        self.slots.iter().filter(|slot| slot.completed())
    }

    pub fn max_set_number(&self) -> u32 {
        self.slots.last().map(|slot| slot.set_number).unwrap_or(0)
    }
}

/// What the user typed into a weight field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WeightInput {
    /// No weight applies (body-weight movement).
    BodyWeight,
    /// The field was left blank.
    Empty,
    Value(f64),
}

impl From<Option<f64>> for WeightInput {
    fn from(weight: Option<f64>) -> Self {
        match weight {
            Some(w) => Self::Value(w),
            None => Self::BodyWeight,
        }
    }
}

/// Values committed from a slot's input fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SetInput {
    /// `None` when the reps field is empty.
    pub reps: Option<i64>,
    pub weight: WeightInput,
}

impl SetInput {
    pub fn new(reps: i64, weight: WeightInput) -> Self {
        Self {
            reps: Some(reps),
            weight,
        }
    }

    pub fn weighted(reps: i64, weight: f64) -> Self {
        Self::new(reps, WeightInput::Value(weight))
    }

    pub fn body_weight(reps: i64) -> Self {
        Self::new(reps, WeightInput::BodyWeight)
    }

    pub fn cleared() -> Self {
        Self {
            reps: None,
            weight: WeightInput::Empty,
        }
    }

    pub fn has_positive_reps(&self) -> bool {
        matches!(self.reps, Some(r) if r > 0)
    }
}

impl From<&SetSlot> for SetInput {
    fn from(slot: &SetSlot) -> Self {
        Self {
            reps: slot.reps.map(i64::from),
            weight: slot.weight.into(),
        }
    }
}
