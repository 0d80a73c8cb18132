use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! uuid_id {
    ($name:ident) => {
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn from_bytes(bytes: [u8; 16]) -> Self {
                Self(Uuid::from_bytes(bytes))
            }

            pub fn as_bytes(&self) -> &[u8; 16] {
                self.0.as_bytes()
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), &self.0.to_string()[..8])
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

uuid_id!(UserId);
uuid_id!(ExerciseId);
uuid_id!(RoutineId);
uuid_id!(RoutineDayId);
uuid_id!(SessionId);
uuid_id!(SetId);

/// Identity of a slot in a composed session.
///
/// Persisted slots carry the id of their stored row. Phantom slots have no row
/// yet and are identified by their position, which keeps them disjoint from
/// every stored id.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotId {
    Persisted(SetId),
    Phantom { session_id: SessionId, set_number: u32 },
}

impl SlotId {
    pub fn is_phantom(&self) -> bool {
        matches!(self, Self::Phantom { .. })
    }

    pub fn set_id(&self) -> Option<SetId> {
        match self {
            Self::Persisted(id) => Some(*id),
            Self::Phantom { .. } => None,
        }
    }
}

impl fmt::Debug for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Persisted(id) => write!(f, "Slot({id:?})"),
            Self::Phantom { session_id, set_number } => {
                write!(f, "Slot(phantom {session_id:?} #{set_number})")
            }
        }
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Persisted(id) => write!(f, "{id}"),
            Self::Phantom { session_id, set_number } => {
                write!(f, "temp-{session_id}-{set_number}")
            }
        }
    }
}
