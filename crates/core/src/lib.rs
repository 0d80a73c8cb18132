pub mod clock;
pub mod compose;
pub mod error;
pub mod ids;
pub mod model;
pub mod optimistic;
pub mod order;
pub mod prefill;
pub mod set_policy;

pub use clock::{Clock, ManualClock, SystemClock, TimestampMs};
pub use error::CoreError;
pub use ids::*;
pub use model::*;
pub use optimistic::Optimistic;
pub use set_policy::{EmptyWeightPolicy, SetWrite};
