use serde::{Deserialize, Serialize};

use crate::model::{Equipment, SetInput, WeightInput};
use crate::CoreError;

/// What to store when an equipment exercise is committed without a weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyWeightPolicy {
    /// Store a weight of 0.
    #[default]
    Zero,
    /// Refuse the write until a weight is entered.
    Reject,
}

/// The storage effect of committing a slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SetWrite {
    Upsert { reps: u32, weight: Option<f64> },
    /// Remove any stored row, turning the slot back into a phantom.
    Delete,
}

/// Decide how a committed slot maps onto storage.
///
/// A row exists iff reps are positive. Body-weight exercises never store a
/// weight; equipment exercises always do.
pub fn decide(
    input: &SetInput,
    equipment: Equipment,
    policy: EmptyWeightPolicy,
) -> Result<SetWrite, CoreError> {
    let reps = match input.reps {
        Some(r) if r > 0 => u32::try_from(r).map_err(|_| CoreError::RepsOutOfRange(r))?,
        _ => return Ok(SetWrite::Delete),
    };

    if equipment.is_body_weight() {
        return Ok(SetWrite::Upsert { reps, weight: None });
    }

    let weight = match input.weight {
        WeightInput::Value(w) if w.is_finite() && w >= 0.0 => w,
        WeightInput::Value(w) => return Err(CoreError::InvalidWeight(w)),
        WeightInput::Empty | WeightInput::BodyWeight => match policy {
            EmptyWeightPolicy::Zero => 0.0,
            EmptyWeightPolicy::Reject => {
                return Err(CoreError::WeightRequired(equipment.to_string()));
            }
        },
    };

    Ok(SetWrite::Upsert {
        reps,
        weight: Some(weight),
    })
}
