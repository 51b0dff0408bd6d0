use serde::{Deserialize, Serialize};

use super::ElementType;

/// How a move deals damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DamageClass {
    Physical,
    Special,
    Status,
}

/// A learnable move.
///
/// `accuracy` is a probability in `[0.0, 1.0]`. Moves that never miss carry `1.0`.
/// Status moves usually have `power == 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Move {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub ty: ElementType,
    pub damage_class: DamageClass,
    #[serde(default)]
    pub power: u32,
    #[serde(default = "default_accuracy")]
    pub accuracy: f64,
    #[serde(default)]
    pub pp: u32,
    #[serde(default)]
    pub priority: i8,
}

fn default_accuracy() -> f64 {
    1.0
}

impl Move {
    /// Returns `true` if the move can deal direct damage.
    #[must_use]
    pub fn is_damaging(&self) -> bool {
        self.damage_class != DamageClass::Status && self.power > 0
    }

    /// Power weighted by the chance to hit.
    #[must_use]
    pub fn expected_power(&self) -> f64 {
        f64::from(self.power) * self.accuracy
    }
}
