use crate::foundation::error::{ScrollFxError, ScrollFxResult};

/// Easing functions used to map normalized animation progress.
///
/// Serialized names follow the common `powerN.in/out/inOut` vocabulary (`power1` is quadratic,
/// `power2` cubic, `power3` quartic).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    /// Linear interpolation.
    #[serde(rename = "linear", alias = "none")]
    Linear,
    /// Quadratic ease-in.
    #[serde(rename = "power1.in")]
    InQuad,
    /// Quadratic ease-out.
    #[default]
    #[serde(rename = "power1.out", alias = "power1")]
    OutQuad,
    /// Quadratic ease-in/out.
    #[serde(rename = "power1.inOut")]
    InOutQuad,
    /// Cubic ease-in.
    #[serde(rename = "power2.in")]
    InCubic,
    /// Cubic ease-out.
    #[serde(rename = "power2.out", alias = "power2")]
    OutCubic,
    /// Cubic ease-in/out.
    #[serde(rename = "power2.inOut")]
    InOutCubic,
    /// Quartic ease-out.
    #[serde(rename = "power3.out", alias = "power3")]
    OutQuart,
}

impl Ease {
    /// Apply this easing function to normalized progress `t` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::OutQuart => 1.0 - (1.0 - t).powi(4),
        }
    }

    /// Every supported ease, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Linear,
        Self::InQuad,
        Self::OutQuad,
        Self::InOutQuad,
        Self::InCubic,
        Self::OutCubic,
        Self::InOutCubic,
        Self::OutQuart,
    ];
}

impl std::str::FromStr for Ease {
    type Err = ScrollFxError;

    fn from_str(s: &str) -> ScrollFxResult<Self> {
        serde_json::from_value(serde_json::Value::String(s.to_owned()))
            .map_err(|_| ScrollFxError::validation(format!("unknown ease '{s}'")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
