use std::f64::consts::PI;

/// Easing curves for the progressive reveal, addressed by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    InSine,
    OutSine,
    InOutSine,
    OutExpo,
}

impl Ease {
    pub const ALL: [Ease; 11] = [
        Ease::Linear,
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::InCubic,
        Ease::OutCubic,
        Ease::InOutCubic,
        Ease::InSine,
        Ease::OutSine,
        Ease::InOutSine,
        Ease::OutExpo,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::InQuad => "quadIn",
            Self::OutQuad => "quadOut",
            Self::InOutQuad => "quadInOut",
            Self::InCubic => "cubicIn",
            Self::OutCubic => "cubicOut",
            Self::InOutCubic => "cubicInOut",
            Self::InSine => "sinIn",
            Self::OutSine => "sinOut",
            Self::InOutSine => "sinInOut",
            Self::OutExpo => "expOut",
        }
    }

    /// Look up a curve by name (case-insensitive, `ease` prefix optional).
    pub fn lookup(name: &str) -> Option<Self> {
        let trimmed = name.trim();
        let bare = trimmed
            .strip_prefix("ease")
            .or_else(|| trimmed.strip_prefix("Ease"))
            .unwrap_or(trimmed);
        Self::ALL
            .into_iter()
            .find(|e| e.name().eq_ignore_ascii_case(bare))
    }

    /// Like [`Ease::lookup`], falling back to [`Ease::Linear`] with a warning.
    pub fn from_name(name: &str) -> Self {
        Self::lookup(name).unwrap_or_else(|| {
            tracing::warn!(easing = name, "unknown easing, falling back to linear");
            Self::Linear
        })
    }

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
            Self::InSine => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - (t * PI / 2.0).cos()
                }
            }
            Self::OutSine => (t * PI / 2.0).sin(),
            Self::InOutSine => {
                if t >= 1.0 {
                    1.0
                } else {
                    (1.0 - (PI * t).cos()) / 2.0
                }
            }
            Self::OutExpo => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2f64.powf(-10.0 * t)
                }
            }
        }
    }
}

impl Default for Ease {
    fn default() -> Self {
        Self::OutCubic
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
