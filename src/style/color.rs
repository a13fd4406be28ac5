use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgba8;
use crate::foundation::error::{HeatmapError, HeatmapResult};
use crate::foundation::math::{clamp01, lerp_u8};

/// Built-in sequential palettes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Palette {
    Inferno,
    Magma,
    Viridis,
    Plasma,
    Reds,
    Blues,
    Ice,
}

const INFERNO: &[u32] = &[
    0x000004, 0x1b0c41, 0x4a0c6b, 0x781c6d, 0xa52c60, 0xcf4446, 0xed6925, 0xfb9b06, 0xf7d13d,
    0xfcffa4,
];
const MAGMA: &[u32] = &[
    0x000004, 0x180f3d, 0x440f76, 0x721f81, 0x9e2f7f, 0xcd4071, 0xf1605d, 0xfd9668, 0xfeca8d,
    0xfcfdbf,
];
const VIRIDIS: &[u32] = &[
    0x440154, 0x482878, 0x3e4989, 0x31688e, 0x26828e, 0x1f9e89, 0x35b779, 0x6ece58, 0xb5de2b,
    0xfde725,
];
const PLASMA: &[u32] = &[
    0x0d0887, 0x41049d, 0x6a00a8, 0x8f0da4, 0xb12a90, 0xcc4778, 0xe16462, 0xf2844b, 0xfca636,
    0xf0f921,
];
const REDS: &[u32] = &[
    0xfff5f0, 0xfee0d2, 0xfcbba1, 0xfc9272, 0xfb6a4a, 0xef3b2c, 0xcb181d, 0xa50f15, 0x67000d,
];
const BLUES: &[u32] = &[
    0xf7fbff, 0xdeebf7, 0xc6dbef, 0x9ecae1, 0x6baed6, 0x4292c6, 0x2171b5, 0x08519c, 0x08306b,
];
const ICE: &[u32] = &[0x0b1d3a, 0x1f4e89, 0x3a86c8, 0x7fc2e8, 0xe8f6ff];

impl Palette {
    pub const ALL: [Palette; 7] = [
        Palette::Inferno,
        Palette::Magma,
        Palette::Viridis,
        Palette::Plasma,
        Palette::Reds,
        Palette::Blues,
        Palette::Ice,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Inferno => "inferno",
            Self::Magma => "magma",
            Self::Viridis => "viridis",
            Self::Plasma => "plasma",
            Self::Reds => "reds",
            Self::Blues => "blues",
            Self::Ice => "ice",
        }
    }

    pub fn stops(self) -> Vec<Rgba8> {
        let table = match self {
            Self::Inferno => INFERNO,
            Self::Magma => MAGMA,
            Self::Viridis => VIRIDIS,
            Self::Plasma => PLASMA,
            Self::Reds => REDS,
            Self::Blues => BLUES,
            Self::Ice => ICE,
        };
        table
            .iter()
            .map(|&c| Rgba8::rgb((c >> 16) as u8, (c >> 8) as u8, c as u8))
            .collect()
    }
}

impl FromStr for Palette {
    type Err = HeatmapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| HeatmapError::config(format!("unknown palette \"{s}\"")))
    }
}

/// Continuous color scale over a normalized input `t` in `[0, 1]`.
#[derive(Clone)]
pub enum ColorScale {
    /// Evenly spaced stops, linearly interpolated per channel.
    Stops(Arc<[Rgba8]>),
    /// Caller-provided mapping.
    Custom(Arc<dyn Fn(f64) -> Rgba8 + Send + Sync>),
}

impl ColorScale {
    pub fn palette(p: Palette) -> Self {
        Self::Stops(p.stops().into())
    }

    pub fn from_stops(stops: Vec<Rgba8>) -> HeatmapResult<Self> {
        if stops.len() < 2 {
            return Err(HeatmapError::config("a color scale needs at least two stops"));
        }
        Ok(Self::Stops(stops.into()))
    }

    pub fn from_fn(f: impl Fn(f64) -> Rgba8 + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(f))
    }

    /// Color at normalized position `t` (clamped).
    pub fn sample(&self, t: f64) -> Rgba8 {
        let t = if t.is_nan() { 0.0 } else { clamp01(t) };
        match self {
            Self::Custom(f) => f(t),
            Self::Stops(stops) => {
                let Some(last) = stops.len().checked_sub(1) else {
                    return Rgba8 { r: 0, g: 0, b: 0, a: 0 };
                };
                let pos = t * last as f64;
                let i = (pos.floor() as usize).min(last.saturating_sub(1));
                let f = pos - i as f64;
                let (a, b) = (stops[i], stops[(i + 1).min(last)]);
                Rgba8 {
                    r: lerp_u8(a.r, b.r, f),
                    g: lerp_u8(a.g, b.g, f),
                    b: lerp_u8(a.b, b.b, f),
                    a: lerp_u8(a.a, b.a, f),
                }
            }
        }
    }

    /// Color for a raw `value` over the domain `[0, max_value]`.
    pub fn eval(&self, value: f64, max_value: f64) -> Rgba8 {
        if max_value <= 0.0 {
            return self.sample(0.0);
        }
        self.sample(value / max_value)
    }
}

impl Default for ColorScale {
    fn default() -> Self {
        Self::palette(Palette::Inferno)
    }
}

impl std::fmt::Debug for ColorScale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stops(s) => f.debug_tuple("Stops").field(&s.len()).finish(),
            Self::Custom(_) => f.write_str("Custom"),
        }
    }
}

/// Serialized form of a color scale: a palette name or a list of hex stops.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorScaleSpec {
    Named(String),
    Stops(Vec<String>),
}

impl Default for ColorScaleSpec {
    fn default() -> Self {
        Self::Named(Palette::Inferno.name().to_owned())
    }
}

impl ColorScaleSpec {
    pub fn resolve(&self) -> HeatmapResult<ColorScale> {
        match self {
            Self::Named(name) => Ok(ColorScale::palette(name.parse()?)),
            Self::Stops(stops) => {
                let stops = stops
                    .iter()
                    .map(|s| parse_hex(s).map_err(HeatmapError::config))
                    .collect::<HeatmapResult<Vec<_>>>()?;
                ColorScale::from_stops(stops)
            }
        }
    }
}

/// Parse `#RRGGBB` or `#RRGGBBAA` (the `#` is optional).
pub fn parse_hex(s: &str) -> Result<Rgba8, String> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    if !s.is_ascii() {
        return Err("hex color must be ASCII".to_owned());
    }
    match s.len() {
        6 => Ok(Rgba8::rgb(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
        )),
        8 => Ok(Rgba8 {
            r: hex_byte(&s[0..2])?,
            g: hex_byte(&s[2..4])?,
            b: hex_byte(&s[4..6])?,
            a: hex_byte(&s[6..8])?,
        }),
        _ => Err("hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)".to_owned()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/color.rs"]
mod tests;
