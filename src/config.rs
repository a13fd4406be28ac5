use std::path::Path;
use std::time::Duration;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::animation::ease::Ease;
use crate::density::grid::DensityParams;
use crate::foundation::core::RenderDimensions;
use crate::foundation::error::{HeatmapError, HeatmapResult};
use crate::render::driver::AnimationSettings;
use crate::style::color::ColorScaleSpec;
use crate::style::paint::{
    DEFAULT_MAX_OPACITY, DEFAULT_MIN_OPACITY, DEFAULT_THRESHOLD, HeatmapStyle,
};

/// Options of a density layer. Every key is optional in JSON (camelCase).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct DensityConfig {
    /// Grid cells per real-world unit.
    pub grid_resolution: f64,
    /// Kernel bandwidth in real-world units.
    pub bandwidth: f64,
    pub threshold: f64,
    pub min_opacity: f64,
    pub max_opacity: f64,
    pub animate: bool,
    pub animation_duration_ms: u64,
    pub easing: String,
    pub color_scale: ColorScaleSpec,
    /// `None` evaluates the kernel everywhere.
    pub kernel_cutoff_sigmas: Option<f64>,
    pub parallel: bool,
    /// Take weights from the records' `weight` field instead of counting each record once.
    pub use_record_weight: bool,
}

impl Default for DensityConfig {
    fn default() -> Self {
        Self {
            grid_resolution: 2.0,
            bandwidth: 5.0,
            threshold: DEFAULT_THRESHOLD,
            min_opacity: DEFAULT_MIN_OPACITY,
            max_opacity: DEFAULT_MAX_OPACITY,
            animate: true,
            animation_duration_ms: 500,
            easing: Ease::default().name().to_owned(),
            color_scale: ColorScaleSpec::default(),
            kernel_cutoff_sigmas: Some(3.0),
            parallel: true,
            use_record_weight: false,
        }
    }
}

impl DensityConfig {
    pub fn from_json_str(s: &str) -> HeatmapResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> HeatmapResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Reject values the renderer has no meaning for.
    pub fn validate(&self) -> HeatmapResult<()> {
        if !self.grid_resolution.is_finite() || self.grid_resolution <= 0.0 {
            return Err(HeatmapError::config("gridResolution must be finite and > 0"));
        }
        if !self.bandwidth.is_finite() || self.bandwidth <= 0.0 {
            return Err(HeatmapError::config("bandwidth must be finite and > 0"));
        }
        for (name, v) in [
            ("threshold", self.threshold),
            ("minOpacity", self.min_opacity),
            ("maxOpacity", self.max_opacity),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(HeatmapError::config(format!("{name} must be in [0, 1]")));
            }
        }
        if self.min_opacity > self.max_opacity {
            return Err(HeatmapError::config("minOpacity must be <= maxOpacity"));
        }
        if let Some(c) = self.kernel_cutoff_sigmas
            && (!c.is_finite() || c <= 0.0)
        {
            return Err(HeatmapError::config(
                "kernelCutoffSigmas must be finite and > 0 (or null)",
            ));
        }
        self.color_scale.resolve()?;
        Ok(())
    }

    pub fn style(&self) -> HeatmapResult<HeatmapStyle> {
        Ok(HeatmapStyle {
            threshold: self.threshold,
            min_opacity: self.min_opacity,
            max_opacity: self.max_opacity,
            color_scale: self.color_scale.resolve()?,
        })
    }

    pub fn animation(&self) -> AnimationSettings {
        AnimationSettings {
            enabled: self.animate,
            duration: Duration::from_millis(self.animation_duration_ms),
            ease: Ease::from_name(&self.easing),
        }
    }

    pub fn density_params(&self, dims: &RenderDimensions) -> DensityParams {
        DensityParams {
            bandwidth: self.bandwidth,
            grid_resolution: self.grid_resolution,
            scale: dims.scale,
            width: dims.canvas_width(),
            height: dims.canvas_height(),
            kernel_cutoff_sigmas: self.kernel_cutoff_sigmas,
            parallel: self.parallel,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
