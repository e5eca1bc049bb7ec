//! Filter parameters and the YAML pipeline description.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_RESOLUTION: u32 = 256;

fn check_threshold(name: &str, value: f32) -> Result<()> {
    // +inf is allowed, it means "every neighbor counts"
    if value.is_nan() || value < 0.0 {
        return Err(Error::InvalidParameter(format!(
            "{} must be >= 0, got {}",
            name, value
        )));
    }
    Ok(())
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelaxParams {
    pub kernel_radius: u32,
    pub iterations: u64,
    /// Neighbors farther than this (Euclidean, normalized RGB) from the center are ignored.
    pub reduction_threshold: f32,
}

impl Default for RelaxParams {
    fn default() -> Self {
        Self {
            kernel_radius: 4,
            iterations: 256 * 256 * 10,
            // sqrt(0.007), the same cutoff expressed for a squared metric
            reduction_threshold: 0.084,
        }
    }
}

impl RelaxParams {
    pub fn validate(&self) -> Result<()> {
        check_threshold("reduction_threshold", self.reduction_threshold)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeParams {
    pub threshold: f32,
}

impl Default for EdgeParams {
    fn default() -> Self {
        Self { threshold: 0.1 }
    }
}

impl EdgeParams {
    pub fn validate(&self) -> Result<()> {
        check_threshold("edge threshold", self.threshold)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThinParams {
    /// Number of single eight-element sweeps.
    pub repetitions: u32,
}

impl Default for ThinParams {
    fn default() -> Self {
        Self { repetitions: 4 }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SharpenParams {
    pub subtlety: f32,
    pub exponent: f32,
}

impl Default for SharpenParams {
    fn default() -> Self {
        Self {
            subtlety: 0.1,
            exponent: 1.2,
        }
    }
}

impl SharpenParams {
    pub fn validate(&self) -> Result<()> {
        check_threshold("subtlety", self.subtlety)?;
        if !self.exponent.is_finite() || self.exponent < 0.0 {
            return Err(Error::InvalidParameter(format!(
                "exponent must be finite and >= 0, got {}",
                self.exponent
            )));
        }
        Ok(())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinarizeParams {
    /// Mean channel intensity above which a pixel becomes foreground.
    pub threshold: f32,
}

impl Default for BinarizeParams {
    fn default() -> Self {
        Self { threshold: 0.5 }
    }
}

impl BinarizeParams {
    pub fn validate(&self) -> Result<()> {
        check_threshold("binarize threshold", self.threshold)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Stage {
    Relax(RelaxParams),
    SurfaceChange,
    EdgeMap(EdgeParams),
    Thin(ThinParams),
    Sharpen(SharpenParams),
    Binarize(BinarizeParams),
}

impl Stage {
    pub fn validate(&self) -> Result<()> {
        match self {
            Stage::Relax(params) => params.validate(),
            Stage::EdgeMap(params) => params.validate(),
            Stage::Sharpen(params) => params.validate(),
            Stage::Binarize(params) => params.validate(),
            Stage::SurfaceChange | Stage::Thin(_) => Ok(()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Working resolution the source is resized to.
    pub width: u32,
    pub height: u32,
    /// Nearest-neighbor magnification applied to the result.
    pub upscale: u32,
    pub stages: Vec<Stage>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_RESOLUTION,
            height: DEFAULT_RESOLUTION,
            upscale: 1,
            stages: vec![
                Stage::Relax(RelaxParams::default()),
                Stage::Sharpen(SharpenParams::default()),
            ],
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.upscale == 0 {
            return Err(Error::InvalidParameter("upscale must be >= 1".to_owned()));
        }
        if self.width.checked_mul(self.upscale).is_none()
            || self.height.checked_mul(self.upscale).is_none()
        {
            return Err(Error::InvalidParameter(format!(
                "upscale x{} overflows {}x{}",
                self.upscale, self.width, self.height
            )));
        }
        for stage in &self.stages {
            stage.validate()?;
        }
        Ok(())
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_yaml()?)?;
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let string = fs::read_to_string(path)?;
        Self::from_yaml(&string)
    }
}
