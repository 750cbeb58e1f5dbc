//! Pipeline configuration

use crate::color::ColorSpec;
use lowpoly_core::{Error, Result};
use lowpoly_io::ObjReadOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default grid cell size, in mesh units
pub const DEFAULT_FACTOR: f64 = 7.5;
/// Cell sizes at or below this are replaced by [`CLAMPED_FACTOR`]
pub const MIN_FACTOR: f64 = 0.1;
/// Cell size used when the requested one is too small
pub const CLAMPED_FACTOR: f64 = 0.5;
/// Default number of smoothing passes
pub const DEFAULT_ROUNDING: u32 = 1;

/// Configuration for the low-poly pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LowPolyConfig {
    /// Grid cell size used for decimation; larger means coarser facets
    pub factor: f64,
    /// Number of Laplacian smoothing passes
    pub rounding: u32,
    /// Relaxation factor of each smoothing pass, in (0, 1]
    pub lambda: f64,
    /// How fragment colors are chosen
    pub color: ColorSpec,
    /// Drop malformed mesh lines instead of failing the fragment
    pub skip_malformed_lines: bool,
    /// Process fragments on the rayon thread pool
    pub parallel: bool,
    /// Output object name
    pub name: Option<String>,
}

impl Default for LowPolyConfig {
    fn default() -> Self {
        Self {
            factor: DEFAULT_FACTOR,
            rounding: DEFAULT_ROUNDING,
            lambda: lowpoly_simplification::DEFAULT_LAMBDA,
            color: ColorSpec::Default,
            skip_malformed_lines: false,
            parallel: true,
            name: None,
        }
    }
}

impl LowPolyConfig {
    /// Set the grid cell size
    pub fn with_factor(mut self, factor: f64) -> Self {
        self.factor = factor;
        self
    }

    /// Set the number of smoothing passes
    pub fn with_rounding(mut self, rounding: u32) -> Self {
        self.rounding = rounding;
        self
    }

    /// Set the smoothing relaxation factor
    pub fn with_lambda(mut self, lambda: f64) -> Self {
        self.lambda = lambda;
        self
    }

    /// Set the color policy
    pub fn with_color(mut self, color: ColorSpec) -> Self {
        self.color = color;
        self
    }

    /// Enable or disable lenient mesh parsing
    pub fn with_skip_malformed_lines(mut self, skip: bool) -> Self {
        self.skip_malformed_lines = skip;
        self
    }

    /// Enable or disable parallel fragment processing
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the output object name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Clamp the cell size and check the smoothing factor.
    ///
    /// A cell size that is not finite or not above [`MIN_FACTOR`] becomes
    /// [`CLAMPED_FACTOR`]. A lambda outside (0, 1] is rejected.
    pub fn validated(mut self) -> Result<Self> {
        if !(self.factor.is_finite() && self.factor > MIN_FACTOR) {
            log::warn!(
                "factor {} is too small, using {} instead",
                self.factor,
                CLAMPED_FACTOR
            );
            self.factor = CLAMPED_FACTOR;
        }
        if !(self.lambda > 0.0 && self.lambda <= 1.0) {
            return Err(Error::InvalidParameter(format!(
                "lambda must lie in (0, 1], got {}",
                self.lambda
            )));
        }
        Ok(self)
    }

    /// Mesh parsing options derived from this configuration
    pub fn read_options(&self) -> ObjReadOptions {
        ObjReadOptions {
            skip_malformed_lines: self.skip_malformed_lines,
        }
    }

    /// Parse a configuration from TOML text; missing keys keep their defaults
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load configuration from a TOML file
    pub fn load_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
