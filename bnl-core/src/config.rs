//! Evaluation configuration

use crate::error::{EvalError, Result, ValueError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default configuration constants
pub mod defaults {
    /// Boundary tolerance windows in seconds
    pub const TOLERANCES: [f64; 2] = [0.5, 3.0];

    /// Frame hop for label agreement in seconds
    pub const HOP: f64 = 0.1;

    /// Match only interior boundaries
    pub const TRIM_ENDPOINTS: bool = true;
}

/// Settings shared by every comparison an [`Evaluator`](crate::Evaluator) runs
///
/// Loaded from TOML with every key optional:
///
/// ```toml
/// tolerances = [0.5, 3.0]
/// hop = 0.1
/// trim_endpoints = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvaluationConfig {
    pub(crate) tolerances: Vec<f64>,
    pub(crate) hop: f64,
    pub(crate) trim_endpoints: bool,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            tolerances: defaults::TOLERANCES.to_vec(),
            hop: defaults::HOP,
            trim_endpoints: defaults::TRIM_ENDPOINTS,
        }
    }
}

impl EvaluationConfig {
    /// Create a configuration builder
    pub fn builder() -> EvaluationConfigBuilder {
        EvaluationConfigBuilder::default()
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| EvalError::Configuration(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            EvalError::Configuration(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Boundary tolerance windows, in evaluation order
    pub fn tolerances(&self) -> &[f64] {
        &self.tolerances
    }

    /// Frame hop for label agreement
    pub fn hop(&self) -> f64 {
        self.hop
    }

    /// Whether span endpoints are excluded from boundary matching
    pub fn trim_endpoints(&self) -> bool {
        self.trim_endpoints
    }

    /// Validate the configuration
    pub(crate) fn validate(&self) -> Result<()> {
        if self.tolerances.is_empty() {
            return Err(EvalError::Configuration("at least one tolerance is required".into()));
        }

        if let Some(&tolerance) = self
            .tolerances
            .iter()
            .find(|t| !(t.is_finite() && **t >= 0.0))
        {
            return Err(ValueError::InvalidTolerance { tolerance }.into());
        }

        if !(self.hop.is_finite() && self.hop > 0.0) {
            return Err(ValueError::NonPositiveHop { hop: self.hop }.into());
        }

        Ok(())
    }
}

/// Fluent builder for [`EvaluationConfig`]
#[derive(Debug, Default)]
pub struct EvaluationConfigBuilder {
    tolerances: Option<Vec<f64>>,
    hop: Option<f64>,
    trim_endpoints: Option<bool>,
}

impl EvaluationConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the tolerance windows
    pub fn tolerances(mut self, tolerances: impl Into<Vec<f64>>) -> Self {
        self.tolerances = Some(tolerances.into());
        self
    }

    /// Set the frame hop
    pub fn hop(mut self, hop: f64) -> Self {
        self.hop = Some(hop);
        self
    }

    /// Include or exclude span endpoints in boundary matching
    pub fn trim_endpoints(mut self, trim: bool) -> Self {
        self.trim_endpoints = Some(trim);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<EvaluationConfig> {
        let mut config = EvaluationConfig::default();

        if let Some(tolerances) = self.tolerances {
            config.tolerances = tolerances;
        }

        if let Some(hop) = self.hop {
            config.hop = hop;
        }

        if let Some(trim) = self.trim_endpoints {
            config.trim_endpoints = trim;
        }

        config.validate()?;
        Ok(config)
    }
}
