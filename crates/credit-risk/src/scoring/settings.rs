//! Administrator overrides for weights and covenant targets, merged with built-in defaults.
//!
//! The override document is loosely typed: any field may be missing, null, or hold
//! something other than a number. It is parsed leniently into [`RiskOverrides`] and
//! then resolved into a fully-populated [`ResolvedSettings`]; scoring formulas only
//! ever see the resolved record.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::domain::CovenantRatio;
use super::lenient::{finite_number, finite_number_map, lenient};

/// Outer weights, renormalized over the components that had input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComponentWeights {
    pub covenant: f64,
    pub trend: f64,
    pub benchmark: f64,
    pub maturity: f64,
    pub size: f64,
    pub scale: f64,
}

impl Default for ComponentWeights {
    fn default() -> Self {
        Self {
            covenant: 0.35,
            trend: 0.20,
            benchmark: 0.15,
            maturity: 0.10,
            size: 0.10,
            scale: 0.10,
        }
    }
}

/// Covenant category weights. Applied verbatim; they are expected to sum to 1.0
/// but nothing enforces it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CovenantWeights {
    pub liquidity: f64,
    pub solvency: f64,
    pub profitability: f64,
    pub efficiency: f64,
}

impl Default for CovenantWeights {
    fn default() -> Self {
        Self {
            liquidity: 0.30,
            solvency: 0.30,
            profitability: 0.25,
            efficiency: 0.15,
        }
    }
}

/// One threshold per covenant ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CovenantTargets {
    values: [f64; CovenantRatio::COUNT],
}

impl CovenantTargets {
    pub fn get(&self, ratio: CovenantRatio) -> f64 {
        self.values[ratio.index()]
    }

    pub fn set(&mut self, ratio: CovenantRatio, target: f64) {
        self.values[ratio.index()] = target;
    }
}

impl Default for CovenantTargets {
    fn default() -> Self {
        let mut values = [0.0; CovenantRatio::COUNT];
        for ratio in CovenantRatio::ALL {
            values[ratio.index()] = ratio.default_target();
        }
        Self { values }
    }
}

/// Fully-populated settings consumed by the scorers and the aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ResolvedSettings {
    pub components: ComponentWeights,
    pub covenant: CovenantWeights,
    pub targets: CovenantTargets,
}

impl ResolvedSettings {
    /// Merge overrides over the defaults. `None` is equivalent to an empty override.
    pub fn resolve(overrides: Option<&RiskOverrides>) -> Self {
        let mut resolved = Self::default();
        let Some(overrides) = overrides else {
            return resolved;
        };

        let components = &overrides.weights.components;
        let defaults = resolved.components;
        resolved.components = ComponentWeights {
            covenant: pick(components.covenant, defaults.covenant),
            trend: pick(components.trend, defaults.trend),
            benchmark: pick(components.benchmark, defaults.benchmark),
            maturity: pick(components.maturity, defaults.maturity),
            size: pick(components.size, defaults.size),
            scale: pick(components.scale, defaults.scale),
        };

        let covenant = &overrides.weights.covenant;
        let defaults = resolved.covenant;
        resolved.covenant = CovenantWeights {
            liquidity: pick(covenant.liquidity, defaults.liquidity),
            solvency: pick(covenant.solvency, defaults.solvency),
            profitability: pick(covenant.profitability, defaults.profitability),
            efficiency: pick(covenant.efficiency, defaults.efficiency),
        };

        for (name, target) in &overrides.targets {
            match CovenantRatio::from_name(name) {
                Some(ratio) if target.is_finite() => resolved.targets.set(ratio, *target),
                Some(_) => {}
                None => debug!(target_name = %name, "ignoring override for unknown covenant ratio"),
            }
        }

        resolved
    }
}

fn pick(candidate: Option<f64>, default: f64) -> f64 {
    candidate.filter(|value| value.is_finite()).unwrap_or(default)
}

/// Parsed administrator override document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RiskOverrides {
    #[serde(default, deserialize_with = "lenient")]
    pub weights: WeightOverrides,
    #[serde(default, deserialize_with = "finite_number_map")]
    pub targets: BTreeMap<String, f64>,
}

impl RiskOverrides {
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WeightOverrides {
    #[serde(default, deserialize_with = "lenient")]
    pub components: ComponentWeightOverrides,
    #[serde(default, deserialize_with = "lenient")]
    pub covenant: CovenantWeightOverrides,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ComponentWeightOverrides {
    #[serde(default, deserialize_with = "finite_number")]
    pub covenant: Option<f64>,
    #[serde(default, deserialize_with = "finite_number")]
    pub trend: Option<f64>,
    #[serde(default, alias = "abs", deserialize_with = "finite_number")]
    pub benchmark: Option<f64>,
    #[serde(default, deserialize_with = "finite_number")]
    pub maturity: Option<f64>,
    #[serde(default, deserialize_with = "finite_number")]
    pub size: Option<f64>,
    #[serde(default, deserialize_with = "finite_number")]
    pub scale: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CovenantWeightOverrides {
    #[serde(default, deserialize_with = "finite_number")]
    pub liquidity: Option<f64>,
    #[serde(default, deserialize_with = "finite_number")]
    pub solvency: Option<f64>,
    #[serde(default, deserialize_with = "finite_number")]
    pub profitability: Option<f64>,
    #[serde(default, deserialize_with = "finite_number")]
    pub efficiency: Option<f64>,
}
