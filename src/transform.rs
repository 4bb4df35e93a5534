//! Stat transforms module.
//!
//! Transforms modify stat values after sources are collected.
//! Transforms can read other stats (dependencies) and must declare
//! them explicitly via `depends_on()`; the resolver uses those
//! declarations to order resolution.

use crate::error::EngineError;
use crate::numeric::{increased_multiplier, per_step, StatValue};
use crate::stat::Stat;
use std::collections::HashMap;

/// Phase for transform application order.
///
/// Transforms on one stat are applied in phase order; within a phase,
/// in registration order. Additive buckets always land before any
/// multiplier, and caps always land last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TransformPhase {
    /// Flat additions derived from other stats.
    Additive,
    /// Percent-increase multipliers.
    Multiplicative,
    /// Caps and floors.
    Final,
}

/// Trait for stat transforms that modify stat values.
///
/// # Examples
///
/// ```rust
/// use riftcore::transform::{PerStepTransform, StatTransform};
/// use riftcore::Stat;
/// use std::collections::HashMap;
///
/// // +2 per 5 strength
/// let transform = PerStepTransform::new(Stat::Strength, 5.0, 2.0);
/// let mut deps = HashMap::new();
/// deps.insert(Stat::Strength, 12.0);
///
/// assert_eq!(transform.apply(10.0, &deps).unwrap(), 14.0);
/// ```
pub trait StatTransform: Send + Sync {
    /// Stats that must be resolved before this transform can be applied.
    fn depends_on(&self) -> Vec<Stat>;

    /// The phase this transform belongs to.
    fn phase(&self) -> TransformPhase {
        TransformPhase::Additive
    }

    /// Apply the transform to the current value of its stat.
    fn apply(
        &self,
        input: StatValue,
        dependencies: &HashMap<Stat, StatValue>,
    ) -> Result<StatValue, EngineError>;

    /// Human-readable description for breakdowns.
    fn description(&self) -> String;
}

fn dependency(
    dependencies: &HashMap<Stat, StatValue>,
    stat: Stat,
) -> Result<StatValue, EngineError> {
    dependencies
        .get(&stat)
        .copied()
        .ok_or(EngineError::MissingDependency(stat))
}

/// Adds `amount` for every complete `step` points of another stat.
///
/// Attribute-derived bonuses are expressed this way: "+2% increased
/// physical damage per 5 strength" is
/// `PerStepTransform::new(Stat::Strength, 5.0, 2.0)` on
/// `Stat::IncreasedPhysical`.
#[derive(Debug, Clone)]
pub struct PerStepTransform {
    dependency: Stat,
    step: StatValue,
    amount: StatValue,
}

impl PerStepTransform {
    /// Create a new per-step transform.
    pub fn new(dependency: Stat, step: StatValue, amount: StatValue) -> Self {
        Self {
            dependency,
            step,
            amount,
        }
    }
}

impl StatTransform for PerStepTransform {
    fn depends_on(&self) -> Vec<Stat> {
        vec![self.dependency]
    }

    fn apply(
        &self,
        input: StatValue,
        dependencies: &HashMap<Stat, StatValue>,
    ) -> Result<StatValue, EngineError> {
        let total = dependency(dependencies, self.dependency)?;
        Ok(input + per_step(total, self.step) * self.amount)
    }

    fn description(&self) -> String {
        format!(
            "+{:.0} per {:.0} {}",
            self.amount, self.step, self.dependency
        )
    }
}

/// Adds another stat's value scaled by a factor.
///
/// Used to fold "all resistances" into each individual resistance.
#[derive(Debug, Clone)]
pub struct ScalingTransform {
    dependency: Stat,
    scale_factor: StatValue,
}

impl ScalingTransform {
    /// Create a new scaling transform.
    pub fn new(dependency: Stat, scale_factor: StatValue) -> Self {
        Self {
            dependency,
            scale_factor,
        }
    }
}

impl StatTransform for ScalingTransform {
    fn depends_on(&self) -> Vec<Stat> {
        vec![self.dependency]
    }

    fn apply(
        &self,
        input: StatValue,
        dependencies: &HashMap<Stat, StatValue>,
    ) -> Result<StatValue, EngineError> {
        Ok(input + dependency(dependencies, self.dependency)? * self.scale_factor)
    }

    fn description(&self) -> String {
        format!("scale({}, {:.2})", self.dependency, self.scale_factor)
    }
}

/// Multiplies by `1 + dependency / 100`, where the dependency is a
/// summed percent-increase bucket.
///
/// # Examples
///
/// ```rust
/// use riftcore::transform::{IncreasedByTransform, StatTransform};
/// use riftcore::Stat;
/// use std::collections::HashMap;
///
/// let transform = IncreasedByTransform::new(Stat::IncreasedArmor);
/// let mut deps = HashMap::new();
/// deps.insert(Stat::IncreasedArmor, 50.0);
///
/// assert_eq!(transform.apply(100.0, &deps).unwrap(), 150.0);
/// ```
#[derive(Debug, Clone)]
pub struct IncreasedByTransform {
    dependency: Stat,
}

impl IncreasedByTransform {
    /// Create a new percent-increase transform.
    pub fn new(dependency: Stat) -> Self {
        Self { dependency }
    }
}

impl StatTransform for IncreasedByTransform {
    fn depends_on(&self) -> Vec<Stat> {
        vec![self.dependency]
    }

    fn phase(&self) -> TransformPhase {
        TransformPhase::Multiplicative
    }

    fn apply(
        &self,
        input: StatValue,
        dependencies: &HashMap<Stat, StatValue>,
    ) -> Result<StatValue, EngineError> {
        Ok(input * increased_multiplier(dependency(dependencies, self.dependency)?))
    }

    fn description(&self) -> String {
        format!("increased by {}", self.dependency)
    }
}

/// A clamp transform that restricts values to a range.
///
/// Either bound can be `None` to indicate no limit in that direction.
///
/// # Examples
///
/// ```rust
/// use riftcore::transform::{ClampTransform, StatTransform};
/// use std::collections::HashMap;
///
/// let cap = ClampTransform::new(0.0, 75.0);
/// let deps = HashMap::new();
///
/// assert_eq!(cap.apply(140.0, &deps).unwrap(), 75.0);
/// assert_eq!(cap.apply(-20.0, &deps).unwrap(), 0.0);
/// assert_eq!(cap.apply(30.0, &deps).unwrap(), 30.0);
/// ```
#[derive(Debug, Clone)]
pub struct ClampTransform {
    /// Minimum allowed value (inclusive). `None` means no lower bound.
    pub min: Option<StatValue>,
    /// Maximum allowed value (inclusive). `None` means no upper bound.
    pub max: Option<StatValue>,
}

impl ClampTransform {
    /// Create a clamp with both bounds.
    pub fn new(min: StatValue, max: StatValue) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Create a clamp with only a minimum bound.
    pub fn with_min(min: StatValue) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }
}

impl StatTransform for ClampTransform {
    fn depends_on(&self) -> Vec<Stat> {
        Vec::new()
    }

    fn phase(&self) -> TransformPhase {
        TransformPhase::Final
    }

    fn apply(
        &self,
        input: StatValue,
        _dependencies: &HashMap<Stat, StatValue>,
    ) -> Result<StatValue, EngineError> {
        let mut result = input;
        if let Some(min) = self.min {
            result = result.max(min);
        }
        if let Some(max) = self.max {
            result = result.min(max);
        }
        Ok(result)
    }

    fn description(&self) -> String {
        match (self.min, self.max) {
            (Some(min), Some(max)) => format!("clamp({:.2}, {:.2})", min, max),
            (Some(min), None) => format!("clamp_min({:.2})", min),
            (None, Some(max)) => format!("clamp_max({:.2})", max),
            (None, None) => "clamp(none)".to_string(),
        }
    }
}
