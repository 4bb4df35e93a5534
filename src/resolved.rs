//! Resolved stat results module.
//!
//! Contains the `ResolvedStat` type, a fully resolved stat value with the
//! breakdown of everything that contributed to it. Breakdowns exist for
//! display and debugging; nothing recomputes from them.

use crate::numeric::StatValue;
use crate::stat::Stat;
use serde::{Deserialize, Serialize};

/// A resolved stat value with full breakdown information.
///
/// # Examples
///
/// ```rust
/// use riftcore::{ResolvedStat, Stat};
///
/// let mut resolved = ResolvedStat::new(Stat::Armor, 0.0);
/// resolved.add_source("base armor", 10.0);
/// resolved.add_source("helmet base", 30.0);
/// resolved.add_transform("increased by increased_armor", 60.0);
/// resolved.value = 60.0;
///
/// assert_eq!(resolved.base_value(), 40.0);
/// assert_eq!(resolved.transforms.len(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResolvedStat {
    /// The stat bucket.
    pub stat: Stat,

    /// The final resolved value.
    pub value: StatValue,

    /// Each entry is `(source_description, value)`, in registration order.
    pub sources: Vec<(String, StatValue)>,

    /// Each entry is `(transform_description, value_after_transform)`,
    /// in application order.
    pub transforms: Vec<(String, StatValue)>,
}

impl ResolvedStat {
    /// Create a new `ResolvedStat` with an empty breakdown.
    pub fn new(stat: Stat, value: StatValue) -> Self {
        Self {
            stat,
            value,
            sources: Vec::new(),
            transforms: Vec::new(),
        }
    }

    /// Add a source contribution to the breakdown.
    pub fn add_source(&mut self, description: impl Into<String>, value: StatValue) {
        self.sources.push((description.into(), value));
    }

    /// Add a transform application to the breakdown.
    pub fn add_transform(&mut self, description: impl Into<String>, value: StatValue) {
        self.transforms.push((description.into(), value));
    }

    /// Sum of all sources, before any transform.
    pub fn base_value(&self) -> StatValue {
        self.sources.iter().map(|(_, value)| value).sum()
    }
}
