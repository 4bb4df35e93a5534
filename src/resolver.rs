//! Stat resolver module.
//!
//! Provides the `StatResolver` type, which collects sources and
//! transforms per stat, orders stats by their declared dependencies and
//! resolves them into a `ResolvedSheet`.
//!
//! A resolver holds no cache. It is built fresh for every aggregation
//! and dropped afterwards, so a resolved sheet can never be stale.

use crate::error::EngineError;
use crate::graph::StatGraph;
use crate::numeric::StatValue;
use crate::resolved::ResolvedStat;
use crate::source::StatSource;
use crate::stat::Stat;
use crate::transform::StatTransform;
use std::collections::{BTreeMap, HashMap};
use tracing::trace;

/// Collects sources and transforms and resolves them in dependency order.
///
/// Resolution of each stat:
/// 1. Sum all sources (additive)
/// 2. Apply transforms grouped by phase (additive, multiplicative, final),
///    registration order within a phase
///
/// # Examples
///
/// ```rust
/// use riftcore::resolver::StatResolver;
/// use riftcore::source::ConstantSource;
/// use riftcore::transform::{IncreasedByTransform, PerStepTransform};
/// use riftcore::Stat;
///
/// let mut resolver = StatResolver::new();
/// resolver.register_source(Stat::Dexterity, Box::new(ConstantSource::new("base", 10.0)));
/// resolver.register_source(Stat::Evasion, Box::new(ConstantSource::new("base", 100.0)));
/// resolver.register_transform(
///     Stat::IncreasedEvasion,
///     Box::new(PerStepTransform::new(Stat::Dexterity, 5.0, 2.0)),
/// );
/// resolver.register_transform(
///     Stat::Evasion,
///     Box::new(IncreasedByTransform::new(Stat::IncreasedEvasion)),
/// );
///
/// let sheet = resolver.resolve_all().unwrap();
/// assert_eq!(sheet.value(Stat::IncreasedEvasion), 4.0);
/// assert_eq!(sheet.value(Stat::Evasion), 104.0);
/// ```
pub struct StatResolver {
    /// Multiple sources per stat (additive).
    sources: HashMap<Stat, Vec<Box<dyn StatSource>>>,

    /// Transform chain per stat.
    transforms: HashMap<Stat, Vec<Box<dyn StatTransform>>>,
}

impl StatResolver {
    /// Create a new empty resolver.
    pub fn new() -> Self {
        Self {
            sources: HashMap::new(),
            transforms: HashMap::new(),
        }
    }

    /// Register a source for a stat. Multiple sources are summed.
    pub fn register_source(&mut self, stat: Stat, source: Box<dyn StatSource>) {
        self.sources.entry(stat).or_default().push(source);
    }

    /// Register a transform for a stat.
    pub fn register_transform(&mut self, stat: Stat, transform: Box<dyn StatTransform>) {
        self.transforms.entry(stat).or_default().push(transform);
    }

    /// Resolve every stat that has a source, a transform, or is depended on.
    ///
    /// Fails with `EngineError::Cycle` if transforms form a dependency
    /// cycle.
    pub fn resolve_all(&self) -> Result<ResolvedSheet, EngineError> {
        let graph = self.build_graph();
        let order = graph.topological_sort()?;

        let mut resolved: BTreeMap<Stat, ResolvedStat> = BTreeMap::new();
        for stat in order {
            let stat_resolved = self.resolve_stat_internal(stat, &resolved)?;
            trace!(stat = %stat, value = stat_resolved.value, "resolved stat");
            resolved.insert(stat, stat_resolved);
        }

        Ok(ResolvedSheet { stats: resolved })
    }

    fn build_graph(&self) -> StatGraph {
        let mut graph = StatGraph::new();

        // Sorted so node order, and therefore toposort order, is stable.
        let mut stats: Vec<Stat> = self
            .sources
            .keys()
            .chain(self.transforms.keys())
            .copied()
            .collect();
        stats.sort();
        stats.dedup();

        for stat in stats {
            graph.add_node(stat);
            if let Some(transforms) = self.transforms.get(&stat) {
                for transform in transforms {
                    for dep in transform.depends_on() {
                        graph.add_edge(stat, dep);
                    }
                }
            }
        }

        graph
    }

    fn resolve_stat_internal(
        &self,
        stat: Stat,
        resolved: &BTreeMap<Stat, ResolvedStat>,
    ) -> Result<ResolvedStat, EngineError> {
        let mut result = ResolvedStat::new(stat, 0.0);

        let mut base_value = 0.0;
        if let Some(sources) = self.sources.get(&stat) {
            for source in sources {
                let value = source.value();
                base_value += value;
                result.add_source(source.description(), value);
            }
        }

        let mut current_value = base_value;
        if let Some(transforms) = self.transforms.get(&stat) {
            let mut ordered: Vec<&dyn StatTransform> =
                transforms.iter().map(|t| t.as_ref()).collect();
            ordered.sort_by_key(|t| t.phase());

            for transform in ordered {
                let mut dependencies = HashMap::new();
                for dep in transform.depends_on() {
                    let value = resolved
                        .get(&dep)
                        .map(|r| r.value)
                        .ok_or(EngineError::MissingDependency(dep))?;
                    dependencies.insert(dep, value);
                }

                current_value = transform.apply(current_value, &dependencies)?;
                result.add_transform(transform.description(), current_value);
            }
        }

        result.value = current_value;
        Ok(result)
    }
}

impl Default for StatResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// The output of [`StatResolver::resolve_all`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedSheet {
    stats: BTreeMap<Stat, ResolvedStat>,
}

impl ResolvedSheet {
    /// Final value of a stat; stats nothing contributed to are zero.
    pub fn value(&self, stat: Stat) -> StatValue {
        self.stats.get(&stat).map(|r| r.value).unwrap_or(0.0)
    }

    /// Full breakdown for a stat, if anything contributed to it.
    pub fn get(&self, stat: Stat) -> Option<&ResolvedStat> {
        self.stats.get(&stat)
    }

    /// Iterate resolved stats in `Stat` order.
    pub fn iter(&self) -> impl Iterator<Item = &ResolvedStat> {
        self.stats.values()
    }

    /// Number of resolved stats.
    pub fn len(&self) -> usize {
        self.stats.len()
    }

    /// Whether nothing was resolved.
    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }
}
