//! Dependency graph module.
//!
//! Provides the `StatGraph` type, which represents dependencies between
//! stat rules as a directed acyclic graph (DAG). Used by the resolver to
//! determine the order in which stats are resolved.

use crate::error::EngineError;
use crate::stat::Stat;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::{HashMap, HashSet};

/// A directed acyclic graph of stat dependencies.
///
/// If stat A depends on stat B, then B must be resolved before A.
///
/// # Examples
///
/// ```rust
/// use riftcore::graph::StatGraph;
/// use riftcore::Stat;
///
/// let mut graph = StatGraph::new();
///
/// // Evasion depends on its increase bucket, which depends on dexterity
/// graph.add_edge(Stat::Evasion, Stat::IncreasedEvasion);
/// graph.add_edge(Stat::IncreasedEvasion, Stat::Dexterity);
///
/// let order = graph.topological_sort().unwrap();
/// let dex = order.iter().position(|s| *s == Stat::Dexterity).unwrap();
/// let evasion = order.iter().position(|s| *s == Stat::Evasion).unwrap();
/// assert!(dex < evasion);
/// ```
pub struct StatGraph {
    graph: DiGraph<Stat, ()>,
    node_map: HashMap<Stat, NodeIndex>,
}

impl StatGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
        }
    }

    /// Add a node to the graph if it doesn't exist, returning its index.
    pub fn add_node(&mut self, stat: Stat) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(&stat) {
            idx
        } else {
            let idx = self.graph.add_node(stat);
            self.node_map.insert(stat, idx);
            idx
        }
    }

    /// Add an edge representing a dependency.
    ///
    /// `from` depends on `to` (`to` must be resolved before `from`).
    /// Both nodes are added to the graph if they don't exist.
    pub fn add_edge(&mut self, from: Stat, to: Stat) {
        let from_idx = self.add_node(from);
        let to_idx = self.add_node(to);
        self.graph.add_edge(to_idx, from_idx, ());
    }

    /// Detect cycles in the graph.
    ///
    /// Returns `Err(EngineError::Cycle)` with the cycle path, closed by
    /// repeating its first stat, if any cycle exists.
    pub fn detect_cycles(&self) -> Result<(), EngineError> {
        let mut visited = HashSet::new();
        let mut rec_stack = HashSet::new();

        // Deterministic start order so the reported path is stable.
        let mut starts: Vec<NodeIndex> = self.graph.node_indices().collect();
        starts.sort_by_key(|idx| self.graph[*idx]);

        for node_idx in starts {
            if !visited.contains(&node_idx) {
                let mut cycle_path = Vec::new();
                if let Some(cycle) =
                    self.dfs_cycle_detect(node_idx, &mut visited, &mut rec_stack, &mut cycle_path)
                {
                    return Err(cycle);
                }
            }
        }

        Ok(())
    }

    fn dfs_cycle_detect(
        &self,
        node: NodeIndex,
        visited: &mut HashSet<NodeIndex>,
        rec_stack: &mut HashSet<NodeIndex>,
        cycle_path: &mut Vec<Stat>,
    ) -> Option<EngineError> {
        visited.insert(node);
        rec_stack.insert(node);
        cycle_path.push(self.graph[node]);

        for neighbor in self.graph.neighbors_directed(node, Direction::Outgoing) {
            if !visited.contains(&neighbor) {
                if let Some(cycle) = self.dfs_cycle_detect(neighbor, visited, rec_stack, cycle_path)
                {
                    return Some(cycle);
                }
            } else if rec_stack.contains(&neighbor) {
                let neighbor_stat = self.graph[neighbor];
                let start = cycle_path
                    .iter()
                    .position(|stat| *stat == neighbor_stat)
                    .unwrap_or(0);
                let mut path = cycle_path[start..].to_vec();
                path.push(neighbor_stat);
                return Some(EngineError::Cycle { path });
            }
        }

        rec_stack.remove(&node);
        cycle_path.pop();
        None
    }

    /// Get a topological sort of all nodes: dependencies come before
    /// dependents.
    pub fn topological_sort(&self) -> Result<Vec<Stat>, EngineError> {
        self.detect_cycles()?;

        match toposort(&self.graph, None) {
            Ok(indices) => Ok(indices.into_iter().map(|idx| self.graph[idx]).collect()),
            Err(cycle) => Err(EngineError::Cycle {
                path: vec![self.graph[cycle.node_id()]],
            }),
        }
    }

    /// Check if a node exists in the graph.
    pub fn contains_node(&self, stat: Stat) -> bool {
        self.node_map.contains_key(&stat)
    }

    /// Stats that `stat` directly depends on.
    pub fn dependencies_of(&self, stat: Stat) -> Vec<Stat> {
        let Some(&idx) = self.node_map.get(&stat) else {
            return Vec::new();
        };
        let mut deps: Vec<Stat> = self
            .graph
            .neighbors_directed(idx, Direction::Incoming)
            .map(|n| self.graph[n])
            .collect();
        deps.sort();
        deps.dedup();
        deps
    }
}

impl Default for StatGraph {
    fn default() -> Self {
        Self::new()
    }
}
