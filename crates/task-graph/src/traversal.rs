//! Dependency-respecting traversals over a validated graph.

use std::collections::{HashMap, HashSet};

use petgraph::algo::toposort;
use petgraph::graph::NodeIndex;
use quorum_tasks::Task;

use crate::{AcyclicGraph, Error, Result};

impl AcyclicGraph {
    /// All tasks in prerequisite-first order: every task appears after the
    /// tasks it depends on.
    #[must_use]
    pub fn topological_order(&self) -> Vec<&Task> {
        self.topological_indices()
            .into_iter()
            .map(|index| &self.node(index).task)
            .collect()
    }

    /// Tasks grouped by dependency level.
    ///
    /// Tasks within one phase have no ordering constraints between them;
    /// every task in phase `n` only depends on tasks in phases `< n`.
    /// Useful for rendering a snapshot as workable waves of tasks.
    #[must_use]
    pub fn parallel_phases(&self) -> Vec<Vec<&Task>> {
        let mut phases: Vec<Vec<&Task>> = Vec::new();
        let mut level_of: HashMap<NodeIndex, usize> = HashMap::new();

        for index in self.topological_indices() {
            // A task sits one level above its deepest prerequisite.
            let mut level = 0;
            for dep in &self.node(index).deps {
                if let Some(&dep_level) = level_of.get(dep) {
                    level = level.max(dep_level + 1);
                }
            }

            if level >= phases.len() {
                phases.resize_with(level + 1, Vec::new);
            }
            phases[level].push(&self.node(index).task);
            level_of.insert(index, level);
        }

        phases
    }

    /// Every task reachable from `id` over dependency edges: the full set
    /// of upstream work behind it, excluding the task itself, in snapshot
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTask`] when `id` is not in the snapshot.
    pub fn transitive_prerequisites(&self, id: &str) -> Result<Vec<&Task>> {
        let start = self
            .node_index(id)
            .ok_or_else(|| Error::unknown_task(id))?;

        let mut seen: HashSet<NodeIndex> = HashSet::new();
        let mut frontier = vec![start];
        while let Some(node) = frontier.pop() {
            for &dep in &self.node(node).deps {
                if seen.insert(dep) {
                    frontier.push(dep);
                }
            }
        }

        Ok(self
            .node_indices()
            .filter(|index| seen.contains(index))
            .map(|index| &self.node(index).task)
            .collect())
    }

    /// Node indices in prerequisite-first order.
    fn topological_indices(&self) -> Vec<NodeIndex> {
        // Edges point task -> prerequisite, so petgraph's order lists
        // dependents first; flip it. Cannot fail: acyclicity is
        // guaranteed by this witness type.
        let mut order = toposort(self.petgraph(), None).unwrap_or_default();
        order.reverse();
        order
    }
}
