//! Critical path computation: the longest prerequisite chain behind a task.

use std::collections::HashMap;

use petgraph::graph::NodeIndex;
use quorum_tasks::Task;

use crate::{AcyclicGraph, Error, Result};

/// Memoized longest-chain result for one node.
struct ChainEntry {
    /// Chain length in tasks, counting the node itself.
    len: usize,
    /// The dependency continuing the longest chain, if any.
    best_dep: Option<NodeIndex>,
}

impl AcyclicGraph {
    /// The longest prerequisite chain ending at `terminal`, ordered from
    /// an originating task (no dependencies) to `terminal` itself.
    ///
    /// Chain length is measured in number of tasks (unit weight), which
    /// models the worst-case serial dependency count independent of any
    /// duration estimates. When dependency branches tie, the branch listed
    /// first in the task's `dependencies` wins, so repeated calls return
    /// the same path.
    ///
    /// `terminal` may be any task in the snapshot, not only one without
    /// dependents.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTask`] when `terminal` is not in the
    /// snapshot.
    pub fn critical_path(&self, terminal: &str) -> Result<Vec<&Task>> {
        let end = self
            .node_index(terminal)
            .ok_or_else(|| Error::unknown_task(terminal))?;

        let mut memo = HashMap::new();
        longest_chain(self, end, &mut memo);

        // Walk the memoized best-dependency links back from the terminal,
        // then flip into origin -> terminal order.
        let mut path = Vec::new();
        let mut current = Some(end);
        while let Some(node) = current {
            path.push(&self.node(node).task);
            current = memo.get(&node).and_then(|entry| entry.best_dep);
        }
        path.reverse();
        Ok(path)
    }

    /// Length of the longest prerequisite chain ending at `id`, in tasks,
    /// without materializing the path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTask`] when `id` is not in the snapshot.
    pub fn chain_length(&self, id: &str) -> Result<usize> {
        let end = self
            .node_index(id)
            .ok_or_else(|| Error::unknown_task(id))?;
        let mut memo = HashMap::new();
        Ok(longest_chain(self, end, &mut memo))
    }
}

/// `longest(t) = 1 + max(longest(d))` over `t`'s dependencies, memoized so
/// each node is computed once. Terminates because the witness type
/// guarantees the graph is a DAG.
fn longest_chain(
    graph: &AcyclicGraph,
    node: NodeIndex,
    memo: &mut HashMap<NodeIndex, ChainEntry>,
) -> usize {
    if let Some(entry) = memo.get(&node) {
        return entry.len;
    }

    let mut best_len = 0;
    let mut best_dep = None;
    for &dep in &graph.node(node).deps {
        let len = longest_chain(graph, dep, memo);
        // Strictly-greater keeps the first-listed branch on ties.
        if len > best_len {
            best_len = len;
            best_dep = Some(dep);
        }
    }

    let len = best_len + 1;
    memo.insert(node, ChainEntry { len, best_dep });
    len
}
