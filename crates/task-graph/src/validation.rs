//! Acyclicity validation with cycle diagnosis.
//!
//! Validation is the mandatory gate between graph construction and every
//! analysis query: [`TaskGraph::validate`] either produces an
//! [`AcyclicGraph`] witness, or a [`CyclicGraph`] carrying the diagnosed
//! cycle as data. Queries only accept the witness, so a cyclic snapshot
//! can never silently produce a misleading partial answer.

use std::ops::Deref;

use petgraph::graph::NodeIndex;
use quorum_tasks::TaskId;
use tracing::debug;

use crate::{Error, Result, TaskGraph};

/// DFS node marking: unvisited, on the current stack, finished.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    White,
    Gray,
    Black,
}

/// Outcome of validating a task graph.
#[derive(Debug)]
pub enum ValidationResult {
    /// The dependency relation is a DAG; analysis queries may run.
    Acyclic(AcyclicGraph),
    /// The dependency relation contains a cycle. Reported as data, not an
    /// error: the caller decides whether to surface it as a data-integrity
    /// warning.
    Cyclic(CyclicGraph),
}

impl ValidationResult {
    /// Whether validation found no cycle.
    #[must_use]
    pub fn is_acyclic(&self) -> bool {
        matches!(self, Self::Acyclic(_))
    }

    /// The diagnosed cycle, when there is one.
    #[must_use]
    pub fn cycle(&self) -> Option<&[TaskId]> {
        match self {
            Self::Acyclic(_) => None,
            Self::Cyclic(cyclic) => Some(cyclic.cycle()),
        }
    }

    /// Unwrap the acyclic witness, turning a cyclic outcome into the
    /// runtime guard error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GraphNotAcyclic`] carrying the diagnosed cycle
    /// when the graph is cyclic.
    pub fn require_acyclic(self) -> Result<AcyclicGraph> {
        match self {
            Self::Acyclic(graph) => Ok(graph),
            Self::Cyclic(cyclic) => Err(Error::GraphNotAcyclic {
                cycle: cyclic.cycle,
            }),
        }
    }
}

/// A task graph whose dependency relation has been proven acyclic.
///
/// This is a witness type: holding one is proof that validation ran and
/// found no cycle, which is the precondition of every analysis query in
/// this crate. It dereferences to [`TaskGraph`] for read-only access.
#[derive(Debug, Clone)]
pub struct AcyclicGraph(TaskGraph);

impl AcyclicGraph {
    /// Give the underlying graph back, discarding the acyclicity proof.
    #[must_use]
    pub fn into_inner(self) -> TaskGraph {
        self.0
    }
}

impl Deref for AcyclicGraph {
    type Target = TaskGraph;

    fn deref(&self) -> &TaskGraph {
        &self.0
    }
}

/// A task graph rejected by the validator, with the diagnosed cycle.
#[derive(Debug, Clone)]
pub struct CyclicGraph {
    graph: TaskGraph,
    cycle: Vec<TaskId>,
}

impl CyclicGraph {
    /// The diagnosed cycle in dependency order: each task depends on the
    /// next, and the last depends on the first.
    #[must_use]
    pub fn cycle(&self) -> &[TaskId] {
        &self.cycle
    }

    /// Give the underlying graph back, e.g. for rendering diagnostics.
    #[must_use]
    pub fn into_inner(self) -> TaskGraph {
        self.graph
    }
}

impl TaskGraph {
    /// Check the dependency relation for cycles.
    ///
    /// Depth-first traversal from every unvisited node with three-color
    /// marking; roots are visited in snapshot order and prerequisites in
    /// their listed order, so repeated validation of the same snapshot
    /// diagnoses the same cycle path.
    #[must_use]
    pub fn validate(self) -> ValidationResult {
        match find_cycle(&self) {
            None => ValidationResult::Acyclic(AcyclicGraph(self)),
            Some(cycle) => {
                debug!("Dependency cycle diagnosed: {}", cycle.join(" -> "));
                ValidationResult::Cyclic(CyclicGraph { graph: self, cycle })
            }
        }
    }
}

/// Find a dependency cycle, if any, returning it in dependency order.
fn find_cycle(graph: &TaskGraph) -> Option<Vec<TaskId>> {
    let mut marks = vec![Mark::White; graph.len()];
    // DFS stack of (node, next-prerequisite cursor); doubles as the
    // current path for cycle reconstruction.
    let mut stack: Vec<(NodeIndex, usize)> = Vec::new();

    for root in graph.node_indices() {
        if marks[root.index()] != Mark::White {
            continue;
        }
        marks[root.index()] = Mark::Gray;
        stack.push((root, 0));

        while let Some(frame) = stack.last_mut() {
            let (node, cursor) = *frame;
            let deps = &graph.node(node).deps;

            if cursor >= deps.len() {
                marks[node.index()] = Mark::Black;
                stack.pop();
                continue;
            }
            frame.1 += 1;

            let next = deps[cursor];
            match marks[next.index()] {
                Mark::White => {
                    marks[next.index()] = Mark::Gray;
                    stack.push((next, 0));
                }
                Mark::Gray => {
                    // Revisited a node on the current path: the cycle is
                    // the stack slice from that node to the top.
                    let start = stack
                        .iter()
                        .position(|&(on_path, _)| on_path == next)
                        .unwrap_or(0);
                    return Some(
                        stack[start..]
                            .iter()
                            .map(|&(on_path, _)| graph.node(on_path).task.id.clone())
                            .collect(),
                    );
                }
                Mark::Black => {}
            }
        }
    }

    None
}
