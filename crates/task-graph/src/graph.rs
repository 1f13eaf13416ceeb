//! Task graph construction from snapshot data.
//!
//! This module normalizes a flat task snapshot into a directed graph on
//! petgraph, with edges pointing from a task to each of its prerequisites.
//! The reverse relation (`dependents`) is always recomputed here as the
//! transpose of `dependencies`; the hint the backend supplies on each task
//! is never trusted.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use quorum_tasks::{Task, TaskId};
use tracing::debug;

use crate::{Error, Result};

/// A task resolved into the graph, with links to its prerequisite and
/// dependent nodes.
#[derive(Debug, Clone)]
pub(crate) struct TaskNode {
    /// The task as supplied in the snapshot.
    pub(crate) task: Task,
    /// Prerequisites, in the order the task listed them.
    pub(crate) deps: Vec<NodeIndex>,
    /// Dependents, recomputed as the transpose of the dependency relation,
    /// in snapshot order.
    pub(crate) dependents: Vec<NodeIndex>,
}

/// A validated-for-structure dependency graph over one task snapshot.
///
/// Building a `TaskGraph` establishes referential integrity: every
/// dependency id resolves, no id is duplicated, and no task depends on
/// itself. It does *not* establish acyclicity — call
/// [`validate`](TaskGraph::validate) to obtain an
/// [`AcyclicGraph`](crate::AcyclicGraph) before running analysis queries.
///
/// The graph is read-only once built; node order follows snapshot order,
/// which anchors the determinism of every downstream query.
#[derive(Debug, Clone)]
pub struct TaskGraph {
    graph: DiGraph<TaskNode, ()>,
    id_to_node: HashMap<TaskId, NodeIndex>,
}

impl TaskGraph {
    /// Build a graph from a task snapshot.
    ///
    /// The snapshot is rejected wholesale on the first structural offence,
    /// in snapshot order; a partial graph is never returned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateTask`] when two tasks share an id,
    /// [`Error::SelfDependency`] when a task lists its own id as a
    /// dependency, and [`Error::UnknownDependency`] when a dependency id
    /// resolves to no task in the snapshot.
    pub fn build(tasks: Vec<Task>) -> Result<Self> {
        let mut graph = DiGraph::with_capacity(tasks.len(), 0);
        let mut id_to_node: HashMap<TaskId, NodeIndex> = HashMap::with_capacity(tasks.len());

        // First pass: add nodes, so edges can be wired regardless of
        // declaration order in the snapshot.
        for task in tasks {
            if id_to_node.contains_key(&task.id) {
                return Err(Error::duplicate_task(task.id));
            }
            let id = task.id.clone();
            let index = graph.add_node(TaskNode {
                task,
                deps: Vec::new(),
                dependents: Vec::new(),
            });
            id_to_node.insert(id.clone(), index);
            debug!("Added task node '{id}'");
        }

        // Second pass: resolve dependency ids and collect edges
        // task -> prerequisite. Dependencies are a set: a repeated id
        // collapses to its first occurrence.
        let mut edges: Vec<(NodeIndex, NodeIndex)> = Vec::new();
        for index in graph.node_indices() {
            let node = &graph[index];
            let mut resolved: Vec<NodeIndex> = Vec::with_capacity(node.task.dependencies.len());
            for dep_id in &node.task.dependencies {
                if *dep_id == node.task.id {
                    return Err(Error::self_dependency(dep_id.clone()));
                }
                match id_to_node.get(dep_id) {
                    Some(&dep_index) => {
                        if !resolved.contains(&dep_index) {
                            resolved.push(dep_index);
                            edges.push((index, dep_index));
                        }
                    }
                    None => {
                        return Err(Error::unknown_dependency(
                            node.task.id.clone(),
                            dep_id.clone(),
                        ));
                    }
                }
            }
        }

        // Wire edges and recompute the dependent links as the transpose of
        // the dependency relation. Iterating the collected edges keeps both
        // sides in snapshot order.
        for &(task, dep) in &edges {
            graph.add_edge(task, dep, ());
            graph[task].deps.push(dep);
        }
        for &(task, dep) in &edges {
            graph[dep].dependents.push(task);
        }

        debug!(
            "Built task graph with {} nodes and {} edges",
            graph.node_count(),
            graph.edge_count()
        );
        Ok(Self { graph, id_to_node })
    }

    /// Number of tasks in the graph.
    #[must_use]
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    /// Whether the snapshot was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Whether a task with this id exists in the snapshot.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.id_to_node.contains_key(id)
    }

    /// Look up a task by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Task> {
        self.id_to_node
            .get(id)
            .map(|&index| &self.graph[index].task)
    }

    /// Iterate over all tasks in snapshot order.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.graph.node_indices().map(|index| &self.graph[index].task)
    }

    /// Direct prerequisites of a task, in the order it listed them.
    #[must_use]
    pub fn prerequisites(&self, id: &str) -> Option<Vec<&Task>> {
        let &index = self.id_to_node.get(id)?;
        Some(
            self.graph[index]
                .deps
                .iter()
                .map(|&dep| &self.graph[dep].task)
                .collect(),
        )
    }

    /// Direct dependents of a task, recomputed from the dependency
    /// relation, in snapshot order.
    #[must_use]
    pub fn dependents(&self, id: &str) -> Option<Vec<&Task>> {
        let &index = self.id_to_node.get(id)?;
        Some(
            self.graph[index]
                .dependents
                .iter()
                .map(|&dependent| &self.graph[dependent].task)
                .collect(),
        )
    }

    /// Tasks no other task depends on, in snapshot order.
    ///
    /// These are the natural query targets for whole-project critical-path
    /// reporting.
    #[must_use]
    pub fn terminal_tasks(&self) -> Vec<&Task> {
        self.graph
            .node_indices()
            .filter(|&index| self.graph[index].dependents.is_empty())
            .map(|index| &self.graph[index].task)
            .collect()
    }

    pub(crate) fn node_index(&self, id: &str) -> Option<NodeIndex> {
        self.id_to_node.get(id).copied()
    }

    pub(crate) fn node(&self, index: NodeIndex) -> &TaskNode {
        &self.graph[index]
    }

    pub(crate) fn node_indices(&self) -> impl Iterator<Item = NodeIndex> {
        self.graph.node_indices()
    }

    pub(crate) fn petgraph(&self) -> &DiGraph<TaskNode, ()> {
        &self.graph
    }
}
