//! Error types for task graph construction and queries.

use miette::Diagnostic;
use quorum_tasks::TaskId;
use thiserror::Error;

/// Result type for task graph operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or querying a task graph.
///
/// Structural variants (`DuplicateTask`, `UnknownDependency`,
/// `SelfDependency`) reject a snapshot wholesale during
/// [`TaskGraph::build`](crate::TaskGraph::build); a partial graph is never
/// returned. All variants are recoverable by the caller and leave no
/// residual state behind.
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum Error {
    /// Two tasks in the snapshot share an id.
    #[error("duplicate task id '{id}' in snapshot")]
    #[diagnostic(code(quorum_task_graph::build::duplicate_task))]
    DuplicateTask {
        /// The id that appears more than once.
        id: TaskId,
    },

    /// A task lists a dependency id that no task in the snapshot carries.
    #[error("task '{task}' depends on unknown task '{dependency}'")]
    #[diagnostic(code(quorum_task_graph::build::unknown_dependency))]
    UnknownDependency {
        /// The task whose dependency failed to resolve.
        task: TaskId,
        /// The id that resolved to no task.
        dependency: TaskId,
    },

    /// A task lists its own id among its dependencies.
    #[error("task '{id}' depends on itself")]
    #[diagnostic(code(quorum_task_graph::build::self_dependency))]
    SelfDependency {
        /// The self-referencing task id.
        id: TaskId,
    },

    /// A query required an acyclic graph, but validation diagnosed a cycle.
    #[error("dependency graph is not acyclic (cycle: {})", cycle.join(" -> "))]
    #[diagnostic(code(quorum_task_graph::validate::not_acyclic))]
    GraphNotAcyclic {
        /// The diagnosed cycle, in dependency order.
        cycle: Vec<TaskId>,
    },

    /// A query referenced a task id not present in the snapshot.
    #[error("unknown task id '{id}'")]
    #[diagnostic(code(quorum_task_graph::query::unknown_task))]
    UnknownTask {
        /// The id the caller asked about.
        id: TaskId,
    },
}

impl Error {
    /// Create a duplicate-task error.
    pub fn duplicate_task(id: impl Into<TaskId>) -> Self {
        Self::DuplicateTask { id: id.into() }
    }

    /// Create an unknown-dependency error.
    pub fn unknown_dependency(task: impl Into<TaskId>, dependency: impl Into<TaskId>) -> Self {
        Self::UnknownDependency {
            task: task.into(),
            dependency: dependency.into(),
        }
    }

    /// Create a self-dependency error.
    pub fn self_dependency(id: impl Into<TaskId>) -> Self {
        Self::SelfDependency { id: id.into() }
    }

    /// Create an unknown-task error.
    pub fn unknown_task(id: impl Into<TaskId>) -> Self {
        Self::UnknownTask { id: id.into() }
    }
}
