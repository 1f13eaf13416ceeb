//! Task data model for quorum dependency analysis.
//!
//! These types mirror the JSON shape the hosted backend supplies for a task
//! snapshot. A snapshot is a flat list of [`Task`] values; the dependency
//! relation between them is carried as plain id references and resolved by
//! the `quorum-task-graph` crate.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a task, unique within a snapshot and stable across
/// snapshots.
pub type TaskId = String;

/// Lifecycle state of a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not yet begun.
    #[default]
    NotStarted,
    /// Actively being worked on.
    InProgress,
    /// Finished; satisfies dependents' prerequisites.
    Completed,
    /// Deliberately paused.
    OnHold,
}

impl TaskStatus {
    /// Whether this status satisfies a dependent's prerequisite.
    #[must_use]
    pub fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotStarted => write!(f, "not_started"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Completed => write!(f, "completed"),
            Self::OnHold => write!(f, "on_hold"),
        }
    }
}

/// A single task as supplied by the backend.
///
/// Immutable for the duration of one analysis pass. The analyzer reads
/// `id`, `status`, `due_date`, and `dependencies`; `title` is opaque and
/// only carried through for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier within the snapshot.
    pub id: TaskId,
    /// Display label.
    pub title: String,
    /// Current lifecycle state.
    #[serde(default)]
    pub status: TaskStatus,
    /// Target completion date, if one was set.
    #[serde(default, rename = "dueDate", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    /// Ids of tasks that must be completed before this one can start.
    /// The supplied order is meaningful: analysis tie-breaks follow it.
    #[serde(default)]
    pub dependencies: Vec<TaskId>,
    /// Ids of tasks that require this one. Hint only: hand-maintained
    /// back-references go stale, so the analyzer recomputes this relation
    /// from `dependencies` and never reads the supplied value.
    #[serde(default)]
    pub dependents: Vec<TaskId>,
}

impl Task {
    /// Create a task with the given id and title, no dependencies, and
    /// status [`TaskStatus::NotStarted`].
    #[must_use]
    pub fn new(id: impl Into<TaskId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            status: TaskStatus::default(),
            due_date: None,
            dependencies: Vec::new(),
            dependents: Vec::new(),
        }
    }

    /// Set the lifecycle state.
    #[must_use]
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Set the due date.
    #[must_use]
    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Set the dependency ids, preserving the given order.
    #[must_use]
    pub fn with_dependencies<I, S>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<TaskId>,
    {
        self.dependencies = dependencies.into_iter().map(Into::into).collect();
        self
    }
}
