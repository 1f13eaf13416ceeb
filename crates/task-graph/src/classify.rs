//! Reachability classification: which tasks are actionable now.

use quorum_tasks::{Task, TaskStatus};

use crate::AcyclicGraph;

/// Options for [`AcyclicGraph::classify_with`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassifyOptions {
    /// Report completed tasks whose prerequisites are satisfied in
    /// `available` instead of omitting them.
    pub include_completed: bool,
}

/// A task waiting on incomplete prerequisites.
#[derive(Debug, Clone)]
pub struct BlockedTask<'g> {
    /// The blocked task.
    pub task: &'g Task,
    /// Its direct dependencies that are not yet completed. Only immediate
    /// blockers are surfaced; transitive blocking is implied once these
    /// resolve.
    pub blockers: Vec<&'g Task>,
}

/// Partition of a snapshot into actionable and waiting tasks.
#[derive(Debug, Clone, Default)]
pub struct Classification<'g> {
    /// Tasks whose every direct dependency is completed and that have not
    /// themselves been started.
    pub available: Vec<&'g Task>,
    /// Tasks waiting on at least one incomplete direct dependency.
    pub blocked: Vec<BlockedTask<'g>>,
}

impl AcyclicGraph {
    /// Partition tasks into available and blocked, omitting completed
    /// tasks from both lists.
    #[must_use]
    pub fn classify(&self) -> Classification<'_> {
        self.classify_with(ClassifyOptions::default())
    }

    /// Partition tasks into available and blocked.
    ///
    /// A task is *available* when every direct dependency is completed
    /// (vacuously so with zero dependencies) and the task itself has not
    /// started. Tasks already in progress or on hold are not newly
    /// actionable: with satisfied prerequisites they land in neither list.
    /// A task is *blocked* when at least one direct dependency is
    /// incomplete, with those blockers listed for reporting.
    ///
    /// This is a single linear pass; only direct dependencies' current
    /// status is inspected, so no fixed-point iteration is needed.
    #[must_use]
    pub fn classify_with(&self, options: ClassifyOptions) -> Classification<'_> {
        let mut result = Classification::default();

        for index in self.node_indices() {
            let node = self.node(index);
            let blockers: Vec<&Task> = node
                .deps
                .iter()
                .map(|&dep| &self.node(dep).task)
                .filter(|dep| !dep.status.is_completed())
                .collect();

            match node.task.status {
                TaskStatus::Completed => {
                    if options.include_completed && blockers.is_empty() {
                        result.available.push(&node.task);
                    }
                }
                TaskStatus::NotStarted => {
                    if blockers.is_empty() {
                        result.available.push(&node.task);
                    } else {
                        result.blocked.push(BlockedTask {
                            task: &node.task,
                            blockers,
                        });
                    }
                }
                TaskStatus::InProgress | TaskStatus::OnHold => {
                    if !blockers.is_empty() {
                        result.blocked.push(BlockedTask {
                            task: &node.task,
                            blockers,
                        });
                    }
                }
            }
        }

        result
    }
}
