//! Completion projection over a critical path.

use chrono::{DateTime, Utc};
use quorum_tasks::Task;

/// How far along a critical path is and when it is projected to finish.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    /// Share of tasks on the path already completed, in percent, clamped
    /// to `[0, 100]`. An empty path yields `0`.
    pub completion_percent: f64,
    /// Latest due date among the incomplete tasks on the path. `None`
    /// when the path is empty, fully completed, or no incomplete task
    /// carries a due date.
    pub estimated_completion: Option<DateTime<Utc>>,
    /// True when an incomplete task on the path has no due date, so the
    /// true completion could be later than `estimated_completion` shows.
    pub is_lower_bound: bool,
}

/// Project completion for a path of tasks, typically one produced by
/// [`AcyclicGraph::critical_path`](crate::AcyclicGraph::critical_path).
#[must_use]
pub fn project(path: &[&Task]) -> Projection {
    if path.is_empty() {
        return Projection {
            completion_percent: 0.0,
            estimated_completion: None,
            is_lower_bound: false,
        };
    }

    let completed = path.iter().filter(|task| task.status.is_completed()).count();
    #[allow(clippy::cast_precision_loss)]
    let completion_percent = (100.0 * completed as f64 / path.len() as f64).clamp(0.0, 100.0);

    let mut estimated_completion: Option<DateTime<Utc>> = None;
    let mut is_lower_bound = false;
    for task in path.iter().filter(|task| !task.status.is_completed()) {
        match task.due_date {
            Some(due) => {
                estimated_completion =
                    Some(estimated_completion.map_or(due, |current| current.max(due)));
            }
            // Undated incomplete work: the projection can only be a floor.
            None => is_lower_bound = true,
        }
    }

    Projection {
        completion_percent,
        estimated_completion,
        is_lower_bound,
    }
}
