//! Property-based tests for task graph invariants.
//!
//! These tests verify the behavioral contracts of the analyzer:
//! - `dependents` is always the exact transpose of `dependencies`
//! - Validation verdicts and diagnosed cycle paths are deterministic
//! - Classification is a partition of the non-completed tasks
//! - Critical paths are dependency-linked chains of the memoized length

use proptest::prelude::*;
use quorum_task_graph::{AcyclicGraph, TaskGraph, ValidationResult};
use quorum_tasks::{Task, TaskStatus};
use std::collections::{HashMap, HashSet};

// =============================================================================
// Strategies for generating test data
// =============================================================================

/// Generate a valid task id (lowercase alphanumeric with underscores).
fn task_id_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,10}".prop_map(String::from)
}

fn status_strategy() -> impl Strategy<Value = TaskStatus> {
    prop_oneof![
        Just(TaskStatus::NotStarted),
        Just(TaskStatus::InProgress),
        Just(TaskStatus::Completed),
        Just(TaskStatus::OnHold),
    ]
}

/// Generate an acyclic snapshot with between `min_tasks` and `max_tasks`
/// tasks.
///
/// The strategy ensures no cycles by only allowing dependencies on tasks
/// with lower indices (tasks added earlier in the sequence).
fn dag_strategy(min_tasks: usize, max_tasks: usize) -> impl Strategy<Value = Vec<Task>> {
    (min_tasks..=max_tasks).prop_flat_map(|task_count| {
        proptest::collection::vec(task_id_strategy(), task_count).prop_flat_map(move |ids| {
            // Deduplicate ids by appending the index.
            let unique_ids: Vec<String> = ids
                .into_iter()
                .enumerate()
                .map(|(i, id)| format!("{id}_{i}"))
                .collect();

            // For each task, generate dependencies from earlier tasks only.
            let task_strategies: Vec<_> = (0..task_count)
                .map(|i| {
                    let deps_strategy = if i == 0 {
                        Just(vec![]).boxed()
                    } else {
                        let earlier: Vec<String> = unique_ids[..i].to_vec();
                        proptest::collection::vec(
                            proptest::sample::select(earlier),
                            0..=i.min(3), // Limit deps to avoid explosion
                        )
                        .prop_map(|deps| {
                            // Deduplicate deps, keeping first occurrence.
                            let mut seen = HashSet::new();
                            deps.into_iter().filter(|d| seen.insert(d.clone())).collect()
                        })
                        .boxed()
                    };
                    (deps_strategy, status_strategy())
                })
                .collect();

            let ids_clone = unique_ids.clone();
            task_strategies.prop_map(move |per_task| {
                ids_clone
                    .iter()
                    .zip(per_task)
                    .map(|(id, (deps, status))| {
                        Task::new(id.clone(), format!("Task {id}"))
                            .with_status(status)
                            .with_dependencies(deps)
                    })
                    .collect::<Vec<_>>()
            })
        })
    })
}

/// Generate a snapshot that definitely contains a dependency cycle: a
/// chain where the first task depends on the last.
fn cyclic_snapshot_strategy() -> impl Strategy<Value = Vec<Task>> {
    (3..=6_usize).prop_flat_map(|task_count| {
        proptest::collection::vec(task_id_strategy(), task_count).prop_map(move |ids| {
            let unique_ids: Vec<String> = ids
                .into_iter()
                .enumerate()
                .map(|(i, id)| format!("{id}_{i}"))
                .collect();

            (0..task_count)
                .map(|i| {
                    let dep = if i == 0 {
                        unique_ids[task_count - 1].clone()
                    } else {
                        unique_ids[i - 1].clone()
                    };
                    Task::new(unique_ids[i].clone(), format!("Task {i}"))
                        .with_dependencies([dep])
                })
                .collect::<Vec<_>>()
        })
    })
}

// =============================================================================
// Helper Functions
// =============================================================================

fn validated(tasks: &[Task]) -> AcyclicGraph {
    TaskGraph::build(tasks.to_vec())
        .expect("structurally valid snapshot should build")
        .validate()
        .require_acyclic()
        .expect("generated DAG should validate acyclic")
}

// =============================================================================
// Property Tests: Transpose Invariant
// =============================================================================

proptest! {
    /// Contract: for every task `t`, the recomputed dependents of `t` are
    /// exactly the tasks that list `t` in their dependencies.
    #[test]
    fn dependents_are_the_exact_transpose(tasks in dag_strategy(1, 15)) {
        let graph = validated(&tasks);

        for task in &tasks {
            let mut expected: Vec<&str> = tasks
                .iter()
                .filter(|u| u.dependencies.contains(&task.id))
                .map(|u| u.id.as_str())
                .collect();
            expected.sort_unstable();

            let mut actual: Vec<&str> = graph
                .dependents(&task.id)
                .expect("every snapshot task is in the graph")
                .iter()
                .map(|u| u.id.as_str())
                .collect();
            actual.sort_unstable();

            prop_assert_eq!(actual, expected, "transpose mismatch for '{}'", task.id);
        }
    }

    /// Contract: supplied `dependents` hints never leak into the graph.
    #[test]
    fn supplied_dependent_hints_are_ignored(tasks in dag_strategy(1, 10)) {
        let mut polluted = tasks.clone();
        for task in &mut polluted {
            task.dependents = vec!["stale_back_reference".to_string()];
        }

        let clean = validated(&tasks);
        let graph = validated(&polluted);

        for task in &tasks {
            let from_clean: Vec<String> = clean
                .dependents(&task.id)
                .expect("task present")
                .iter()
                .map(|u| u.id.clone())
                .collect();
            let from_polluted: Vec<String> = graph
                .dependents(&task.id)
                .expect("task present")
                .iter()
                .map(|u| u.id.clone())
                .collect();
            prop_assert_eq!(from_clean, from_polluted);
        }
    }
}

// =============================================================================
// Property Tests: Validation
// =============================================================================

proptest! {
    /// Contract: generated DAGs validate acyclic.
    #[test]
    fn dags_validate_acyclic(tasks in dag_strategy(1, 15)) {
        let result = TaskGraph::build(tasks).expect("snapshot should build").validate();
        prop_assert!(result.is_acyclic());
        prop_assert!(result.cycle().is_none());
    }

    /// Contract: snapshots built around a cycle are diagnosed, and the
    /// diagnosed path is the same on every validation of the snapshot.
    #[test]
    fn cycles_are_diagnosed_deterministically(tasks in cyclic_snapshot_strategy()) {
        let diagnose = |tasks: Vec<Task>| -> Vec<String> {
            match TaskGraph::build(tasks).expect("snapshot should build").validate() {
                ValidationResult::Cyclic(cyclic) => cyclic.cycle().to_vec(),
                ValidationResult::Acyclic(_) => vec![],
            }
        };

        let first = diagnose(tasks.clone());
        let second = diagnose(tasks.clone());

        prop_assert!(!first.is_empty(), "cycle should be diagnosed");
        prop_assert_eq!(&first, &second, "cycle diagnosis should be deterministic");

        // Every diagnosed task really sits on a cycle edge: each depends
        // on the next, and the last depends on the first.
        let by_id: HashMap<&str, &Task> =
            tasks.iter().map(|t| (t.id.as_str(), t)).collect();
        for (i, id) in first.iter().enumerate() {
            let next = &first[(i + 1) % first.len()];
            let task = by_id[id.as_str()];
            prop_assert!(
                task.dependencies.contains(next),
                "'{}' should depend on '{}' along the diagnosed cycle",
                id,
                next
            );
        }
    }
}

// =============================================================================
// Property Tests: Classification
// =============================================================================

proptest! {
    /// Contract: classification partitions tasks — nothing is both
    /// available and blocked, and completed tasks appear in neither list.
    #[test]
    fn classification_is_a_partition(tasks in dag_strategy(1, 15)) {
        let graph = validated(&tasks);
        let classification = graph.classify();

        let available: HashSet<&str> = classification
            .available
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        let blocked: HashSet<&str> = classification
            .blocked
            .iter()
            .map(|b| b.task.id.as_str())
            .collect();

        prop_assert!(available.is_disjoint(&blocked));

        let by_id: HashMap<&str, &Task> =
            tasks.iter().map(|t| (t.id.as_str(), t)).collect();

        for id in &available {
            let task = by_id[id];
            prop_assert_eq!(task.status, TaskStatus::NotStarted);
            for dep in &task.dependencies {
                prop_assert!(by_id[dep.as_str()].status.is_completed());
            }
        }
        for blocked_task in &classification.blocked {
            prop_assert!(!blocked_task.task.status.is_completed());
            prop_assert!(!blocked_task.blockers.is_empty());
            for blocker in &blocked_task.blockers {
                prop_assert!(!blocker.status.is_completed());
                prop_assert!(blocked_task.task.dependencies.contains(&blocker.id));
            }
        }
        for task in &tasks {
            if task.status.is_completed() {
                prop_assert!(!available.contains(task.id.as_str()));
                prop_assert!(!blocked.contains(task.id.as_str()));
            }
        }
    }
}

// =============================================================================
// Property Tests: Critical Path
// =============================================================================

proptest! {
    /// Contract: for every task, the critical path is a dependency-linked
    /// chain starting at an originating task, with the memoized length.
    #[test]
    fn critical_paths_are_dependency_linked_chains(tasks in dag_strategy(1, 15)) {
        let graph = validated(&tasks);

        for task in &tasks {
            let path = graph.critical_path(&task.id).expect("task is in the snapshot");
            let length = graph.chain_length(&task.id).expect("task is in the snapshot");

            prop_assert_eq!(path.len(), length);
            prop_assert!(!path.is_empty());
            prop_assert!(path[0].dependencies.is_empty(), "path must start at an origin");
            prop_assert_eq!(path[path.len() - 1].id.as_str(), task.id.as_str());

            for window in path.windows(2) {
                prop_assert!(
                    window[1].dependencies.contains(&window[0].id),
                    "'{}' should be a direct dependency of '{}'",
                    window[0].id,
                    window[1].id
                );
            }
        }
    }

    /// Contract: repeated critical-path queries return the same branch.
    #[test]
    fn critical_paths_are_deterministic(tasks in dag_strategy(2, 12)) {
        let graph = validated(&tasks);

        for task in &tasks {
            let first: Vec<String> = graph
                .critical_path(&task.id)
                .expect("task is in the snapshot")
                .iter()
                .map(|t| t.id.clone())
                .collect();
            let second: Vec<String> = graph
                .critical_path(&task.id)
                .expect("task is in the snapshot")
                .iter()
                .map(|t| t.id.clone())
                .collect();
            prop_assert_eq!(first, second);
        }
    }
}

// =============================================================================
// Property Tests: Traversals
// =============================================================================

proptest! {
    /// Contract: topological order includes every task, after all of its
    /// dependencies.
    #[test]
    fn topological_order_respects_dependencies(tasks in dag_strategy(1, 15)) {
        let graph = validated(&tasks);
        let order = graph.topological_order();

        prop_assert_eq!(order.len(), tasks.len());

        let positions: HashMap<&str, usize> = order
            .iter()
            .enumerate()
            .map(|(i, t)| (t.id.as_str(), i))
            .collect();

        for task in &tasks {
            let task_pos = positions[task.id.as_str()];
            for dep in &task.dependencies {
                prop_assert!(
                    positions[dep.as_str()] < task_pos,
                    "dependency '{}' should precede '{}'",
                    dep,
                    task.id
                );
            }
        }
    }

    /// Contract: parallel phases are disjoint, exhaustive, and free of
    /// internal dependencies.
    #[test]
    fn parallel_phases_partition_without_internal_edges(tasks in dag_strategy(1, 15)) {
        let graph = validated(&tasks);
        let phases = graph.parallel_phases();

        let mut seen: HashSet<&str> = HashSet::new();
        for phase in &phases {
            let phase_ids: HashSet<&str> = phase.iter().map(|t| t.id.as_str()).collect();
            for task in phase {
                prop_assert!(seen.insert(task.id.as_str()), "task in multiple phases");
                for dep in &task.dependencies {
                    prop_assert!(
                        !phase_ids.contains(dep.as_str()),
                        "'{}' and its dependency '{}' share a phase",
                        task.id,
                        dep
                    );
                }
            }
        }
        prop_assert_eq!(seen.len(), tasks.len(), "every task appears in exactly one phase");
    }
}
