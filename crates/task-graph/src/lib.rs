//! Task dependency graph validation and analysis for quorum.
//!
//! This crate takes a flat snapshot of tasks — each optionally depending
//! on other tasks — and answers the questions that require real graph
//! reasoning: is the snapshot well-formed, which tasks are actionable now,
//! what is the longest chain of prerequisite work behind a task, how far
//! along that chain is, and when it is projected to finish.
//!
//! # Key Types
//!
//! - [`TaskGraph`]: a snapshot normalized into an index-addressable graph,
//!   with the reverse (`dependents`) relation recomputed from the
//!   authoritative `dependencies` edges
//! - [`ValidationResult`]: the acyclicity verdict — [`AcyclicGraph`] as a
//!   typed witness, or [`CyclicGraph`] carrying the diagnosed cycle
//! - [`Classification`]: the available/blocked partition
//! - [`Projection`]: completion percentage and projected finish date
//!
//! # Example
//!
//! ```ignore
//! use quorum_task_graph::{TaskGraph, ValidationResult, project};
//!
//! let graph = TaskGraph::build(snapshot)?;
//! let graph = graph.validate().require_acyclic()?;
//!
//! let classification = graph.classify();
//! let path = graph.critical_path("launch-newsletter")?;
//! let projection = project(&path);
//! ```
//!
//! The analyzer is purely synchronous and CPU-bound: no I/O, no shared
//! mutable state. A built graph is immutable, so concurrent read-only
//! queries against it need no coordination; every analysis request gets a
//! graph rebuilt fresh from its snapshot.

mod classify;
mod critical_path;
mod error;
mod graph;
mod projection;
mod traversal;
mod validation;

pub use classify::{BlockedTask, Classification, ClassifyOptions};
pub use error::{Error, Result};
pub use graph::TaskGraph;
pub use projection::{Projection, project};
pub use validation::{AcyclicGraph, CyclicGraph, ValidationResult};
