//! Deterministic CPU scheduling simulator.
//!
//! Simulates single-CPU dispatch over a fixed set of processes and
//! produces, for each policy, an execution timeline and per-process
//! metrics. Rendering (Gantt charts, tables) is left to the caller: every
//! result type is plain serde-serializable data.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `ProcessDescriptor`, `RuntimeState`,
//!   `ExecutionSegment`, `Timeline`, `TimelineBuilder`
//! - **`dispatching`**: Ranking rules (FCFS, SJF, SRT, PRIORITY) and the
//!   `RuleEngine` that applies them with an explicit tie-breaker
//! - **`scheduler`**: The five policies, `ScheduleKpi` metrics, and the
//!   `simulate` / `run_batch` entry points
//! - **`validation`**: Input checks and timeline verification
//!
//! # Example
//!
//! ```
//! use cpu_sched::models::ProcessDescriptor;
//! use cpu_sched::scheduler::{simulate, Policy};
//!
//! let processes = vec![
//!     ProcessDescriptor::new("P1", 0, 5),
//!     ProcessDescriptor::new("P2", 2, 3),
//!     ProcessDescriptor::new("P3", 4, 1),
//!     ProcessDescriptor::new("P4", 6, 2),
//! ];
//!
//! let outcome = simulate(&processes, &Policy::Fcfs).unwrap();
//! assert_eq!(outcome.timeline.to_string(), "P1:0-5, P2:5-8, P3:8-9, P4:9-11");
//! assert_eq!(outcome.metrics.to_string(), "Avg Waiting: 2.50, Avg Turnaround: 5.25");
//! ```
//!
//! # Determinism
//!
//! Runs are single-threaded and use no randomness or wall-clock time.
//! When processes rank equally, the one earliest in the input wins.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

pub mod dispatching;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use error::{PolicyError, SimulationError, SimulationResult};
