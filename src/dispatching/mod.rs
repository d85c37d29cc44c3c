//! Dispatching rules and rule engine for CPU scheduling.
//!
//! Provides the ranking rules behind the non-preemptive and SRT policies
//! (FCFS, SJF, SRT, PRIORITY) and a composable rule engine that picks the
//! best eligible process at a decision point.
//!
//! # Usage
//!
//! ```
//! use cpu_sched::dispatching::{rules, RuleEngine, SchedulingContext};
//! use cpu_sched::models::{ProcessDescriptor, RuntimeState};
//!
//! let processes = vec![
//!     ProcessDescriptor::new("P1", 0, 5),
//!     ProcessDescriptor::new("P2", 0, 2),
//! ];
//! let states = RuntimeState::for_processes(&processes);
//! let engine = RuleEngine::new().with_rule(rules::Sjf);
//!
//! let ctx = SchedulingContext::at_time(0);
//! assert_eq!(engine.select_best(&[0, 1], &processes, &states, &ctx), Some(1));
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

mod context;
mod engine;
pub mod rules;

pub use context::SchedulingContext;
pub use engine::{RuleEngine, TieBreaker};

use crate::models::{ProcessDescriptor, RuntimeState};
use std::fmt::Debug;

/// Score returned by a dispatching rule.
///
/// Lower scores = higher priority (dispatched first). Scores are integral
/// so equal ranks compare exactly and fall through to the tie-breaker.
pub type RuleScore = i64;

/// A dispatching rule that ranks an eligible process.
///
/// # Score Convention
/// **Lower score = higher priority.** Rules should return smaller values
/// for processes that should run first.
pub trait DispatchingRule: Send + Sync + Debug {
    /// Rule name (e.g., "SJF", "SRT").
    fn name(&self) -> &'static str;

    /// Evaluates a process given its run state and the decision context.
    ///
    /// Returns a score where lower = higher priority.
    fn evaluate(
        &self,
        process: &ProcessDescriptor,
        state: &RuntimeState,
        context: &SchedulingContext,
    ) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
