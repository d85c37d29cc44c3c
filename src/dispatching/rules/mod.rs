//! Built-in dispatching rules.
//!
//! | Rule | Key | Used by |
//! |------|-----|---------|
//! | FCFS | arrival time | First-Come-First-Served |
//! | SJF | burst time | Shortest-Job-First (non-preemptive) |
//! | SRT | remaining time | Shortest-Remaining-Time (preemptive) |
//! | PRIORITY | priority value | Priority (non-preemptive) |
//!
//! # Score Convention
//! All rules return lower scores for processes that should run first.

use super::{DispatchingRule, RuleScore, SchedulingContext};
use crate::models::{ProcessDescriptor, RuntimeState};

/// First-Come-First-Served.
///
/// Prioritizes processes that arrived earlier.
#[derive(Debug, Clone, Copy)]
pub struct Fcfs;

impl DispatchingRule for Fcfs {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn evaluate(
        &self,
        process: &ProcessDescriptor,
        _state: &RuntimeState,
        _context: &SchedulingContext,
    ) -> RuleScore {
        process.arrival_time
    }

    fn description(&self) -> &'static str {
        "First Come First Served"
    }
}

/// Shortest Job First.
///
/// Prioritizes processes with the shortest total burst. Minimizes mean
/// waiting time among non-preemptive policies when all jobs are ready.
#[derive(Debug, Clone, Copy)]
pub struct Sjf;

impl DispatchingRule for Sjf {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn evaluate(
        &self,
        process: &ProcessDescriptor,
        _state: &RuntimeState,
        _context: &SchedulingContext,
    ) -> RuleScore {
        process.burst_time
    }

    fn description(&self) -> &'static str {
        "Shortest Job First"
    }
}

/// Shortest Remaining Time.
///
/// Prioritizes processes closest to completion, using the run state
/// rather than the original burst.
#[derive(Debug, Clone, Copy)]
pub struct Srt;

impl DispatchingRule for Srt {
    fn name(&self) -> &'static str {
        "SRT"
    }

    fn evaluate(
        &self,
        _process: &ProcessDescriptor,
        state: &RuntimeState,
        _context: &SchedulingContext,
    ) -> RuleScore {
        state.remaining_time
    }

    fn description(&self) -> &'static str {
        "Shortest Remaining Time"
    }
}

/// Static priority.
///
/// Lower priority value = dispatched first. Processes without a priority
/// rank last; priority policy validation rejects them before a run.
#[derive(Debug, Clone, Copy)]
pub struct Priority;

impl DispatchingRule for Priority {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn evaluate(
        &self,
        process: &ProcessDescriptor,
        _state: &RuntimeState,
        _context: &SchedulingContext,
    ) -> RuleScore {
        process
            .priority
            .map(RuleScore::from)
            .unwrap_or(RuleScore::MAX)
    }

    fn description(&self) -> &'static str {
        "Static Priority"
    }
}
