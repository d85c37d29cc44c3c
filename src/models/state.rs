//! Per-process run state.

use serde::{Deserialize, Serialize};

use super::ProcessDescriptor;

/// Mutable state of one process during a single simulation run.
///
/// Created from a descriptor at run start, mutated only by the active
/// scheduler, and returned with the run's result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeState {
    /// CPU time still owed to the process.
    pub remaining_time: i64,
    /// Whether the process has finished.
    pub completed: bool,
    /// Time of first dispatch.
    pub start_time: Option<i64>,
    /// Completion time.
    pub end_time: Option<i64>,
    /// Time spent eligible but not running. Set on completion.
    pub waiting_time: Option<i64>,
    /// Time from arrival to completion. Set on completion.
    pub turnaround_time: Option<i64>,
}

impl RuntimeState {
    /// Creates the initial state for a process.
    pub fn new(process: &ProcessDescriptor) -> Self {
        Self {
            remaining_time: process.burst_time,
            completed: false,
            start_time: None,
            end_time: None,
            waiting_time: None,
            turnaround_time: None,
        }
    }

    /// Creates initial states for all processes, index-aligned with the input.
    pub fn for_processes(processes: &[ProcessDescriptor]) -> Vec<Self> {
        processes.iter().map(Self::new).collect()
    }

    /// Whether the process can be dispatched at `time`.
    #[inline]
    pub fn is_eligible(&self, process: &ProcessDescriptor, time: i64) -> bool {
        !self.completed && process.has_arrived(time)
    }

    /// Runs the process on the CPU from `start` for `duration` units.
    ///
    /// Records the first dispatch time. `duration` never exceeds the
    /// remaining time.
    pub fn run(&mut self, start: i64, duration: i64) {
        debug_assert!(duration > 0 && duration <= self.remaining_time);
        if self.start_time.is_none() {
            self.start_time = Some(start);
        }
        self.remaining_time -= duration;
    }

    /// Whether all owed CPU time has been delivered.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.remaining_time == 0
    }

    /// Marks the process completed at `end_time` and computes its metrics.
    pub fn complete(&mut self, process: &ProcessDescriptor, end_time: i64) {
        let turnaround = end_time - process.arrival_time;
        self.completed = true;
        self.end_time = Some(end_time);
        self.turnaround_time = Some(turnaround);
        self.waiting_time = Some(turnaround - process.burst_time);
    }
}
