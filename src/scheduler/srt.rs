//! Shortest-Remaining-Time (preemptive) scheduler.
//!
//! # Algorithm
//!
//! Conceptually, at every time-unit boundary the eligible process with the
//! least remaining time runs for one unit (ties: lowest input index); a
//! change of process is a context switch.
//!
//! The selection can only change when a process arrives or completes:
//! between those events the running process's remaining time shrinks
//! while every other candidate's stays put, so it keeps winning. The
//! scheduler therefore runs the selected process straight to the next
//! arrival or its own completion, whichever comes first. This yields
//! exactly the segments and metrics of the unit-stepped model.
//!
//! # Complexity
//! O(n² · e) where e ≤ 2n is the number of arrival/completion events,
//! instead of O(n · T) for the unit-stepped model over makespan T.

use log::debug;

use super::{eligible, next_arrival, SchedulerPolicy, SimulationRun};
use crate::dispatching::{rules, RuleEngine, SchedulingContext};
use crate::models::{ProcessDescriptor, RuntimeState, TimelineBuilder};

/// Preemptive shortest-remaining-time scheduler.
#[derive(Debug, Clone)]
pub struct SrtScheduler {
    engine: RuleEngine,
}

impl SrtScheduler {
    /// Creates the scheduler.
    pub fn new() -> Self {
        Self {
            engine: RuleEngine::new().with_rule(rules::Srt),
        }
    }
}

impl Default for SrtScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl SchedulerPolicy for SrtScheduler {
    fn name(&self) -> &'static str {
        "SRT"
    }

    fn is_preemptive(&self) -> bool {
        true
    }

    fn simulate(&self, processes: &[ProcessDescriptor]) -> SimulationRun {
        let mut states = RuntimeState::for_processes(processes);
        let mut timeline = TimelineBuilder::new();
        let mut clock = 0;
        let mut pending = processes.len();
        let mut running: Option<usize> = None;

        while pending > 0 {
            let candidates = eligible(processes, &states, clock);
            let ctx = SchedulingContext::at_time(clock);
            let arrival = next_arrival(processes, &states, clock);

            let Some(idx) = self
                .engine
                .select_best(&candidates, processes, &states, &ctx)
            else {
                match arrival {
                    Some(next) => {
                        debug!("SRT: CPU idle {}..{}", clock, next);
                        clock = next;
                        running = None;
                        continue;
                    }
                    None => break,
                }
            };

            if let Some(prev) = running.filter(|&prev| prev != idx) {
                debug!(
                    "SRT: {} preempts {} at {}",
                    processes[idx].id, processes[prev].id, clock
                );
            }

            let state = &mut states[idx];
            let finish = clock + state.remaining_time;
            let until = arrival.map_or(finish, |next| next.min(finish));

            state.run(clock, until - clock);
            timeline.record(&processes[idx].id, clock, until);
            clock = until;

            if state.is_finished() {
                state.complete(&processes[idx], clock);
                debug!("SRT: {} completes at {}", processes[idx].id, clock);
                pending -= 1;
                running = None;
            } else {
                running = Some(idx);
            }
        }

        SimulationRun {
            timeline: timeline.finish(),
            states,
        }
    }
}
