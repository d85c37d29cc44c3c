//! Non-preemptive select-and-run-to-completion scheduler.
//!
//! # Algorithm
//!
//! 1. Collect processes that have arrived and are not completed.
//! 2. If none, the CPU idles until the next arrival.
//! 3. Otherwise pick one by the rule engine (ties: lowest input index).
//! 4. Run it for its whole remaining burst; the clock moves to its completion.
//!
//! FCFS, SJF and Priority differ only in the ranking rule.
//!
//! # Complexity
//! O(n² · r) where n = processes, r = rules in the engine.

use log::debug;

use super::{eligible, next_arrival, SchedulerPolicy, SimulationRun};
use crate::dispatching::{rules, RuleEngine, SchedulingContext};
use crate::models::{ProcessDescriptor, RuntimeState, TimelineBuilder};

/// Rule-driven non-preemptive scheduler.
///
/// # Example
///
/// ```
/// use cpu_sched::models::ProcessDescriptor;
/// use cpu_sched::scheduler::{NonPreemptiveScheduler, SchedulerPolicy};
///
/// let processes = vec![
///     ProcessDescriptor::new("P1", 0, 4),
///     ProcessDescriptor::new("P2", 1, 1),
/// ];
/// let run = NonPreemptiveScheduler::fcfs().simulate(&processes);
/// assert_eq!(run.timeline.to_string(), "P1:0-4, P2:4-5");
/// ```
#[derive(Debug, Clone)]
pub struct NonPreemptiveScheduler {
    name: &'static str,
    engine: RuleEngine,
}

impl NonPreemptiveScheduler {
    /// Creates a scheduler ranking eligible processes with `engine`.
    pub fn new(name: &'static str, engine: RuleEngine) -> Self {
        Self { name, engine }
    }

    /// First-Come-First-Served.
    pub fn fcfs() -> Self {
        Self::new("FCFS", RuleEngine::new().with_rule(rules::Fcfs))
    }

    /// Shortest-Job-First.
    pub fn sjf() -> Self {
        Self::new("SJF-NP", RuleEngine::new().with_rule(rules::Sjf))
    }

    /// Static priority (lower value first).
    pub fn priority() -> Self {
        Self::new("PRIORITY-NP", RuleEngine::new().with_rule(rules::Priority))
    }
}

impl SchedulerPolicy for NonPreemptiveScheduler {
    fn name(&self) -> &'static str {
        self.name
    }

    fn is_preemptive(&self) -> bool {
        false
    }

    fn simulate(&self, processes: &[ProcessDescriptor]) -> SimulationRun {
        let mut states = RuntimeState::for_processes(processes);
        let mut timeline = TimelineBuilder::new();
        let mut clock = 0;
        let mut pending = processes.len();

        while pending > 0 {
            let candidates = eligible(processes, &states, clock);
            let ctx = SchedulingContext::at_time(clock);

            let Some(idx) = self
                .engine
                .select_best(&candidates, processes, &states, &ctx)
            else {
                match next_arrival(processes, &states, clock) {
                    Some(next) => {
                        debug!("{}: CPU idle {}..{}", self.name, clock, next);
                        clock = next;
                        continue;
                    }
                    None => break,
                }
            };

            let process = &processes[idx];
            let state = &mut states[idx];
            let burst = state.remaining_time;
            let end = clock + burst;

            debug!(
                "{}: dispatch {} at {} for {} ({} ready)",
                self.name,
                process.id,
                clock,
                burst,
                candidates.len()
            );

            state.run(clock, burst);
            state.complete(process, end);
            timeline.record(&process.id, clock, end);

            clock = end;
            pending -= 1;
        }

        SimulationRun {
            timeline: timeline.finish(),
            states,
        }
    }
}
