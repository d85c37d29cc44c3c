//! Round-Robin scheduler.
//!
//! # Algorithm
//!
//! 1. Admit every not-yet-admitted process with `arrival <= now` to the
//!    tail of a FIFO ready queue, in ascending arrival order (ties: input
//!    order).
//! 2. If the queue is empty, the CPU idles until the next arrival.
//! 3. Dequeue the head and run it for `min(quantum, remaining)`.
//! 4. Admit arrivals up to and including the slice end, *then* re-enqueue
//!    the process if it still has work. A process coming back at the same
//!    instant as a fresh arrival lands behind it.

use log::debug;
use std::collections::VecDeque;
use std::num::NonZeroU64;

use super::{SchedulerPolicy, SimulationRun};
use crate::models::{ProcessDescriptor, RuntimeState, TimelineBuilder};

/// Preemptive Round-Robin scheduler with a fixed quantum.
#[derive(Debug, Clone)]
pub struct RoundRobinScheduler {
    quantum: NonZeroU64,
}

impl RoundRobinScheduler {
    /// Creates a scheduler granting at most `quantum` units per dispatch.
    pub fn new(quantum: NonZeroU64) -> Self {
        Self { quantum }
    }

    /// The configured time quantum.
    pub fn quantum(&self) -> NonZeroU64 {
        self.quantum
    }
}

/// Arrival-ordered admission cursor over the input.
struct Admission {
    order: Vec<usize>,
    next: usize,
}

impl Admission {
    fn new(processes: &[ProcessDescriptor]) -> Self {
        let mut order: Vec<usize> = (0..processes.len()).collect();
        // Stable: equal arrivals keep input order
        order.sort_by_key(|&i| processes[i].arrival_time);
        Self { order, next: 0 }
    }

    /// Moves every process that has arrived by `time` into `ready`.
    fn admit(&mut self, processes: &[ProcessDescriptor], time: i64, ready: &mut VecDeque<usize>) {
        while let Some(&idx) = self.order.get(self.next) {
            if !processes[idx].has_arrived(time) {
                break;
            }
            ready.push_back(idx);
            self.next += 1;
        }
    }

    /// Arrival time of the next process not yet admitted.
    fn next_arrival(&self, processes: &[ProcessDescriptor]) -> Option<i64> {
        self.order
            .get(self.next)
            .map(|&idx| processes[idx].arrival_time)
    }
}

impl SchedulerPolicy for RoundRobinScheduler {
    fn name(&self) -> &'static str {
        "RR"
    }

    fn is_preemptive(&self) -> bool {
        true
    }

    fn simulate(&self, processes: &[ProcessDescriptor]) -> SimulationRun {
        let quantum = i64::try_from(self.quantum.get()).unwrap_or(i64::MAX);
        let mut states = RuntimeState::for_processes(processes);
        let mut timeline = TimelineBuilder::new();
        let mut admission = Admission::new(processes);
        let mut ready: VecDeque<usize> = VecDeque::with_capacity(processes.len());
        let mut clock = 0;
        let mut pending = processes.len();

        while pending > 0 {
            admission.admit(processes, clock, &mut ready);

            let Some(idx) = ready.pop_front() else {
                match admission.next_arrival(processes) {
                    Some(next) => {
                        debug!("RR: CPU idle {}..{}", clock, next);
                        clock = next;
                        continue;
                    }
                    None => break,
                }
            };

            let process = &processes[idx];
            let state = &mut states[idx];
            let slice = quantum.min(state.remaining_time);

            state.run(clock, slice);
            timeline.record(&process.id, clock, clock + slice);
            clock += slice;

            // Fresh arrivals queue ahead of the process just preempted
            admission.admit(processes, clock, &mut ready);

            if state.is_finished() {
                state.complete(process, clock);
                debug!("RR: {} completes at {}", process.id, clock);
                pending -= 1;
            } else {
                debug!(
                    "RR: {} preempted at {} ({} left)",
                    process.id, clock, state.remaining_time
                );
                ready.push_back(idx);
            }
        }

        SimulationRun {
            timeline: timeline.finish(),
            states,
        }
    }
}
