//! CPU scheduling policies, metrics, and the simulation entry points.
//!
//! # Policies
//!
//! | Policy | Scheduler | Preemptive | Rank |
//! |--------|-----------|------------|------|
//! | FCFS | `NonPreemptiveScheduler` | no | arrival time |
//! | SJF-NP | `NonPreemptiveScheduler` | no | burst time |
//! | PRIORITY-NP | `NonPreemptiveScheduler` | no | priority value |
//! | SRT | `SrtScheduler` | yes | remaining time |
//! | RR | `RoundRobinScheduler` | yes | FIFO ready queue |
//!
//! Every rank ties on the lowest original input index.
//!
//! # Metrics
//!
//! `ScheduleKpi` computes waiting, turnaround and response time per
//! process plus CPU-level figures (makespan, utilization, context switches).
//!
//! # References
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

mod kpi;
mod non_preemptive;
mod policy;
mod round_robin;
mod simulator;
mod srt;

pub use kpi::{ProcessMetrics, ScheduleKpi};
pub use non_preemptive::NonPreemptiveScheduler;
pub use policy::{Policy, DEFAULT_QUANTUM};
pub use round_robin::RoundRobinScheduler;
pub use simulator::{run_batch, simulate, PolicyReport, SimulationOutcome, SimulationRequest};
pub use srt::SrtScheduler;

use crate::models::{ProcessDescriptor, RuntimeState, Timeline};
use std::fmt::Debug;

/// A CPU dispatch policy.
///
/// Implementations run the full decision loop over validated input and
/// return the produced timeline with the final per-process state. Runs
/// are deterministic: identical input yields an identical result.
pub trait SchedulerPolicy: Send + Sync + Debug {
    /// Short policy name (e.g., "FCFS", "RR").
    fn name(&self) -> &'static str;

    /// Whether the policy may interrupt a running process.
    fn is_preemptive(&self) -> bool;

    /// Simulates the policy over `processes`.
    ///
    /// Input must satisfy [`validate_input`](crate::validation::validate_input).
    fn simulate(&self, processes: &[ProcessDescriptor]) -> SimulationRun;
}

/// Raw output of one policy run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationRun {
    /// Execution segments in time order.
    pub timeline: Timeline,
    /// Final state per process, index-aligned with the input.
    pub states: Vec<RuntimeState>,
}

/// Indices of processes that can be dispatched at `time`.
fn eligible(processes: &[ProcessDescriptor], states: &[RuntimeState], time: i64) -> Vec<usize> {
    processes
        .iter()
        .zip(states)
        .enumerate()
        .filter(|(_, (p, s))| s.is_eligible(p, time))
        .map(|(i, _)| i)
        .collect()
}

/// Earliest arrival strictly after `time` among unfinished processes.
fn next_arrival(
    processes: &[ProcessDescriptor],
    states: &[RuntimeState],
    time: i64,
) -> Option<i64> {
    processes
        .iter()
        .zip(states)
        .filter(|(p, s)| !s.completed && p.arrival_time > time)
        .map(|(p, _)| p.arrival_time)
        .min()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_timeline;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn all_policies() -> Vec<Policy> {
        Policy::all(2)
            .into_iter()
            .chain([Policy::RoundRobin { quantum: 1 }, Policy::RoundRobin { quantum: 5 }])
            .collect()
    }

    fn random_workload(rng: &mut StdRng) -> Vec<ProcessDescriptor> {
        let n = rng.random_range(1..=8);
        (0..n)
            .map(|i| {
                ProcessDescriptor::new(
                    format!("P{}", i + 1),
                    rng.random_range(0..=12),
                    rng.random_range(1..=7),
                )
                .with_priority(rng.random_range(0..=3))
            })
            .collect()
    }

    #[test]
    fn test_eligible_and_next_arrival() {
        let processes = vec![
            ProcessDescriptor::new("P1", 0, 2),
            ProcessDescriptor::new("P2", 3, 2),
            ProcessDescriptor::new("P3", 5, 2),
        ];
        let mut states = RuntimeState::for_processes(&processes);
        assert_eq!(eligible(&processes, &states, 3), vec![0, 1]);
        assert_eq!(next_arrival(&processes, &states, 0), Some(3));

        states[1].completed = true;
        assert_eq!(eligible(&processes, &states, 3), vec![0]);
        assert_eq!(next_arrival(&processes, &states, 0), Some(5));
        assert_eq!(next_arrival(&processes, &states, 5), None);
    }

    #[test]
    fn test_random_workloads_hold_invariants() {
        let mut rng = StdRng::seed_from_u64(0x5eed);

        for _ in 0..200 {
            let processes = random_workload(&mut rng);
            let horizon: i64 = processes.iter().map(|p| p.burst_time).sum::<i64>()
                + processes.iter().map(|p| p.arrival_time).max().unwrap_or(0);

            for policy in all_policies() {
                let outcome = simulate(&processes, &policy).unwrap();

                // Conservation, ordering, no early start
                validate_timeline(&outcome.timeline, &processes).unwrap();

                assert_eq!(outcome.metrics.processes.len(), processes.len());
                for (p, m) in processes.iter().zip(&outcome.metrics.processes) {
                    assert_eq!(m.turnaround_time, m.completion_time - p.arrival_time);
                    assert_eq!(m.waiting_time, m.turnaround_time - p.burst_time);
                    assert!(m.waiting_time >= 0, "{policy}: {m:?}");
                    assert!(m.completion_time <= horizon, "{policy}: {m:?}");
                }
            }
        }
    }

    #[test]
    fn test_runs_are_idempotent() {
        let mut rng = StdRng::seed_from_u64(7);
        let processes = random_workload(&mut rng);

        for policy in all_policies() {
            let first = simulate(&processes, &policy).unwrap();
            let second = simulate(&processes, &policy).unwrap();
            assert_eq!(first, second);
            assert_eq!(
                serde_json::to_string(&first).unwrap(),
                serde_json::to_string(&second).unwrap()
            );
        }
    }

    #[test]
    fn test_srt_never_waits_longer_than_sjf_on_average() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let processes = random_workload(&mut rng);
            let sjf = simulate(&processes, &Policy::SjfNonPreemptive).unwrap();
            let srt = simulate(&processes, &Policy::Srt).unwrap();
            assert!(srt.metrics.avg_waiting_time <= sjf.metrics.avg_waiting_time + 1e-9);
        }
    }

    #[test]
    fn test_scheduler_names() {
        for policy in Policy::all(DEFAULT_QUANTUM) {
            let scheduler = policy.scheduler().unwrap();
            assert_eq!(scheduler.name(), policy.name());
            assert_eq!(
                scheduler.is_preemptive(),
                matches!(policy, Policy::Srt | Policy::RoundRobin { .. })
            );
        }
    }
}
