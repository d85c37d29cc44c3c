//! Simulation entry points.
//!
//! `simulate` validates input, runs one policy and computes its metrics.
//! `run_batch` does the same for every policy of a `SimulationRequest`,
//! each independently: a policy that rejects the input does not stop the
//! others.

use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::{Policy, ScheduleKpi};
use crate::error::{SimulationError, SimulationResult};
use crate::models::{ProcessDescriptor, Timeline};
use crate::validation::validate_input;

/// Input container for a batch of simulation runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    /// Processes, in input order (input order breaks ranking ties).
    pub processes: Vec<ProcessDescriptor>,
    /// Policies to run.
    #[serde(default)]
    pub policies: Vec<Policy>,
}

impl SimulationRequest {
    /// Creates a request with no policies.
    pub fn new(processes: Vec<ProcessDescriptor>) -> Self {
        Self {
            processes,
            policies: Vec::new(),
        }
    }

    /// Adds a policy.
    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.policies.push(policy);
        self
    }

    /// Adds all five policies, Round-Robin using `quantum`.
    pub fn with_all_policies(mut self, quantum: i64) -> Self {
        self.policies.extend(Policy::all(quantum));
        self
    }
}

/// Timeline and metrics of one successful policy run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutcome {
    /// Policy that produced this outcome.
    pub policy: Policy,
    /// Execution segments in time order.
    pub timeline: Timeline,
    /// Per-process and aggregate metrics.
    pub metrics: ScheduleKpi,
}

/// Result of one policy within a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyReport {
    /// The policy that was run.
    pub policy: Policy,
    /// Its outcome, or why it was refused.
    pub result: SimulationResult<SimulationOutcome>,
}

/// Runs one policy over `processes`.
///
/// Input is validated before any run state is created; on failure no
/// partial timeline is produced.
///
/// # Example
///
/// ```
/// use cpu_sched::models::ProcessDescriptor;
/// use cpu_sched::scheduler::{simulate, Policy};
///
/// let processes = vec![
///     ProcessDescriptor::new("P1", 0, 5),
///     ProcessDescriptor::new("P2", 2, 3),
/// ];
/// let outcome = simulate(&processes, &Policy::RoundRobin { quantum: 2 }).unwrap();
/// assert_eq!(outcome.timeline.to_string(), "P1:0-2, P2:2-4, P1:4-6, P2:6-7, P1:7-8");
/// assert_eq!(outcome.metrics.makespan, 8);
/// ```
pub fn simulate(
    processes: &[ProcessDescriptor],
    policy: &Policy,
) -> SimulationResult<SimulationOutcome> {
    if let Err(errors) = validate_input(processes, policy) {
        warn!("{}: rejected input ({} error(s))", policy.name(), errors.len());
        return Err(SimulationError::Validation(errors));
    }
    if let Err(err) = policy.check_requirements(processes) {
        warn!("{}: {}", policy.name(), err);
        return Err(err.into());
    }

    let scheduler = policy.scheduler()?;
    let run = scheduler.simulate(processes);
    let metrics = ScheduleKpi::calculate(&run.timeline, processes);

    debug_assert!(run.states.iter().all(|s| s.completed));
    debug_assert!(run
        .states
        .iter()
        .zip(&metrics.processes)
        .all(|(s, m)| s.waiting_time == Some(m.waiting_time)
            && s.turnaround_time == Some(m.turnaround_time)));

    info!(
        "{}: {} processes, {} segments, makespan {}, {}",
        policy,
        processes.len(),
        run.timeline.segment_count(),
        metrics.makespan,
        metrics
    );

    Ok(SimulationOutcome {
        policy: *policy,
        timeline: run.timeline,
        metrics,
    })
}

/// Runs every policy of `request` independently.
///
/// Reports come back in request order.
pub fn run_batch(request: &SimulationRequest) -> Vec<PolicyReport> {
    request
        .policies
        .iter()
        .map(|policy| PolicyReport {
            policy: *policy,
            result: simulate(&request.processes, policy),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PolicyError;
    use crate::validation::ValidationErrorKind;

    fn reference_processes() -> Vec<ProcessDescriptor> {
        vec![
            ProcessDescriptor::new("P1", 0, 5).with_priority(2),
            ProcessDescriptor::new("P2", 2, 3).with_priority(1),
            ProcessDescriptor::new("P3", 4, 1).with_priority(3),
            ProcessDescriptor::new("P4", 6, 2).with_priority(4),
        ]
    }

    fn waits(outcome: &SimulationOutcome) -> Vec<i64> {
        outcome
            .metrics
            .processes
            .iter()
            .map(|m| m.waiting_time)
            .collect()
    }

    #[test]
    fn test_reference_workload_all_policies() {
        let request = SimulationRequest::new(reference_processes()).with_all_policies(2);
        let reports = run_batch(&request);
        assert_eq!(reports.len(), 5);

        let outcomes: Vec<_> = reports
            .iter()
            .map(|r| r.result.as_ref().unwrap())
            .collect();

        assert_eq!(waits(outcomes[0]), vec![0, 3, 4, 3]); // FCFS
        assert_eq!(waits(outcomes[1]), vec![0, 6, 1, 0]); // SJF-NP
        assert_eq!(waits(outcomes[2]), vec![0, 6, 1, 0]); // SRT
        assert_eq!(waits(outcomes[3]), vec![6, 3, 2, 2]); // RR q=2
        assert_eq!(waits(outcomes[4]), vec![0, 3, 4, 3]); // PRIORITY-NP

        assert_eq!(outcomes[0].metrics.to_string(), "Avg Waiting: 2.50, Avg Turnaround: 5.25");
        assert_eq!(outcomes[1].metrics.to_string(), "Avg Waiting: 1.75, Avg Turnaround: 4.50");
        assert_eq!(outcomes[3].metrics.to_string(), "Avg Waiting: 3.25, Avg Turnaround: 6.00");
    }

    #[test]
    fn test_fcfs_starts_and_ends() {
        let outcome = simulate(&reference_processes(), &Policy::Fcfs).unwrap();
        let starts: Vec<_> = outcome.metrics.processes.iter().map(|m| m.start_time).collect();
        let ends: Vec<_> = outcome
            .metrics
            .processes
            .iter()
            .map(|m| m.completion_time)
            .collect();
        assert_eq!(starts, vec![0, 5, 8, 9]);
        assert_eq!(ends, vec![5, 8, 9, 11]);
    }

    #[test]
    fn test_validation_failure_returns_no_outcome() {
        let processes = vec![ProcessDescriptor::new("P1", 0, 0)];
        let err = simulate(&processes, &Policy::Srt).unwrap_err();
        match err {
            SimulationError::Validation(errors) => {
                assert_eq!(errors[0].kind, ValidationErrorKind::NonPositiveBurst);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_time_overflow_rejected_for_every_policy() {
        let late = vec![ProcessDescriptor::new("P1", i64::MAX - 2, 5).with_priority(1)];
        let half = i64::MAX / 2 + 1;
        let huge = vec![
            ProcessDescriptor::new("P1", 0, half).with_priority(1),
            ProcessDescriptor::new("P2", 0, half).with_priority(2),
        ];

        for processes in [&late, &huge] {
            for policy in Policy::all(i64::MAX) {
                match simulate(processes, &policy).unwrap_err() {
                    SimulationError::Validation(errors) => {
                        assert_eq!(errors[0].kind, ValidationErrorKind::TimeOverflow);
                    }
                    other => panic!("{policy}: unexpected error: {other:?}"),
                }
            }
        }
    }

    #[test]
    fn test_empty_input_rejected() {
        let err = simulate(&[], &Policy::Fcfs).unwrap_err();
        assert!(matches!(err, SimulationError::Validation(_)));
    }

    #[test]
    fn test_batch_failures_are_isolated() {
        // No priorities: only the priority policy fails
        let processes = vec![
            ProcessDescriptor::new("P1", 0, 3),
            ProcessDescriptor::new("P2", 1, 2),
        ];
        let request = SimulationRequest::new(processes)
            .with_policy(Policy::PriorityNonPreemptive)
            .with_policy(Policy::RoundRobin { quantum: 0 })
            .with_policy(Policy::Fcfs);
        let reports = run_batch(&request);

        assert_eq!(
            reports[0].result,
            Err(SimulationError::Policy(PolicyError::MissingPriority {
                process_id: "P1".into()
            }))
        );
        assert!(matches!(
            reports[1].result,
            Err(SimulationError::Validation(_))
        ));
        assert!(reports[2].result.is_ok());
        assert_eq!(reports[2].policy, Policy::Fcfs);
    }

    #[test]
    fn test_request_from_json() {
        let json = r#"{
            "processes": [
                {"id": "P1", "arrival_time": 0, "burst_time": 5, "priority": 2},
                {"id": "P2", "arrival_time": 2, "burst_time": 3, "priority": 1}
            ],
            "policies": [
                {"policy": "fcfs"},
                {"policy": "round_robin", "quantum": 2}
            ]
        }"#;
        let request: SimulationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.processes.len(), 2);
        assert_eq!(
            request.policies,
            vec![Policy::Fcfs, Policy::RoundRobin { quantum: 2 }]
        );

        let reports = run_batch(&request);
        assert!(reports.iter().all(|r| r.result.is_ok()));
    }

    #[test]
    fn test_outcome_serializes_segments() {
        let outcome = simulate(&reference_processes(), &Policy::Fcfs).unwrap();
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["policy"]["policy"], "fcfs");
        assert_eq!(value["timeline"]["segments"][1]["process_id"], "P2");
        assert_eq!(value["timeline"]["segments"][1]["start"], 5);
        assert_eq!(value["metrics"]["makespan"], 11);
    }
}
