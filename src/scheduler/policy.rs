//! Policy selection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;

use super::{NonPreemptiveScheduler, RoundRobinScheduler, SchedulerPolicy, SrtScheduler};
use crate::error::{PolicyError, SimulationError, SimulationResult};
use crate::models::ProcessDescriptor;
use crate::validation::{ValidationError, ValidationErrorKind};

/// Round-Robin quantum used when a policy name omits one.
pub const DEFAULT_QUANTUM: i64 = 2;

/// Scheduling policy selector.
///
/// Serializes as an internally tagged object, e.g.
/// `{"policy": "round_robin", "quantum": 2}` or `{"policy": "fcfs"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "policy")]
pub enum Policy {
    /// First-Come-First-Served.
    #[serde(rename = "fcfs")]
    Fcfs,
    /// Shortest-Job-First, non-preemptive.
    #[serde(rename = "sjf")]
    SjfNonPreemptive,
    /// Shortest-Remaining-Time, preemptive.
    #[serde(rename = "srt")]
    Srt,
    /// Round-Robin with a fixed time quantum.
    #[serde(rename = "round_robin")]
    RoundRobin {
        /// Maximum contiguous slice per dispatch.
        quantum: i64,
    },
    /// Static priority, non-preemptive (lower value first).
    #[serde(rename = "priority")]
    PriorityNonPreemptive,
}

impl Policy {
    /// All five policies, Round-Robin using `quantum`.
    pub fn all(quantum: i64) -> Vec<Policy> {
        vec![
            Policy::Fcfs,
            Policy::SjfNonPreemptive,
            Policy::Srt,
            Policy::RoundRobin { quantum },
            Policy::PriorityNonPreemptive,
        ]
    }

    /// Short policy name.
    pub fn name(&self) -> &'static str {
        match self {
            Policy::Fcfs => "FCFS",
            Policy::SjfNonPreemptive => "SJF-NP",
            Policy::Srt => "SRT",
            Policy::RoundRobin { .. } => "RR",
            Policy::PriorityNonPreemptive => "PRIORITY-NP",
        }
    }

    /// Checks policy-specific input requirements.
    ///
    /// Priority scheduling needs a priority on every process.
    pub fn check_requirements(&self, processes: &[ProcessDescriptor]) -> Result<(), PolicyError> {
        if *self != Policy::PriorityNonPreemptive {
            return Ok(());
        }
        match processes.iter().find(|p| p.priority.is_none()) {
            Some(p) => Err(PolicyError::MissingPriority {
                process_id: p.id.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Builds the scheduler implementing this policy.
    pub fn scheduler(&self) -> SimulationResult<Box<dyn SchedulerPolicy>> {
        Ok(match *self {
            Policy::Fcfs => Box::new(NonPreemptiveScheduler::fcfs()),
            Policy::SjfNonPreemptive => Box::new(NonPreemptiveScheduler::sjf()),
            Policy::Srt => Box::new(SrtScheduler::new()),
            Policy::RoundRobin { quantum } => {
                let quantum = u64::try_from(quantum)
                    .ok()
                    .and_then(NonZeroU64::new)
                    .ok_or_else(|| {
                        SimulationError::Validation(vec![ValidationError::new(
                            ValidationErrorKind::NonPositiveQuantum,
                            format!("Round-Robin quantum must be positive, got {quantum}"),
                        )])
                    })?;
                Box::new(RoundRobinScheduler::new(quantum))
            }
            Policy::PriorityNonPreemptive => Box::new(NonPreemptiveScheduler::priority()),
        })
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::Fcfs => write!(f, "FCFS"),
            Policy::SjfNonPreemptive => write!(f, "SJF Non-preemptive"),
            Policy::Srt => write!(f, "SRT (Shortest Remaining Time)"),
            Policy::RoundRobin { quantum } => write!(f, "Round Robin (Quantum = {quantum})"),
            Policy::PriorityNonPreemptive => write!(f, "Priority Non-preemptive"),
        }
    }
}

impl FromStr for Policy {
    type Err = PolicyError;

    /// Parses `fcfs`, `sjf`, `srt`, `priority`, `rr` or `rr:<quantum>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let (name, arg) = match lowered.split_once(':') {
            Some((name, arg)) => (name.trim(), Some(arg.trim())),
            None => (lowered.as_str(), None),
        };
        let name = name.replace('-', "_");
        let unknown = || PolicyError::UnknownPolicy(s.to_string());

        match (name.as_str(), arg) {
            ("fcfs" | "fifo", None) => Ok(Policy::Fcfs),
            ("sjf" | "sjf_np", None) => Ok(Policy::SjfNonPreemptive),
            ("srt" | "srtf", None) => Ok(Policy::Srt),
            ("priority" | "priority_np", None) => Ok(Policy::PriorityNonPreemptive),
            ("rr" | "round_robin", None) => Ok(Policy::RoundRobin {
                quantum: DEFAULT_QUANTUM,
            }),
            ("rr" | "round_robin", Some(q)) => q
                .parse()
                .map(|quantum| Policy::RoundRobin { quantum })
                .map_err(|_| unknown()),
            _ => Err(unknown()),
        }
    }
}
