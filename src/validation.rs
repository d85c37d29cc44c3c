//! Input and timeline validation for CPU scheduling runs.
//!
//! Input checks run before any simulation state is created and detect:
//! - An empty process set
//! - Duplicate process IDs
//! - Negative arrival times
//! - Non-positive burst times
//! - A non-positive Round-Robin quantum
//! - A completion horizon (latest arrival + total burst) beyond `i64`
//!
//! Timeline checks verify a finished run against its input: every
//! process receives exactly its burst, segments are ordered and disjoint,
//! and no process runs before it arrives.

use crate::models::{ProcessDescriptor, Timeline};
use crate::scheduler::Policy;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// No processes were supplied.
    EmptyProcessSet,
    /// Two processes share the same ID.
    DuplicateId,
    /// A process arrives before t=0.
    NegativeArrival,
    /// A process requires no CPU time (or negative time).
    NonPositiveBurst,
    /// Round-Robin quantum is zero or negative.
    NonPositiveQuantum,
    /// Latest arrival plus total burst does not fit the time type.
    TimeOverflow,
    /// A process received more or less CPU time than its burst.
    ServiceMismatch,
    /// Two segments overlap or are out of order.
    OverlappingSegments,
    /// A segment is empty or runs backwards.
    EmptySegment,
    /// A process ran before its arrival time.
    RunBeforeArrival,
    /// A segment names a process that is not in the input.
    UnknownProcess,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input for a simulation run.
///
/// Checks:
/// 1. At least one process
/// 2. No duplicate process IDs
/// 3. All arrival times ≥ 0
/// 4. All burst times > 0
/// 5. Round-Robin quantum > 0
/// 6. `max(arrival) + sum(burst)` fits in `i64`; every run completes by
///    that horizon, so no clock arithmetic can overflow
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(processes: &[ProcessDescriptor], policy: &Policy) -> ValidationResult {
    let mut errors = Vec::new();

    if processes.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyProcessSet,
            "Process set is empty",
        ));
    }

    let mut ids = HashSet::new();
    for p in processes {
        if !ids.insert(p.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate process ID: {}", p.id),
            ));
        }

        if p.arrival_time < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeArrival,
                format!("Process '{}' has negative arrival time {}", p.id, p.arrival_time),
            ));
        }

        if p.burst_time <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveBurst,
                format!("Process '{}' has non-positive burst time {}", p.id, p.burst_time),
            ));
        }
    }

    if let Policy::RoundRobin { quantum } = *policy {
        if quantum <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveQuantum,
                format!("Round-Robin quantum must be positive, got {quantum}"),
            ));
        }
    }

    if completion_horizon(processes).is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::TimeOverflow,
            "Latest arrival plus total burst time overflows the time range",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Latest time any work-conserving run can complete, or `None` on overflow.
fn completion_horizon(processes: &[ProcessDescriptor]) -> Option<i64> {
    let latest_arrival = processes
        .iter()
        .map(|p| p.arrival_time.max(0))
        .max()
        .unwrap_or(0);
    processes
        .iter()
        .try_fold(latest_arrival, |acc, p| acc.checked_add(p.burst_time.max(0)))
}

/// Verifies a finished timeline against the processes it was built from.
///
/// Checks:
/// 1. Every segment has positive length
/// 2. Segments are ordered by start time and do not overlap
/// 3. Every segment names a known process and starts at or after its arrival
/// 4. Each process's total segment time equals its burst time
pub fn validate_timeline(timeline: &Timeline, processes: &[ProcessDescriptor]) -> ValidationResult {
    let mut errors = Vec::new();
    let by_id: HashMap<&str, &ProcessDescriptor> =
        processes.iter().map(|p| (p.id.as_str(), p)).collect();

    for segment in &timeline.segments {
        if segment.duration() <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptySegment,
                format!("Segment {segment} has non-positive length"),
            ));
        }

        match by_id.get(segment.process_id.as_str()) {
            Some(p) if segment.start < p.arrival_time => {
                errors.push(ValidationError::new(
                    ValidationErrorKind::RunBeforeArrival,
                    format!("Segment {segment} starts before arrival at {}", p.arrival_time),
                ));
            }
            Some(_) => {}
            None => {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownProcess,
                    format!("Segment {segment} names an unknown process"),
                ));
            }
        }
    }

    for pair in timeline.segments.windows(2) {
        if pair[1].start < pair[0].end {
            errors.push(ValidationError::new(
                ValidationErrorKind::OverlappingSegments,
                format!("Segments {} and {} overlap", pair[0], pair[1]),
            ));
        }
    }

    for p in processes {
        let served = timeline.service_time(&p.id);
        if served != p.burst_time {
            errors.push(ValidationError::new(
                ValidationErrorKind::ServiceMismatch,
                format!(
                    "Process '{}' received {served} units but needs {}",
                    p.id, p.burst_time
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
