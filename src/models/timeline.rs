//! Execution timeline model.
//!
//! A timeline is the chronological record of which process held the
//! single CPU during which interval. It is the data a Gantt-style chart
//! renders: segments are ordered by start time and never overlap.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A contiguous interval during which one process occupies the CPU.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionSegment {
    /// Process holding the CPU.
    pub process_id: String,
    /// Start time (inclusive).
    pub start: i64,
    /// End time (exclusive).
    pub end: i64,
}

impl ExecutionSegment {
    /// Creates a new segment.
    pub fn new(process_id: impl Into<String>, start: i64, end: i64) -> Self {
        Self {
            process_id: process_id.into(),
            start,
            end,
        }
    }

    /// Length of the interval.
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }

    /// Chart label in `start-end` form.
    pub fn label(&self) -> String {
        format!("{}-{}", self.start, self.end)
    }
}

impl fmt::Display for ExecutionSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.process_id, self.start, self.end)
    }
}

/// The ordered segment sequence produced by one simulation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    /// Segments ordered by start time.
    pub segments: Vec<ExecutionSegment>,
}

impl Timeline {
    /// Latest segment end, or 0 for an empty timeline.
    pub fn makespan(&self) -> i64 {
        self.segments.last().map(|s| s.end).unwrap_or(0)
    }

    /// Returns all segments for a given process, in time order.
    pub fn segments_for_process(&self, process_id: &str) -> Vec<&ExecutionSegment> {
        self.segments
            .iter()
            .filter(|s| s.process_id == process_id)
            .collect()
    }

    /// Completion time for a process (end of its last segment).
    pub fn completion_time(&self, process_id: &str) -> Option<i64> {
        self.segments
            .iter()
            .rev()
            .find(|s| s.process_id == process_id)
            .map(|s| s.end)
    }

    /// First dispatch time for a process.
    pub fn first_start(&self, process_id: &str) -> Option<i64> {
        self.segments
            .iter()
            .find(|s| s.process_id == process_id)
            .map(|s| s.start)
    }

    /// Total CPU time delivered to a process.
    pub fn service_time(&self, process_id: &str) -> i64 {
        self.segments_for_process(process_id)
            .iter()
            .map(|s| s.duration())
            .sum()
    }

    /// Total time the CPU was busy.
    pub fn busy_time(&self) -> i64 {
        self.segments.iter().map(ExecutionSegment::duration).sum()
    }

    /// Idle time between t=0 and the makespan.
    pub fn idle_time(&self) -> i64 {
        self.makespan() - self.busy_time()
    }

    /// Busy time over makespan. Returns `None` for an empty timeline.
    pub fn cpu_utilization(&self) -> Option<f64> {
        let horizon = self.makespan();
        if horizon <= 0 {
            return None;
        }
        Some(self.busy_time() as f64 / horizon as f64)
    }

    /// Number of times the CPU passed from one process to a different one.
    ///
    /// Idle gaps between two segments of the same process do not count.
    pub fn context_switches(&self) -> usize {
        self.segments
            .windows(2)
            .filter(|w| w[0].process_id != w[1].process_id)
            .count()
    }

    /// Number of segments.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }
}

impl fmt::Display for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for segment in &self.segments {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{segment}")?;
            first = false;
        }
        Ok(())
    }
}

/// Accumulates segments while a scheduler makes dispatch decisions.
///
/// A segment that continues the previous one (same process, no gap) is
/// merged into it, so a context switch is the only thing that opens a
/// new segment.
#[derive(Debug, Default)]
pub struct TimelineBuilder {
    segments: Vec<ExecutionSegment>,
}

impl TimelineBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `process_id` ran during `[start, end)`.
    pub fn record(&mut self, process_id: &str, start: i64, end: i64) {
        debug_assert!(end > start, "empty segment {process_id}:{start}-{end}");
        debug_assert!(self.segments.last().map_or(true, |last| last.end <= start));

        if let Some(last) = self.segments.last_mut() {
            if last.process_id == process_id && last.end == start {
                last.end = end;
                return;
            }
        }
        self.segments.push(ExecutionSegment::new(process_id, start, end));
    }

    /// Consumes the builder into a finished timeline.
    pub fn finish(self) -> Timeline {
        Timeline {
            segments: self.segments,
        }
    }
}
