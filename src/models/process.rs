//! Process descriptor model.
//!
//! A process is the unit of work the simulated CPU dispatches. Its
//! descriptor is immutable input: the scheduler never mutates it and
//! tracks all run-time progress in [`RuntimeState`](super::RuntimeState).

use serde::{Deserialize, Serialize};

/// An immutable process description.
///
/// # Time Representation
/// All times are integer time units relative to the simulation epoch (t=0).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessDescriptor {
    /// Unique process identifier (display name, e.g. "P1").
    pub id: String,
    /// Time at which the process becomes eligible for dispatch.
    pub arrival_time: i64,
    /// Total CPU time the process requires.
    pub burst_time: i64,
    /// Static priority (lower value = higher priority). Only read by
    /// priority scheduling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
}

impl ProcessDescriptor {
    /// Creates a process without a priority.
    pub fn new(id: impl Into<String>, arrival_time: i64, burst_time: i64) -> Self {
        Self {
            id: id.into(),
            arrival_time,
            burst_time,
            priority: None,
        }
    }

    /// Sets the static priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Whether the process has arrived by `time`.
    #[inline]
    pub fn has_arrived(&self, time: i64) -> bool {
        self.arrival_time <= time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_builder() {
        let p = ProcessDescriptor::new("P1", 2, 5).with_priority(3);
        assert_eq!(p.id, "P1");
        assert_eq!(p.arrival_time, 2);
        assert_eq!(p.burst_time, 5);
        assert_eq!(p.priority, Some(3));
    }

    #[test]
    fn test_has_arrived() {
        let p = ProcessDescriptor::new("P1", 4, 1);
        assert!(!p.has_arrived(3));
        assert!(p.has_arrived(4));
        assert!(p.has_arrived(10));
    }

    #[test]
    fn test_priority_is_optional_in_json() {
        let p: ProcessDescriptor =
            serde_json::from_str(r#"{"id":"P2","arrival_time":0,"burst_time":3}"#).unwrap();
        assert_eq!(p.priority, None);

        let json = serde_json::to_string(&ProcessDescriptor::new("P3", 1, 2)).unwrap();
        assert!(!json.contains("priority"));
    }
}
