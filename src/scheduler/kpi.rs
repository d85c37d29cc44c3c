//! Scheduling performance metrics (KPIs).
//!
//! Computes per-process and CPU-level indicators from a finished
//! timeline and its input processes.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Turnaround | completion − arrival |
//! | Waiting | turnaround − burst |
//! | Response | first dispatch − arrival |
//! | Makespan | latest completion time |
//! | Utilization | busy time / makespan |
//! | Throughput | completed processes / makespan |
//! | Context switches | hand-overs between different processes |
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2: Scheduling Criteria

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{ProcessDescriptor, Timeline};

/// Per-process row of the metrics table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessMetrics {
    /// Process identifier.
    pub process_id: String,
    /// Arrival time.
    pub arrival_time: i64,
    /// Burst time.
    pub burst_time: i64,
    /// Static priority, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    /// First dispatch time.
    pub start_time: i64,
    /// Completion time.
    pub completion_time: i64,
    /// Time spent eligible but not running.
    pub waiting_time: i64,
    /// Time from arrival to completion.
    pub turnaround_time: i64,
    /// Time from arrival to first dispatch.
    pub response_time: i64,
}

/// Schedule performance indicators for one policy run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleKpi {
    /// Per-process metrics in input order.
    pub processes: Vec<ProcessMetrics>,
    /// Mean waiting time.
    pub avg_waiting_time: f64,
    /// Mean turnaround time.
    pub avg_turnaround_time: f64,
    /// Mean response time.
    pub avg_response_time: f64,
    /// Latest completion time.
    pub makespan: i64,
    /// Time the CPU spent running processes.
    pub busy_time: i64,
    /// Time the CPU spent idle before the makespan.
    pub idle_time: i64,
    /// Busy time over makespan (0.0..1.0).
    pub cpu_utilization: f64,
    /// Completed processes per time unit.
    pub throughput: f64,
    /// Number of hand-overs between different processes.
    pub context_switches: usize,
}

impl ScheduleKpi {
    /// Computes KPIs from a timeline and its input processes.
    ///
    /// Processes that never appear in the timeline are left out of the
    /// per-process table and the averages.
    pub fn calculate(timeline: &Timeline, processes: &[ProcessDescriptor]) -> Self {
        let rows: Vec<ProcessMetrics> = processes
            .iter()
            .filter_map(|p| {
                let start = timeline.first_start(&p.id)?;
                let completion = timeline.completion_time(&p.id)?;
                let turnaround = completion - p.arrival_time;
                Some(ProcessMetrics {
                    process_id: p.id.clone(),
                    arrival_time: p.arrival_time,
                    burst_time: p.burst_time,
                    priority: p.priority,
                    start_time: start,
                    completion_time: completion,
                    waiting_time: turnaround - p.burst_time,
                    turnaround_time: turnaround,
                    response_time: start - p.arrival_time,
                })
            })
            .collect();

        let makespan = timeline.makespan();
        let throughput = if makespan > 0 {
            rows.len() as f64 / makespan as f64
        } else {
            0.0
        };

        Self {
            avg_waiting_time: mean(rows.iter().map(|m| m.waiting_time)),
            avg_turnaround_time: mean(rows.iter().map(|m| m.turnaround_time)),
            avg_response_time: mean(rows.iter().map(|m| m.response_time)),
            makespan,
            busy_time: timeline.busy_time(),
            idle_time: timeline.idle_time(),
            cpu_utilization: timeline.cpu_utilization().unwrap_or(0.0),
            throughput,
            context_switches: timeline.context_switches(),
            processes: rows,
        }
    }

    /// Metrics row for a process.
    pub fn metrics_for(&self, process_id: &str) -> Option<&ProcessMetrics> {
        self.processes.iter().find(|m| m.process_id == process_id)
    }

    /// Mean waiting time rounded to two decimals for display.
    pub fn rounded_avg_waiting_time(&self) -> f64 {
        round_hundredths(self.avg_waiting_time)
    }

    /// Mean turnaround time rounded to two decimals for display.
    pub fn rounded_avg_turnaround_time(&self) -> f64 {
        round_hundredths(self.avg_turnaround_time)
    }
}

impl fmt::Display for ScheduleKpi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Avg Waiting: {:.2}, Avg Turnaround: {:.2}",
            self.avg_waiting_time, self.avg_turnaround_time
        )
    }
}

fn mean(values: impl Iterator<Item = i64>) -> f64 {
    // Per-process times fit in i64 but their sum need not
    let (sum, count) = values.fold((0i128, 0usize), |(s, c), v| (s + i128::from(v), c + 1));
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimelineBuilder;

    fn fcfs_reference() -> (Timeline, Vec<ProcessDescriptor>) {
        let processes = vec![
            ProcessDescriptor::new("P1", 0, 5),
            ProcessDescriptor::new("P2", 2, 3),
            ProcessDescriptor::new("P3", 4, 1),
            ProcessDescriptor::new("P4", 6, 2),
        ];
        let mut b = TimelineBuilder::new();
        b.record("P1", 0, 5);
        b.record("P2", 5, 8);
        b.record("P3", 8, 9);
        b.record("P4", 9, 11);
        (b.finish(), processes)
    }

    #[test]
    fn test_kpi_basic() {
        let (timeline, processes) = fcfs_reference();
        let kpi = ScheduleKpi::calculate(&timeline, &processes);

        let waits: Vec<_> = kpi.processes.iter().map(|m| m.waiting_time).collect();
        let tats: Vec<_> = kpi.processes.iter().map(|m| m.turnaround_time).collect();
        assert_eq!(waits, vec![0, 3, 4, 3]);
        assert_eq!(tats, vec![5, 6, 5, 5]);
        assert!((kpi.avg_waiting_time - 2.5).abs() < 1e-10);
        assert!((kpi.avg_turnaround_time - 5.25).abs() < 1e-10);
        assert_eq!(kpi.makespan, 11);
        assert_eq!(kpi.context_switches, 3);
    }

    #[test]
    fn test_kpi_response_time_for_preempted_process() {
        let processes = vec![
            ProcessDescriptor::new("A", 0, 4),
            ProcessDescriptor::new("B", 1, 2),
        ];
        let mut b = TimelineBuilder::new();
        b.record("A", 0, 2);
        b.record("B", 2, 4);
        b.record("A", 4, 6);
        let kpi = ScheduleKpi::calculate(&b.finish(), &processes);

        let a = kpi.metrics_for("A").unwrap();
        assert_eq!(a.response_time, 0);
        assert_eq!(a.waiting_time, 2);
        let b = kpi.metrics_for("B").unwrap();
        assert_eq!(b.response_time, 1);
        assert_eq!(b.start_time, 2);
    }

    #[test]
    fn test_kpi_utilization_and_throughput() {
        let processes = vec![
            ProcessDescriptor::new("P1", 0, 2),
            ProcessDescriptor::new("P2", 6, 2),
        ];
        let mut b = TimelineBuilder::new();
        b.record("P1", 0, 2);
        b.record("P2", 6, 8);
        let kpi = ScheduleKpi::calculate(&b.finish(), &processes);

        assert_eq!(kpi.busy_time, 4);
        assert_eq!(kpi.idle_time, 4);
        assert!((kpi.cpu_utilization - 0.5).abs() < 1e-10);
        assert!((kpi.throughput - 0.25).abs() < 1e-10);
    }

    #[test]
    fn test_rounding_and_display() {
        let processes = vec![
            ProcessDescriptor::new("P1", 0, 1),
            ProcessDescriptor::new("P2", 0, 1),
            ProcessDescriptor::new("P3", 0, 1),
        ];
        let mut b = TimelineBuilder::new();
        b.record("P1", 0, 1);
        b.record("P2", 1, 2);
        b.record("P3", 2, 3);
        let kpi = ScheduleKpi::calculate(&b.finish(), &processes);

        // waits 0,1,2 → 1.0; turnarounds 1,2,3 → 2.0
        assert!((kpi.rounded_avg_waiting_time() - 1.0).abs() < 1e-10);
        assert_eq!(kpi.to_string(), "Avg Waiting: 1.00, Avg Turnaround: 2.00");
        assert!((round_hundredths(2.0 / 3.0) - 0.67).abs() < 1e-10);
    }

    #[test]
    fn test_mean_of_large_values() {
        let avg = mean([i64::MAX, i64::MAX - 2].into_iter());
        assert!((avg - i64::MAX as f64).abs() < 1e3);
        assert!((mean(std::iter::empty()) - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_kpi_empty() {
        let kpi = ScheduleKpi::calculate(&Timeline::default(), &[]);
        assert!(kpi.processes.is_empty());
        assert_eq!(kpi.makespan, 0);
        assert!((kpi.avg_waiting_time - 0.0).abs() < 1e-10);
        assert!((kpi.cpu_utilization - 0.0).abs() < 1e-10);
        assert!((kpi.throughput - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_unscheduled_process_excluded() {
        let (timeline, mut processes) = fcfs_reference();
        processes.push(ProcessDescriptor::new("ghost", 0, 1));
        let kpi = ScheduleKpi::calculate(&timeline, &processes);
        assert_eq!(kpi.processes.len(), 4);
        assert!(kpi.metrics_for("ghost").is_none());
    }
}
