//! Scheduling context for dispatching rule evaluation.

/// Decision-point state passed to dispatching rules.
///
/// Per-process progress lives in [`RuntimeState`](crate::models::RuntimeState);
/// the context carries what is shared by every candidate at one decision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulingContext {
    /// Current simulation time.
    pub current_time: i64,
}

impl SchedulingContext {
    /// Creates a context at the given time.
    pub fn at_time(current_time: i64) -> Self {
        Self { current_time }
    }
}
