//! CPU scheduling domain models.
//!
//! Provides the data types shared by every scheduling policy: the
//! immutable process input, the per-run process state, and the
//! execution timeline a run produces.
//!
//! # Ownership
//!
//! | Type | Created | Mutated by | Lifetime |
//! |------|---------|------------|----------|
//! | ProcessDescriptor | caller input | nobody | caller |
//! | RuntimeState | run start | active scheduler | one run |
//! | Timeline | TimelineBuilder | append-only during run | result |

mod process;
mod state;
mod timeline;

pub use process::ProcessDescriptor;
pub use state::RuntimeState;
pub use timeline::{ExecutionSegment, Timeline, TimelineBuilder};
