//! Round state machine and delayed transitions.
//!
//! - `Round`: one question's lifecycle (assemble, submit, hint, reveal)
//! - `ScheduledTransition`: a generation-stamped one-shot delay
//! - `Scheduler`: a virtual timeline for hosts and tests

pub mod scheduler;
pub mod state;

pub use scheduler::{Due, ScheduledTransition, Scheduler, TransitionKind, TICK_INTERVAL_MS};
pub use state::{AssemblyChange, Round, RoundPhase, RoundStatus};
