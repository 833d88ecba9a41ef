//! Keeper orchestration: snapshot, schedule, decide, submit

pub mod error;
pub mod keeper;
pub mod scheduler;

pub use error::KeeperError;
pub use keeper::{size_amount, CycleOutcome, CycleReport, Keeper};
pub use scheduler::{eligible_actions, Action, Operation, Scheduler};
