//! Trick-drive: rotating table schedules with minimal repeat pairings.
//!
//! Assigns a fixed population to capacity-limited tables across multiple
//! rounds, approximating a social-golfer design: every pair of participants
//! should meet at most once where the population admits an exact design.
//!
//! ## Strategies
//!
//! - **Exact**: catalogued, hand-verified design cycles for populations
//!   6, 8, 9, 10, 12, 14.
//! - **Fallback**: modular/projective pattern construction for everything
//!   else; seats everyone, repeats are statistical.
//! - **Greedy**: seeded least-repeat assignment, available on request.
//! - **Anchored**: one participant pinned per table, only the rest rotate.
//!
//! The engine is pure and synchronous; quality is graded after the fact by
//! the interaction ledger.

pub mod anchor;
pub mod catalog;
pub mod distribution;
pub mod engine;
pub mod export;
pub mod fallback;
pub mod greedy;
pub mod ledger;
pub mod schedule;

pub use engine::{
    generate_schedule, select_strategy, GenerateConfig, ScheduleEngine, Strategy, ValidationError,
};
pub use export::ExportRecord;
pub use ledger::{interaction_report, InteractionLedger, InteractionReport, RepeatPair};
pub use schedule::{AssignmentGap, Schedule, TableAssignment, TABLE_CAPACITY};
