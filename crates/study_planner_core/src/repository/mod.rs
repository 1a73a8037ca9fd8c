//! crates/study_planner_core/src/repository/mod.rs
//!
//! Read-through, dual-write repositories.
//!
//! Reads try the remote store first (when configured), warm the local store
//! with whatever they fetch, then fall back to the local store and finally to
//! a fixed default. Writes land in the local store synchronously, are handed
//! to the remote store in the background, and return the new value at once.
//! No operation here fails because of the remote or local tier.

pub mod daily_entry;
pub mod plan;
pub mod profile;
pub mod schedule;

pub use daily_entry::DailyEntryRepository;
pub use plan::PlanRepository;
pub use profile::ProfileStore;
pub use schedule::ScheduleRepository;
