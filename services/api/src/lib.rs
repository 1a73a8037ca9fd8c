//! services/api/src/lib.rs
//!
//! The study planner service: storage and analysis adapters, configuration,
//! and the HTTP surface.

pub mod adapters;
pub mod config;
pub mod error;
pub mod web;
