//! Practice domain library
//!
//! Owner-scoped records of a wellness practice (clients, services, packages,
//! appointments, session notes, payments) together with the pure logic the
//! service computes over them: the appointment calendar grid, list search and
//! KPI aggregation. Nothing in this crate performs I/O.

pub mod aggregates;
pub mod calendar;
pub mod models;
pub mod search;
