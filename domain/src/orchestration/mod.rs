//! Orchestration domain
//!
//! Configuration, agent input and per-variant workflow state for the
//! tutoring orchestrations. The sequencing itself lives in the application
//! layer; this module only holds the data it moves around.

pub mod config;
pub mod entities;
pub mod input;
pub mod state;
