//! Use cases (application services)
//!
//! - [`orchestration`]: the tutoring workflows and their factory
//! - [`tutor_turn`]: one student message through a session's orchestration

pub mod orchestration;
pub mod tutor_turn;
