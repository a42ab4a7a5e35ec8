//! Tutoring session domain.
//!
//! - [`entities::Conversation`]: a persisted student/tutor conversation
//! - [`entities::format_history`]: prior turns rendered for the agents
//! - [`response::extract_final_response`]: the tutor text shown to the student

pub mod entities;
pub mod response;
