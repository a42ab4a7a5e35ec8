//! Teacher consensus domain
//!
//! In the round-based multi-agent variant the teacher decides whether the
//! tutor's answer is ready. Its free-form review is the one place where
//! natural language becomes a control-flow decision:
//!
//! ```text
//! teacher text ──► parse_consensus ──► (consensus, ConsensusVerdict)
//!                                          │
//!                     consensus == true ───┴──► stop the round loop
//! ```

pub mod consensus;
pub mod parsing;

pub use consensus::{ConsensusMarker, ConsensusVerdict};
pub use parsing::parse_consensus;
