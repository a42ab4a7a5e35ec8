//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`]: domain-level errors
//! - [`error::ConfigurationError`]: construction-time configuration errors
//! - [`string::preview`]: log-friendly string previews

pub mod error;
pub mod string;
