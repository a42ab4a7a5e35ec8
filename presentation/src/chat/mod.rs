//! Interactive chat module
//!
//! Provides a line-based interactive chat interface over stdin.

mod repl;

pub use repl::ChatRepl;
