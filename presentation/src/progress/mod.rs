//! Progress indicators for running workflows

pub mod reporter;
