//! Core plumbing: error taxonomy, configuration, serialized console output.

pub mod config;
pub mod console;
pub mod errors;
