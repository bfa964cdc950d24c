//! Profiler commands

mod profile;

pub use profile::*;
