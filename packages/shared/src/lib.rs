//! Utilities shared by the Codecast packages.

pub mod logger;
pub mod time;
