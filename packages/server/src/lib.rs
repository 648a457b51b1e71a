//! Collaborative code room server.
//!
//! Members of a room share one code buffer, a selected language and a stdin
//! buffer. Edits are broadcast last-write-wins to the other members, and any
//! member can run the buffer against a remote execution backend.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
