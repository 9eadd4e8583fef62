//! Header scanning.
//!
//! Extracts macro, typedef and exported-declaration blocks from C headers
//! written in the engine's header style. Lines are classified by prefix and
//! brace balance; see [`classify`] for the state machine.

pub mod aggregate;
pub mod classify;
pub mod header;
pub mod rules;
pub mod state;

pub use aggregate::{aggregate, Aggregated};
pub use header::{HeaderScanner, LineScanner, ScannedHeader};
pub use rules::ScanRules;
pub use state::{ParseState, ScanInfo};
