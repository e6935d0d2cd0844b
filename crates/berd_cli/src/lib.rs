//! berd_cli: Support code for the `berd` binary.

pub mod logger;
pub mod report;
