//! Library components of the `nexus` command-line tool.

pub mod config;
pub mod dedupe;
pub mod ingest;
pub mod logging;
