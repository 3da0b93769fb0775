//! Library components of the `dbdes-diff` CLI.

pub mod logging;
pub mod pipeline;
