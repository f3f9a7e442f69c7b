//! CLI command implementations.

pub mod hourly;
pub mod status;
pub mod train;
