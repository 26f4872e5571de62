//! Report structures, output formatting and console progress

pub mod formatter;
pub mod progress;
pub mod report;
