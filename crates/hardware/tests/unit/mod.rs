//! # Unit Components
//!
//! This module organizes the tests of each simulator component, from the execution
//! units up to complete program runs.






/// Statistics counters and report.
pub mod stats;
