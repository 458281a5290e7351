//! Utility functions module
//!
//! Contains helper functions for formatting the exam clock.

pub mod clock;

// Re-export commonly used functions
pub use clock::format_clock;
