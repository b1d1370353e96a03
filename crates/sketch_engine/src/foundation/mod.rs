//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - Logging sinks and the fatal-state flag
//! - Time management

pub mod logging;
pub mod time;
