//! Turn engine test support utilities
//!
//! Shared by the engine's integration tests; currently provides the unified
//! logging initialization.

pub mod logging;
