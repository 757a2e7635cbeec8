//! Adapters for external dependencies.

pub mod tree;
