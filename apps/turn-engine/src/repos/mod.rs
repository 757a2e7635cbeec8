//! Typed accessors over the tree store for domain and service layers.
//!
//! Free functions taking `&dyn TreeStore`; every store failure is mapped to a
//! `DomainError` and propagated.

pub mod catalog;
pub mod entities;
pub mod games;
pub mod groups;
pub mod players;
pub mod steps;
