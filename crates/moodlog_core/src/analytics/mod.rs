//! Derived views over the emotion collection.
//!
//! # Invariants
//! - Nothing here caches; every call recomputes from the current collection.

pub mod aggregate;
