//! Entry domain model.
//!
//! # Responsibility
//! - Define the two closed entry shapes persisted by core.
//! - Turn raw caller input into validated entries at one boundary.
//!
//! # Invariants
//! - Every entry carries a stable id that is never reused in its collection.
//! - Entries are immutable once created; there is no update path.
//! - Invalid input is rejected here and never reaches storage.

pub mod clock;
pub mod emotion;
pub mod factory;
pub mod journal;
pub mod validation;
