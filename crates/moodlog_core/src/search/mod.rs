//! Journal text search and paged listing.
//!
//! # Responsibility
//! - Match journal entries by case-insensitive substring.
//! - Keep ordering and paging rules inside core.
//!
//! # Invariants
//! - Results are newest `created_at` first; ties go to the later insert.

pub mod journal_index;
