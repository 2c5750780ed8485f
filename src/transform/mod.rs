//! Structural rewrites of whole tables. Both take the input table by reference
//! and return a new table; the input is never modified.
pub mod reorder;
pub mod themes;
