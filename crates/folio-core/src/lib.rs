//! Folio Core
//!
//! Leaf utilities shared by the folder coordinator crates: screen geometry and
//! hit testing, hash collections, logging setup and profiling scopes.

pub mod alloc;
pub mod geometry;
pub mod logging;
pub mod math;
pub mod profiling;
