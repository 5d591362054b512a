//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render interaction surfaces and report changes to their owning
//! page through callbacks rather than writing shared state directly.

pub mod album_table;
