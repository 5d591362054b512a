//! Domain services used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own upstream API and session concerns so route handlers
//! can stay focused on protocol translation and cookie plumbing.

pub mod session;
pub mod spotify;
