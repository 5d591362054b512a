//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain (`auth`, `albums`) so individual components can
//! depend on small focused models.

pub mod albums;
pub mod auth;
