//! Shared DTOs for the client/server boundary.
//!
//! DESIGN
//! ======
//! These types mirror the JSON bodies of `/api/auth/me` and `/api/albums`
//! so serde round-trips stay lossless between the two crates.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

use crate::util::reorder::Keyed;

/// A saved album as listed in the reorder table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    /// Spotify album ID; the drag/drop key of the row.
    pub id: String,
    pub name: String,
    /// Album artists joined with `", "`.
    pub artist: String,
    /// Release date as reported by Spotify (`YYYY`, `YYYY-MM` or `YYYY-MM-DD`).
    pub release_date: String,
}

impl Keyed for Album {
    fn key(&self) -> &str {
        &self.id
    }
}

/// The signed-in user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Spotify user ID.
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}
