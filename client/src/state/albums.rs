//! Saved-album state for the ranking page.
//!
//! DESIGN
//! ======
//! `items` is the owner's copy of the ranking. The album table keeps its own
//! reorder state and reports each committed order back here; the page never
//! edits `items` except to seed it from a fetch or to accept a reorder.

#[cfg(test)]
#[path = "albums_test.rs"]
mod albums_test;

use crate::net::types::Album;

#[derive(Clone, Debug, Default)]
pub struct AlbumsState {
    pub items: Vec<Album>,
    pub loading: bool,
    pub error: Option<String>,
    /// Number of reorders accepted since the last fetch.
    pub reorder_count: u32,
}

impl AlbumsState {
    pub fn begin_fetch(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Apply the result of a saved-album fetch.
    pub fn finish_fetch(&mut self, result: Result<Vec<Album>, String>) {
        self.loading = false;
        match result {
            Ok(items) => {
                self.items = items;
                self.error = None;
                self.reorder_count = 0;
            }
            Err(e) => self.error = Some(e),
        }
    }

    /// Accept a committed order from the album table.
    pub fn accept_reorder(&mut self, items: Vec<Album>) {
        self.items = items;
        self.reorder_count += 1;
    }

    /// Toolbar summary, e.g. `12 albums` or `12 albums, 3 moves`.
    #[must_use]
    pub fn summary_label(&self) -> String {
        let albums = match self.items.len() {
            1 => "1 album".to_owned(),
            n => format!("{n} albums"),
        };
        match self.reorder_count {
            0 => albums,
            1 => format!("{albums}, 1 move"),
            n => format!("{albums}, {n} moves"),
        }
    }
}
