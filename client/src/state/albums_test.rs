use super::*;

fn album(id: &str, name: &str) -> Album {
    Album {
        id: id.to_owned(),
        name: name.to_owned(),
        artist: "Artist".to_owned(),
        release_date: "2001".to_owned(),
    }
}

#[test]
fn albums_state_default_is_empty_and_idle() {
    let state = AlbumsState::default();
    assert!(state.items.is_empty());
    assert!(!state.loading);
    assert!(state.error.is_none());
}

#[test]
fn successful_fetch_seeds_items() {
    let mut state = AlbumsState::default();
    state.begin_fetch();
    assert!(state.loading);

    state.finish_fetch(Ok(vec![album("a", "A"), album("b", "B")]));

    assert!(!state.loading);
    assert_eq!(state.items.len(), 2);
}

#[test]
fn failed_fetch_keeps_previous_items() {
    let mut state = AlbumsState::default();
    state.finish_fetch(Ok(vec![album("a", "A")]));
    state.begin_fetch();
    state.finish_fetch(Err("album request failed: 500".to_owned()));

    assert_eq!(state.items.len(), 1);
    assert_eq!(state.error.as_deref(), Some("album request failed: 500"));
}

#[test]
fn accept_reorder_replaces_items_in_ranked_order() {
    let mut state = AlbumsState::default();
    state.finish_fetch(Ok(vec![album("a", "A"), album("b", "B")]));

    state.accept_reorder(vec![album("b", "B"), album("a", "A")]);

    let ids: Vec<_> = state.items.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, ["b", "a"]);
    assert_eq!(state.reorder_count, 1);
}

#[test]
fn refetch_resets_reorder_count() {
    let mut state = AlbumsState::default();
    state.finish_fetch(Ok(vec![album("a", "A")]));
    state.accept_reorder(vec![album("a", "A")]);
    state.finish_fetch(Ok(vec![album("a", "A")]));
    assert_eq!(state.reorder_count, 0);
}

#[test]
fn summary_label_counts_albums_and_moves() {
    let mut state = AlbumsState::default();
    assert_eq!(state.summary_label(), "0 albums");

    state.finish_fetch(Ok(vec![album("a", "A")]));
    assert_eq!(state.summary_label(), "1 album");

    state.finish_fetch(Ok(vec![album("a", "A"), album("b", "B")]));
    state.accept_reorder(vec![album("b", "B"), album("a", "A")]);
    assert_eq!(state.summary_label(), "2 albums, 1 move");

    state.accept_reorder(vec![album("a", "A"), album("b", "B")]);
    assert_eq!(state.summary_label(), "2 albums, 2 moves");
}
