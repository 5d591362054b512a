use super::*;

fn session_from(source: usize, over: Option<usize>) -> DragSession {
    let mut session = DragSession::default();
    session.start(source);
    if let Some(i) = over {
        session.hover(i);
    }
    session
}

#[test]
fn copy_hint_labels() {
    assert_eq!(copy_hint_label(CopyHint::Idle), "");
    assert_eq!(copy_hint_label(CopyHint::Copied), "Copied");
    assert_eq!(copy_hint_label(CopyHint::Failed), "Copy failed");
}

#[test]
fn drag_source_row_is_flagged() {
    let session = session_from(2, None);
    assert!(is_drag_source(&session, Some(2)));
    assert!(!is_drag_source(&session, Some(1)));
}

#[test]
fn unknown_row_is_never_flagged() {
    let idle = DragSession::default();
    assert!(!is_drag_source(&idle, None));
    assert!(!is_drop_target(&idle, None));
}

#[test]
fn hovered_row_is_drop_target_unless_it_is_the_source() {
    let session = session_from(1, Some(3));
    assert!(is_drop_target(&session, Some(3)));
    assert!(!is_drop_target(&session, Some(1)));

    let over_self = session_from(1, Some(1));
    assert!(!is_drop_target(&over_self, Some(1)));
}

fn album(id: &str, name: &str) -> Album {
    Album {
        id: id.to_owned(),
        name: name.to_owned(),
        artist: "Artist".to_owned(),
        release_date: "1999".to_owned(),
    }
}

#[test]
fn owner_update_ignores_identical_list() {
    let current = vec![album("a", "A"), album("b", "B")];
    let mut rejected = None;
    assert!(owner_update(&current, current.clone(), &mut rejected).is_none());
    assert!(rejected.is_none());
}

#[test]
fn owner_update_reseeds_when_list_differs() {
    let current = vec![album("a", "A"), album("b", "B")];
    let incoming = vec![album("b", "B"), album("a", "A"), album("c", "C")];
    let mut rejected = None;

    let ordering = owner_update(&current, incoming.clone(), &mut rejected).unwrap();
    assert_eq!(ordering.records(), incoming.as_slice());
}

#[test]
fn owner_update_rejects_duplicate_ids_once() {
    let duplicated = vec![album("dup", "Same"), album("dup", "Same")];
    let mut rejected = None;

    assert!(owner_update(&[], duplicated.clone(), &mut rejected).is_none());
    assert_eq!(rejected.as_ref(), Some(&duplicated));

    // Same list delivered again, e.g. by the reseed effect's first run.
    assert!(owner_update(&[], duplicated.clone(), &mut rejected).is_none());
    assert_eq!(rejected.as_ref(), Some(&duplicated));
}

#[test]
fn owner_update_recovers_after_rejection() {
    let duplicated = vec![album("dup", "Same"), album("dup", "Same")];
    let mut rejected = Some(duplicated);

    let fixed = vec![album("a", "A")];
    assert!(owner_update(&[], fixed, &mut rejected).is_some());
    assert!(rejected.is_none());
}
