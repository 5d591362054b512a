//! Drag-and-drop album ranking table with clipboard export.
//!
//! DESIGN
//! ======
//! Every row is a native HTML5 drag source and drop target inside the single
//! `<tbody>` drop zone. Gesture and ordering rules live in
//! `util::reorder::ReorderableList`; this component translates DOM drag events
//! into that model, renders the current order, and hands each committed order
//! to `on_change`.
//!
//! The Copy button passes the `<tbody>` element to `util::clipboard`, so the
//! clipboard receives the rendered rows as tab-separated text.

#[cfg(test)]
#[path = "album_table_test.rs"]
mod album_table_test;

use leptos::prelude::*;

use crate::net::types::Album;
use crate::util::reorder::{DragSession, Ordering, ReorderableList};

#[cfg(feature = "hydrate")]
const COPY_HINT_MS: u64 = 1500;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum CopyHint {
    #[default]
    Idle,
    Copied,
    Failed,
}

fn copy_hint_label(hint: CopyHint) -> &'static str {
    match hint {
        CopyHint::Idle => "",
        CopyHint::Copied => "Copied",
        CopyHint::Failed => "Copy failed",
    }
}

fn is_drag_source(session: &DragSession, index: Option<usize>) -> bool {
    index.is_some() && session.source() == index
}

fn is_drop_target(session: &DragSession, index: Option<usize>) -> bool {
    index.is_some() && session.over() == index && session.source() != index
}

/// Decide whether the owner's list should replace the local ordering.
///
/// Returns the new ordering when `incoming` differs from `current` and is
/// key-unique. A list with duplicate ids is warned about once and remembered in
/// `rejected`, so repeated deliveries of the same list stay quiet.
fn owner_update(current: &[Album], incoming: Vec<Album>, rejected: &mut Option<Vec<Album>>) -> Option<Ordering<Album>> {
    if current == incoming.as_slice() || rejected.as_ref() == Some(&incoming) {
        return None;
    }
    match Ordering::new(incoming.clone()) {
        Ok(ordering) => {
            *rejected = None;
            Some(ordering)
        }
        Err(e) => {
            log::warn!("ignoring album list: {e}");
            *rejected = Some(incoming);
            None
        }
    }
}

/// Album table whose rows can be dragged into a new order.
///
/// `albums` seeds the local order and re-seeds it whenever the owner supplies
/// a different sequence. `on_change` receives the full new order after every
/// committed drop.
#[component]
pub fn AlbumTable(#[prop(into)] albums: Signal<Vec<Album>>, on_change: Callback<Vec<Album>>) -> impl IntoView {
    let mut rejected_seed = None;
    let initial = owner_update(&[], albums.get_untracked(), &mut rejected_seed).unwrap_or_default();
    let list = RwSignal::new(ReorderableList::new(initial));
    let rejected = StoredValue::new(rejected_seed);
    let records = Memo::new(move |_| list.with(|l| l.records().to_vec()));
    let session = Memo::new(move |_| list.with(|l| *l.session()));
    let body_ref = NodeRef::<leptos::html::Tbody>::new();
    let copy_hint = RwSignal::new(CopyHint::Idle);
    #[cfg(feature = "hydrate")]
    let copy_seq = RwSignal::new(0_u64);

    Effect::new(move || {
        let incoming = albums.get();
        let mut next = None;
        rejected.update_value(|r| next = list.with_untracked(|l| owner_update(l.records(), incoming, r)));
        if let Some(ordering) = next {
            list.update(|l| l.reseed(ordering));
        }
    });

    let commit_drag = move || {
        let mut committed = None;
        let mut outcome = Ok(());
        list.update(|l| outcome = l.finish_drag(|items| committed = Some(items)));
        if let Err(reason) = outcome {
            log::debug!("album drop ignored: {reason:?}");
        }
        if let Some(items) = committed {
            on_change.run(items);
        }
    };

    let on_copy = move |_| {
        #[cfg(feature = "hydrate")]
        {
            let Some(body) = body_ref.get_untracked() else {
                return;
            };
            let mut host = crate::util::clipboard::DomSelectionHost::new(body.into());
            let copied = crate::util::clipboard::export_to_clipboard(&mut host);
            copy_hint.set(if copied { CopyHint::Copied } else { CopyHint::Failed });
            copy_seq.update(|s| *s += 1);
            let seq = copy_seq.get_untracked();
            leptos::task::spawn_local(async move {
                gloo_timers::future::sleep(std::time::Duration::from_millis(COPY_HINT_MS)).await;
                if copy_seq.get_untracked() == seq {
                    copy_hint.set(CopyHint::Idle);
                }
            });
        }
    };

    view! {
        <table class="album-table">
            <thead>
                <tr>
                    <th>"Name"</th>
                    <th>"Artist"</th>
                    <th>"Release Date"</th>
                    <th class="album-table__actions">
                        <button class="btn album-table__copy" title="Copy" aria-label="Copy" on:click=on_copy>
                            "⧉"
                        </button>
                        <span class="album-table__copy-hint">{move || copy_hint_label(copy_hint.get())}</span>
                    </th>
                </tr>
            </thead>
            <tbody class="album-table__body" node_ref=body_ref>
                <For
                    each=move || records.get()
                    key=|album| album.id.clone()
                    children=move |album| {
                        let key = album.id.clone();
                        let index = Memo::new(move |_| records.with(|r| r.iter().position(|a| a.id == key)));
                        #[cfg(feature = "hydrate")]
                        let drag_key = album.id.clone();
                        view! {
                            <tr
                                class="album-row"
                                class:album-row--dragging=move || is_drag_source(&session.get(), index.get())
                                class:album-row--over=move || is_drop_target(&session.get(), index.get())
                                draggable="true"
                                on:dragstart=move |ev: leptos::ev::DragEvent| {
                                    #[cfg(feature = "hydrate")]
                                    mark_drag_payload(&ev, &drag_key);
                                    #[cfg(not(feature = "hydrate"))]
                                    let _ = &ev;
                                    if let Some(i) = index.get_untracked() {
                                        list.update(|l| l.drag_start(i));
                                    }
                                }
                                on:dragover=move |ev: leptos::ev::DragEvent| {
                                    ev.prevent_default();
                                    let Some(i) = index.get_untracked() else {
                                        return;
                                    };
                                    if session.get_untracked().over() != Some(i) {
                                        list.update(|l| l.drag_over(i));
                                    }
                                }
                                on:dragleave=move |_| {
                                    if let Some(i) = index.get_untracked() {
                                        list.update(|l| l.drag_leave(i));
                                    }
                                }
                                on:drop=move |ev: leptos::ev::DragEvent| {
                                    ev.prevent_default();
                                    if let Some(i) = index.get_untracked() {
                                        list.update(|l| l.drop_on(i));
                                    }
                                }
                                on:dragend=move |_| commit_drag()
                            >
                                <td class="album-row__cell">{album.name}</td>
                                <td class="album-row__cell">{album.artist}</td>
                                <td class="album-row__cell">{album.release_date}</td>
                                <td class="album-row__cell"></td>
                            </tr>
                        }
                    }
                />
            </tbody>
        </table>
    }
}

#[cfg(feature = "hydrate")]
fn mark_drag_payload(ev: &leptos::ev::DragEvent, key: &str) {
    if let Some(transfer) = ev.data_transfer() {
        transfer.set_effect_allowed("move");
        // Firefox refuses to start a drag without a payload.
        let _ = transfer.set_data("text/plain", key);
    }
}
