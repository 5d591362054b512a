//! Album ranking page: fetches saved albums and hosts the reorder table.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the authenticated landing route. It requests the saved-album list
//! once the user is known, seeds the album table from it, and keeps the
//! page-level copy of the ranking in sync with every committed reorder.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::album_table::AlbumTable;
use crate::net::types::Album;
use crate::state::albums::AlbumsState;
use crate::state::auth::AuthState;
use crate::util::auth::install_unauth_redirect;

#[component]
pub fn AlbumsPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let albums = expect_context::<RwSignal<AlbumsState>>();
    install_unauth_redirect(auth, use_navigate());

    let requested = RwSignal::new(false);
    Effect::new(move || {
        if requested.get() || auth.with(|a| a.user.is_none()) {
            return;
        }
        requested.set(true);
        albums.update(AlbumsState::begin_fetch);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let result = crate::net::api::fetch_saved_albums().await;
            match &result {
                Ok(items) => log::info!("loaded {} saved albums", items.len()),
                Err(e) => log::warn!("saved album fetch failed: {e}"),
            }
            albums.update(|s| s.finish_fetch(result));
        });
    });

    let items = Signal::derive(move || albums.with(|s| s.items.clone()));
    let on_change = Callback::new(move |items: Vec<Album>| {
        log::debug!("album order changed ({} albums)", items.len());
        albums.update(|s| s.accept_reorder(items));
    });

    let on_refresh = move |_| {
        if !albums.with_untracked(|s| s.loading) {
            requested.set(false);
        }
    };

    let on_logout = move |_| {
        #[cfg(feature = "hydrate")]
        {
            leptos::task::spawn_local(async move {
                crate::net::api::logout().await;
                auth.update(|a| a.user = None);
                if let Some(w) = web_sys::window() {
                    let _ = w.location().set_href("/login");
                }
            });
        }
    };

    let user_name = move || auth.with(|a| a.user.as_ref().map(|u| u.name.clone()).unwrap_or_default());

    view! {
        <Show
            when=move || auth.with(|a| !a.loading && a.user.is_some())
            fallback=move || {
                view! {
                    <div class="albums-page">
                        <p>{move || if auth.with(|a| a.loading) { "Loading..." } else { "Redirecting to login..." }}</p>
                    </div>
                }
            }
        >
            <div class="albums-page">
                <header class="albums-page__header toolbar">
                    <span class="toolbar__title">"Albumranker"</span>
                    <span class="toolbar__divider" aria-hidden="true"></span>
                    <button class="btn toolbar__refresh" on:click=on_refresh title="Reload saved albums">
                        "Refresh"
                    </button>
                    <span class="toolbar__summary">{move || albums.with(AlbumsState::summary_label)}</span>
                    <span class="toolbar__spacer"></span>
                    <span class="toolbar__self">{user_name}</span>
                    <button class="btn toolbar__logout" on:click=on_logout title="Logout">
                        "Logout"
                    </button>
                </header>

                <Show when=move || albums.with(|s| s.error.is_some())>
                    <p class="albums-page__error">{move || albums.with(|s| s.error.clone().unwrap_or_default())}</p>
                </Show>
                <Show
                    when=move || !albums.with(|s| s.loading)
                    fallback=move || view! { <p>"Loading albums..."</p> }
                >
                    <AlbumTable albums=items on_change=on_change/>
                </Show>
            </div>
        </Show>
    }
}
