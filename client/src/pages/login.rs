//! Login page offering Spotify sign-in.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::state::auth::AuthState;
use crate::util::auth::install_signed_in_redirect;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    install_signed_in_redirect(auth, use_navigate());

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Albumranker"</h1>
                <p class="login-card__subtitle">"Rank your saved albums"</p>
                <a
                    href="/auth/spotify"
                    class="login-button"
                    on:click=move |ev| {
                        ev.prevent_default();
                        #[cfg(feature = "hydrate")]
                        {
                            if let Some(window) = web_sys::window() {
                                let _ = window.location().set_href("/auth/spotify");
                            }
                        }
                    }
                >
                    "Sign in with Spotify"
                </a>
            </div>
        </div>
    }
}
