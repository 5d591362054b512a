//! Route guards driven by the shared `AuthState`.
//!
//! Guards wait for the initial `/api/auth/me` lookup to settle, then send the
//! browser wherever the current auth state does not belong.

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::auth::AuthState;

fn redirect_when<F>(auth: RwSignal<AuthState>, should_leave: fn(&AuthState) -> bool, path: &'static str, navigate: F)
where
    F: Fn(&str, NavigateOptions) + 'static,
{
    Effect::new(move || {
        if auth.with(should_leave) {
            navigate(path, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}

/// Send signed-out visitors to `/login`.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + 'static,
{
    redirect_when(auth, AuthState::should_redirect_unauth, "/login", navigate);
}

/// Send signed-in users from the login page to their albums.
pub fn install_signed_in_redirect<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + 'static,
{
    redirect_when(auth, AuthState::should_leave_login, "/", navigate);
}
