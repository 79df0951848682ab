use leptos::prelude::*;

use super::context::{use_auth, AuthState};
use super::storage;
use crate::shared::api::SessionContext;

/// Session capability for the controllers of the current screen. A rejected
/// session drops the stored tokens, which puts the login page back.
pub fn use_session() -> SessionContext {
    let (auth_state, set_auth_state) = use_auth();
    SessionContext::new(
        move || auth_state.try_get_untracked().and_then(|s| s.access_token),
        move || {
            storage::clear_tokens();
            let _ = set_auth_state.try_set(AuthState::default());
        },
    )
}
