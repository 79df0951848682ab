use contracts::system::auth::AdminInfo;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{api, storage};
use crate::shared::api::ApiError;

#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub access_token: Option<String>,
    pub admin: Option<AdminInfo>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }
}

/// Validates the stored access token, falling back to the refresh token.
async fn restore_session(set_auth_state: WriteSignal<AuthState>) {
    let Some(access_token) = storage::get_access_token() else {
        return;
    };

    match api::get_current_admin(&access_token).await {
        Ok(admin) => {
            set_auth_state.set(AuthState {
                access_token: Some(access_token),
                admin: Some(admin),
            });
            return;
        }
        Err(e) => log::debug!("Stored access token rejected: {}", e),
    }

    let Some(refresh_token) = storage::get_refresh_token() else {
        storage::clear_tokens();
        return;
    };
    let refreshed = match api::refresh_token(refresh_token).await {
        Ok(response) => response.access_token,
        Err(e) => {
            log::info!("Session expired: {}", e);
            storage::clear_tokens();
            return;
        }
    };

    storage::save_access_token(&refreshed);
    match api::get_current_admin(&refreshed).await {
        Ok(admin) => set_auth_state.set(AuthState {
            access_token: Some(refreshed),
            admin: Some(admin),
        }),
        Err(e) => log::warn!("Failed to load profile after refresh: {}", e),
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let (auth_state, set_auth_state) = signal(AuthState::default());

    // Try to restore session from localStorage on mount
    Effect::new(move |_| {
        spawn_local(restore_session(set_auth_state));
    });

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

pub async fn do_login(
    email: String,
    password: String,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<(), ApiError> {
    let response = api::login(email, password).await?;
    storage::save_tokens(&response.access_token, &response.refresh_token);
    log::info!("Signed in as {}", response.admin.email);

    set_auth_state.set(AuthState {
        access_token: Some(response.access_token),
        admin: Some(response.admin),
    });
    Ok(())
}

pub async fn do_logout(set_auth_state: WriteSignal<AuthState>) {
    if let Some(refresh_token) = storage::get_refresh_token() {
        if let Err(e) = api::logout(refresh_token).await {
            log::warn!("Logout request failed: {}", e);
        }
    }
    storage::clear_tokens();
    set_auth_state.set(AuthState::default());
}
