use web_sys::window;

const ACCESS_TOKEN_KEY: &str = "admin_access_token";
const REFRESH_TOKEN_KEY: &str = "admin_refresh_token";

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// Read a raw localStorage entry
pub fn get_item(key: &str) -> Option<String> {
    get_local_storage()?.get_item(key).ok()?
}

fn set_item(key: &str, value: &str) {
    if let Some(storage) = get_local_storage() {
        if storage.set_item(key, value).is_err() {
            log::warn!("localStorage rejected {}", key);
        }
    }
}

/// Persist both tokens after a login
pub fn save_tokens(access_token: &str, refresh_token: &str) {
    set_item(ACCESS_TOKEN_KEY, access_token);
    set_item(REFRESH_TOKEN_KEY, refresh_token);
}

pub fn save_access_token(token: &str) {
    set_item(ACCESS_TOKEN_KEY, token);
}

pub fn get_access_token() -> Option<String> {
    get_item(ACCESS_TOKEN_KEY).filter(|t| !t.is_empty())
}

pub fn get_refresh_token() -> Option<String> {
    get_item(REFRESH_TOKEN_KEY).filter(|t| !t.is_empty())
}

/// Clear all authentication tokens
pub fn clear_tokens() {
    if let Some(storage) = get_local_storage() {
        let _ = storage.remove_item(ACCESS_TOKEN_KEY);
        let _ = storage.remove_item(REFRESH_TOKEN_KEY);
    }
}
