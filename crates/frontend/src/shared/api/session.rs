use std::fmt;
use std::rc::Rc;

/// Capability handed to controllers by the auth layer: read the current
/// bearer token, and report that the backend rejected the session.
///
/// Controllers only ever read the token; `on_unauthorized` (logout and
/// return to the login page) is owned by the auth layer.
#[derive(Clone)]
pub struct SessionContext {
    token: Rc<dyn Fn() -> Option<String>>,
    on_unauthorized: Rc<dyn Fn()>,
}

impl SessionContext {
    pub fn new(
        token: impl Fn() -> Option<String> + 'static,
        on_unauthorized: impl Fn() + 'static,
    ) -> Self {
        Self {
            token: Rc::new(token),
            on_unauthorized: Rc::new(on_unauthorized),
        }
    }

    pub fn token(&self) -> Option<String> {
        (self.token)().filter(|t| !t.is_empty())
    }

    pub fn unauthorized(&self) {
        log::warn!("Backend rejected the session, signing out");
        (self.on_unauthorized)();
    }
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("has_token", &self.token().is_some())
            .finish()
    }
}
