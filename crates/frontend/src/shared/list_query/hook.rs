use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::de::DeserializeOwned;

use super::controller::{ListQueryController, ListSnapshot};
use super::fetcher::ListConfig;
use crate::shared::api::gloo::GlooTransport;
use crate::shared::api::ApiClient;
use crate::shared::timer::BrowserTimer;
use crate::system::auth::session::use_session;

/// Reactive handle over a [`ListQueryController`] owned by the current
/// component. `snapshot` follows every controller change.
pub struct ListQueryHandle<T: 'static> {
    pub snapshot: RwSignal<ListSnapshot<T>>,
    controller: StoredValue<ListQueryController<T>, LocalStorage>,
}

impl<T: 'static> Clone for ListQueryHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for ListQueryHandle<T> {}

impl<T> ListQueryHandle<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    fn spawn<F>(&self, start: impl FnOnce(&ListQueryController<T>) -> F)
    where
        F: std::future::Future<Output = ()> + 'static,
    {
        if let Some(pending) = self.controller.try_with_value(start) {
            spawn_local(pending);
        }
    }

    pub fn set_search_text(&self, text: String) {
        self.spawn(|c| c.set_search_text(text));
    }

    pub fn set_filter(&self, name: String, value: String) {
        self.spawn(|c| c.set_filter(name, value));
    }

    pub fn set_page(&self, page: u32) {
        self.spawn(|c| c.set_page(page));
    }

    pub fn clear_filters(&self) {
        self.spawn(|c| c.clear_filters());
    }

    pub fn refresh(&self) {
        self.spawn(|c| c.refresh());
    }

    pub fn config(&self) -> Option<ListConfig> {
        self.controller.try_with_value(|c| c.config().clone())
    }
}

/// Creates the list controller for a screen, loads the first page and
/// disposes the controller when the screen unmounts.
pub fn use_list_query<T>(config: ListConfig) -> ListQueryHandle<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    let client = ApiClient::new(Rc::new(GlooTransport), use_session());
    let controller = ListQueryController::new(config, client, Rc::new(BrowserTimer));

    let snapshot = RwSignal::new(controller.snapshot());
    controller.subscribe(move |s| {
        let _ = snapshot.try_set(s.clone());
    });

    let handle = ListQueryHandle {
        snapshot,
        controller: StoredValue::new_local(controller),
    };

    on_cleanup(move || {
        handle.controller.try_with_value(|c| c.dispose());
    });

    handle.refresh();
    handle
}
