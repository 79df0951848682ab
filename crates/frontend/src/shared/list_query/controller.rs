//! List-Query Controller
//!
//! Owns the [`QueryState`] of one list screen, debounces free-text search,
//! issues list requests and keeps a single explicit [`ListStatus`]. Every
//! operation updates state synchronously and returns a future carrying the
//! network part; the UI spawns it with `spawn_local`.
//!
//! Each issued request takes a sequence number. A response is applied only if
//! its number is still the latest, so a slow earlier response can never
//! overwrite a newer one.

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use contracts::shared::list::ListResult;
use serde::de::DeserializeOwned;

use super::debounce::Debouncer;
use super::fetcher::{ListConfig, ListFetcher};
use super::query_state::QueryState;
use crate::shared::api::{ApiClient, ApiError};
use crate::shared::timer::Timer;

#[derive(Debug, Clone, PartialEq)]
pub enum ListStatus<T> {
    Idle,
    Loading,
    Loaded(ListResult<T>),
    Errored(ApiError),
}

/// What the rendering layer sees after every change.
#[derive(Debug, Clone, PartialEq)]
pub struct ListSnapshot<T> {
    pub query: QueryState,
    pub status: ListStatus<T>,
}

impl<T> ListSnapshot<T> {
    pub fn items(&self) -> &[T] {
        match &self.status {
            ListStatus::Loaded(result) => &result.items,
            _ => &[],
        }
    }

    pub fn total_count(&self) -> u64 {
        match &self.status {
            ListStatus::Loaded(result) => result.total_count,
            _ => 0,
        }
    }

    pub fn total_pages(&self) -> u32 {
        match &self.status {
            ListStatus::Loaded(result) => result.total_pages,
            _ => 1,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, ListStatus::Loading)
    }

    pub fn error(&self) -> Option<&ApiError> {
        match &self.status {
            ListStatus::Errored(err) => Some(err),
            _ => None,
        }
    }

    /// Loaded, and the server had nothing for this query.
    pub fn is_empty_result(&self) -> bool {
        matches!(&self.status, ListStatus::Loaded(result) if result.items.is_empty())
    }
}

type Listener<T> = Rc<dyn Fn(&ListSnapshot<T>)>;

struct Inner<T> {
    query: QueryState,
    status: ListStatus<T>,
    /// Page count of the last successful load; bounds `set_page`.
    known_pages: u32,
    seq: u64,
    disposed: bool,
    listeners: Vec<Listener<T>>,
}

impl<T: Clone> Inner<T> {
    fn snapshot(&self) -> ListSnapshot<T> {
        ListSnapshot {
            query: self.query.clone(),
            status: self.status.clone(),
        }
    }
}

enum Applied {
    Done,
    Refetch,
}

pub struct ListQueryController<T> {
    inner: Rc<RefCell<Inner<T>>>,
    fetcher: Rc<ListFetcher<T>>,
    debouncer: Debouncer,
    config: Rc<ListConfig>,
}

impl<T> Clone for ListQueryController<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
            fetcher: Rc::clone(&self.fetcher),
            debouncer: self.debouncer.clone(),
            config: Rc::clone(&self.config),
        }
    }
}

impl<T> ListQueryController<T>
where
    T: DeserializeOwned + Clone + 'static,
{
    pub fn new(config: ListConfig, client: ApiClient, timer: Rc<dyn Timer>) -> Self {
        let config = Rc::new(config);
        let inner = Inner {
            query: config.initial_query(),
            status: ListStatus::Idle,
            known_pages: 1,
            seq: 0,
            disposed: false,
            listeners: Vec::new(),
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
            fetcher: Rc::new(ListFetcher::new(client, Rc::clone(&config))),
            debouncer: Debouncer::new(timer, config.debounce),
            config,
        }
    }

    pub fn config(&self) -> &ListConfig {
        &self.config
    }

    pub fn snapshot(&self) -> ListSnapshot<T> {
        self.inner.borrow().snapshot()
    }

    pub fn subscribe(&self, listener: impl Fn(&ListSnapshot<T>) + 'static) {
        self.inner.borrow_mut().listeners.push(Rc::new(listener));
    }

    fn notify(&self) {
        let (snapshot, listeners) = {
            let inner = self.inner.borrow();
            if inner.disposed {
                return;
            }
            (inner.snapshot(), inner.listeners.clone())
        };
        for listener in listeners {
            listener(&snapshot);
        }
    }

    fn mutate<R>(&self, change: impl FnOnce(&mut QueryState) -> R) -> R {
        let result = change(&mut self.inner.borrow_mut().query);
        self.notify();
        result
    }

    /// Starts a request for the current query: bumps the sequence and enters
    /// `Loading`. Returns the ticket with the query as it stands right now,
    /// or `None` once disposed.
    fn begin(&self) -> Option<(u64, QueryState)> {
        let (ticket, query) = {
            let mut inner = self.inner.borrow_mut();
            if inner.disposed {
                return None;
            }
            inner.seq += 1;
            inner.status = ListStatus::Loading;
            (inner.seq, inner.query.clone())
        };
        log::debug!("{} list request #{}", self.config.endpoint, ticket);
        self.notify();
        Some((ticket, query))
    }

    fn issue(&self) -> impl Future<Output = ()> + 'static {
        let started = self.begin();
        let this = self.clone();
        async move {
            if let Some(started) = started {
                this.run(started).await;
            }
        }
    }

    async fn run(&self, started: (u64, QueryState)) {
        let (mut ticket, mut query) = started;
        loop {
            let result = self.fetcher.fetch(&query).await;
            match self.apply(ticket, result) {
                Applied::Done => return,
                Applied::Refetch => match self.begin() {
                    Some(next) => (ticket, query) = next,
                    None => return,
                },
            }
        }
    }

    fn apply(&self, ticket: u64, result: Result<ListResult<T>, ApiError>) -> Applied {
        let mut escalate = false;
        {
            let mut inner = self.inner.borrow_mut();
            if inner.disposed || inner.seq != ticket {
                log::debug!(
                    "{} discarding superseded response #{}",
                    self.config.endpoint,
                    ticket
                );
                return Applied::Done;
            }

            match result {
                Ok(list) => {
                    inner.known_pages = list.total_pages;
                    if inner.query.page > list.total_pages {
                        log::debug!(
                            "{} page {} is past the last page {}, clamping",
                            self.config.endpoint,
                            inner.query.page,
                            list.total_pages
                        );
                        inner.query.page = list.total_pages;
                        return Applied::Refetch;
                    }
                    inner.status = ListStatus::Loaded(list);
                }
                Err(err) => {
                    log::warn!("{} list request failed: {}", self.config.endpoint, err);
                    escalate = err.is_auth();
                    inner.status = ListStatus::Errored(err);
                }
            }
        }

        if escalate {
            self.fetcher.client().session().unauthorized();
        }
        self.notify();
        Applied::Done
    }

    /// Echoes `text` immediately; the search itself runs once typing pauses
    /// for the configured quiet period.
    pub fn set_search_text(&self, text: impl Into<String>) -> impl Future<Output = ()> + 'static {
        let text = text.into();
        self.mutate(|query| query.set_search_text(text));
        let settled = self.debouncer.arm();
        let this = self.clone();
        async move {
            if !settled.await {
                return;
            }
            let changed = this.mutate(|query| {
                let text = query.search_text.clone();
                query.apply_debounced_search(text)
            });
            if changed {
                this.issue().await;
            }
        }
    }

    pub fn set_filter(
        &self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> impl Future<Output = ()> + 'static {
        let (name, value) = (name.into(), value.into());
        let changed = self.mutate(|query| query.set_filter(name, value));
        let pending = changed.then(|| self.issue());
        async move {
            if let Some(pending) = pending {
                pending.await;
            }
        }
    }

    /// Jumps to page `page`, clamped to the pages of the last load. A request
    /// that clamps onto the current page does nothing.
    pub fn set_page(&self, page: u32) -> impl Future<Output = ()> + 'static {
        let changed = {
            let mut inner = self.inner.borrow_mut();
            let known_pages = inner.known_pages;
            inner.query.set_page(page, known_pages)
        };
        if !changed {
            log::debug!("{} ignoring page {}", self.config.endpoint, page);
        }
        let pending = changed.then(|| self.issue());
        async move {
            if let Some(pending) = pending {
                pending.await;
            }
        }
    }

    pub fn clear_filters(&self) -> impl Future<Output = ()> + 'static {
        self.debouncer.cancel();
        self.mutate(QueryState::clear);
        self.issue()
    }

    pub fn refresh(&self) -> impl Future<Output = ()> + 'static {
        self.issue()
    }

    /// Detaches the controller from its screen. Pending searches are dropped
    /// and responses still in flight are ignored.
    pub fn dispose(&self) {
        self.debouncer.dispose();
        let mut inner = self.inner.borrow_mut();
        inner.disposed = true;
        inner.listeners.clear();
    }
}
