//! Translation of a [`QueryState`] into a list request, and of the response
//! into a [`ListResult`].

use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::rc::Rc;
use std::time::Duration;

use contracts::shared::list::{ListResult, PARAM_LIMIT, PARAM_PAGE, PARAM_SEARCH};
use contracts::shared::select::{is_unconstrained, SelectOption};
use serde::de::DeserializeOwned;

use super::query_state::QueryState;
use crate::shared::api::{ApiClient, ApiError};
use crate::shared::config::ListDefaults;

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

pub type ParamMapper = Rc<dyn Fn(&BTreeMap<String, String>) -> Vec<(String, String)>>;

/// A named filter and the choices offered for it.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterDef {
    pub name: String,
    pub label: String,
    pub options: Vec<SelectOption>,
}

impl FilterDef {
    /// The sentinel "All" entry is always offered first.
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        options: impl IntoIterator<Item = SelectOption>,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            options: std::iter::once(SelectOption::all()).chain(options).collect(),
        }
    }
}

/// Passes every constrained filter through under its own name.
pub fn default_param_mapper(filters: &BTreeMap<String, String>) -> Vec<(String, String)> {
    filters
        .iter()
        .filter(|(_, value)| !is_unconstrained(value))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

/// Per-entity list settings.
#[derive(Clone)]
pub struct ListConfig {
    pub endpoint: String,
    pub page_size: u32,
    pub debounce: Duration,
    pub filters: Vec<FilterDef>,
    param_mapper: ParamMapper,
}

impl ListConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            page_size: DEFAULT_PAGE_SIZE,
            debounce: DEFAULT_DEBOUNCE,
            filters: Vec::new(),
            param_mapper: Rc::new(default_param_mapper),
        }
    }

    pub fn with_defaults(mut self, defaults: &ListDefaults) -> Self {
        self.page_size = defaults.page_size.max(1);
        self.debounce = Duration::from_millis(defaults.debounce_ms);
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn filter(mut self, filter: FilterDef) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn param_mapper(
        mut self,
        mapper: impl Fn(&BTreeMap<String, String>) -> Vec<(String, String)> + 'static,
    ) -> Self {
        self.param_mapper = Rc::new(mapper);
        self
    }

    pub fn initial_query(&self) -> QueryState {
        QueryState::new(self.page_size, self.filters.iter().map(|f| f.name.clone()))
    }
}

impl std::fmt::Debug for ListConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListConfig")
            .field("endpoint", &self.endpoint)
            .field("page_size", &self.page_size)
            .field("debounce", &self.debounce)
            .field("filters", &self.filters)
            .finish_non_exhaustive()
    }
}

/// Query parameters for `query`: `page`, `limit`, `search` when there is
/// one, then the mapped filters. Sentinel values never reach the wire even
/// if a custom mapper lets them through.
pub fn build_params(query: &QueryState, config: &ListConfig) -> Vec<(String, String)> {
    let mut params = vec![
        (PARAM_PAGE.to_string(), query.page.to_string()),
        (PARAM_LIMIT.to_string(), query.page_size().to_string()),
    ];

    let search = query.debounced_search_text.trim();
    if !search.is_empty() {
        params.push((PARAM_SEARCH.to_string(), search.to_string()));
    }

    params.extend(
        (config.param_mapper)(&query.filters)
            .into_iter()
            .filter(|(_, value)| !is_unconstrained(value)),
    );
    params
}

pub struct ListFetcher<T> {
    client: ApiClient,
    config: Rc<ListConfig>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> ListFetcher<T> {
    pub fn new(client: ApiClient, config: Rc<ListConfig>) -> Self {
        Self {
            client,
            config,
            _entity: PhantomData,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub async fn fetch(&self, query: &QueryState) -> Result<ListResult<T>, ApiError> {
        let params = build_params(query, &self.config);
        let envelope = self.client.get_list(&self.config.endpoint, params).await?;
        envelope
            .normalize(query.page_size())
            .map_err(|e| ApiError::server(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api::ErrorKind;
    use crate::shared::testing::{client_with, FakeTransport, Scripted};
    use contracts::domain::bank::Bank;

    fn status_filter() -> FilterDef {
        FilterDef::new(
            "status",
            "Status",
            [
                SelectOption::new("Active", "Active"),
                SelectOption::new("Inactive", "Inactive"),
            ],
        )
    }

    fn config() -> ListConfig {
        ListConfig::new("/api/banks")
            .filter(status_filter())
            .filter(FilterDef::new("country", "Country", []))
    }

    fn value<'a>(params: &'a [(String, String)], name: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_unfiltered_params() {
        let config = config();
        let params = build_params(&config.initial_query(), &config);
        assert_eq!(
            params,
            vec![
                ("page".to_string(), "1".to_string()),
                ("limit".to_string(), "10".to_string()),
            ]
        );
    }

    #[test]
    fn test_search_and_filters_included() {
        let config = config();
        let mut query = config.initial_query();
        query.set_search_text("  sbi ");
        query.apply_debounced_search("  sbi ");
        query.set_filter("country", "IN");
        query.page = 2;

        let params = build_params(&query, &config);
        assert_eq!(value(&params, "page"), Some("2"));
        assert_eq!(value(&params, "search"), Some("sbi"));
        assert_eq!(value(&params, "country"), Some("IN"));
        assert_eq!(value(&params, "status"), None);
    }

    #[test]
    fn test_raw_search_text_is_not_sent() {
        let config = config();
        let mut query = config.initial_query();
        query.set_search_text("typing");
        assert_eq!(value(&build_params(&query, &config), "search"), None);
    }

    #[test]
    fn test_custom_mapper_and_sentinel_guard() {
        let config = config().param_mapper(|filters| {
            let mut params = Vec::new();
            match filters.get("status").map(String::as_str) {
                Some("Active") => params.push(("isActive".to_string(), "true".to_string())),
                Some("Inactive") => params.push(("isActive".to_string(), "false".to_string())),
                _ => {}
            }
            params.push(("country".to_string(), "All".to_string()));
            params
        });
        let mut query = config.initial_query();
        query.set_filter("status", "Inactive");

        let params = build_params(&query, &config);
        assert_eq!(value(&params, "isActive"), Some("false"));
        assert_eq!(value(&params, "status"), None);
        assert_eq!(value(&params, "country"), None);
    }

    #[test]
    fn test_filter_def_starts_with_all() {
        let filter = status_filter();
        assert_eq!(filter.options[0], SelectOption::all());
        assert_eq!(filter.options.len(), 3);
    }

    #[tokio::test]
    async fn test_fetch_normalizes_response() {
        let transport = FakeTransport::new(|_| {
            Scripted::json(
                200,
                r#"{"data":[{"_id":"1","bankName":"SBI","ifscCode":"SBIN0000001"}],"totalCount":1}"#,
            )
        });
        let fetcher: ListFetcher<Bank> =
            ListFetcher::new(client_with(&transport).0, Rc::new(config()));

        let result = fetcher.fetch(&config().initial_query()).await.unwrap();
        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].bank_name, "SBI");
        assert_eq!(result.total_pages, 1);

        let request = transport.last_request().unwrap();
        assert_eq!(request.path, "/api/banks");
        assert_eq!(request.bearer.as_deref(), Some("token-1"));
    }

    #[tokio::test]
    async fn test_fetch_classifies_failures() {
        for (scripted, kind) in [
            (Scripted::json(401, ""), ErrorKind::Auth),
            (Scripted::json(404, ""), ErrorKind::Auth),
            (Scripted::json(500, ""), ErrorKind::Server),
            (Scripted::json(200, "not json"), ErrorKind::Server),
            (Scripted::unreachable(), ErrorKind::Network),
        ] {
            let transport = FakeTransport::new(move |_| scripted.clone());
            let fetcher: ListFetcher<Bank> =
                ListFetcher::new(client_with(&transport).0, Rc::new(config()));
            let err = fetcher.fetch(&config().initial_query()).await.unwrap_err();
            assert_eq!(err.kind, kind);
        }
    }
}
