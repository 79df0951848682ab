use std::collections::BTreeMap;

use contracts::shared::select::{is_unconstrained, ALL};

/// Filter, search and pagination state of one list screen.
///
/// `page` is 1-indexed and returns to 1 whenever the effective search or a
/// filter changes. `page_size` is fixed for the lifetime of the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    pub search_text: String,
    pub debounced_search_text: String,
    pub filters: BTreeMap<String, String>,
    pub page: u32,
    page_size: u32,
}

impl QueryState {
    pub fn new<I, S>(page_size: u32, filter_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            search_text: String::new(),
            debounced_search_text: String::new(),
            filters: filter_names
                .into_iter()
                .map(|name| (name.into(), ALL.to_string()))
                .collect(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Raw input echo; never resets the page by itself.
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
    }

    /// Publishes the settled search text. Returns whether it changed.
    pub fn apply_debounced_search(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if self.debounced_search_text.trim() == text.trim() {
            return false;
        }
        self.debounced_search_text = text;
        self.page = 1;
        true
    }

    /// Returns whether the filter value changed.
    pub fn set_filter(&mut self, name: impl Into<String>, value: impl Into<String>) -> bool {
        let name = name.into();
        let value = value.into();
        let value = if is_unconstrained(&value) {
            ALL.to_string()
        } else {
            value
        };
        if self.filters.get(&name) == Some(&value) {
            return false;
        }
        self.filters.insert(name, value);
        self.page = 1;
        true
    }

    pub fn filter(&self, name: &str) -> &str {
        self.filters.get(name).map(String::as_str).unwrap_or(ALL)
    }

    /// Moves to `page` clamped into `[1, total_pages]`. Returns whether the
    /// page actually changed.
    pub fn set_page(&mut self, page: u32, total_pages: u32) -> bool {
        let page = page.clamp(1, total_pages.max(1));
        if page == self.page {
            return false;
        }
        self.page = page;
        true
    }

    /// Back to the unfiltered first page.
    pub fn clear(&mut self) {
        self.search_text.clear();
        self.debounced_search_text.clear();
        for value in self.filters.values_mut() {
            *value = ALL.to_string();
        }
        self.page = 1;
    }

    /// Filters carrying an actual constraint.
    pub fn active_filters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.filters
            .iter()
            .filter(|(_, value)| !is_unconstrained(value))
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn is_filtered(&self) -> bool {
        !self.debounced_search_text.trim().is_empty() || self.active_filters().next().is_some()
    }
}
