use leptos::prelude::*;
use serde::de::DeserializeOwned;
use thaw::{Button, ButtonAppearance};

use super::{FilterSelect, PaginationControls, SearchInput};
use crate::shared::icons::icon;
use crate::shared::list_query::{FilterDef, ListQueryHandle};

/// Search box, filter dropdowns and the reset button of a list screen.
///
/// Filters default to the ones declared in the screen's `ListConfig`; pass
/// `filters` when the options arrive later (e.g. loaded from the server).
#[component]
pub fn ListToolbar<T>(
    handle: ListQueryHandle<T>,
    #[prop(optional, into)] filters: Option<Signal<Vec<FilterDef>>>,
    #[prop(optional, into)] search_placeholder: Option<String>,
) -> impl IntoView
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    let snapshot = handle.snapshot;
    let declared = handle.config().map(|c| c.filters).unwrap_or_default();
    let filters = filters.unwrap_or_else(|| Signal::stored(declared));
    let placeholder = search_placeholder.unwrap_or_else(|| "Поиск...".to_string());

    let can_reset = move || {
        snapshot.with(|s| s.query.is_filtered() || !s.query.search_text.is_empty())
    };

    view! {
        <div class="list-toolbar">
            <SearchInput
                value=Signal::derive(move || snapshot.with(|s| s.query.search_text.clone()))
                on_input=Callback::new(move |text| handle.set_search_text(text))
                placeholder=placeholder
            />
            {move || {
                filters
                    .get()
                    .into_iter()
                    .map(|filter| {
                        let name = filter.name.clone();
                        view! {
                            <FilterSelect
                                filter=filter
                                value=Signal::derive(move || {
                                    snapshot.with(|s| s.query.filter(&name).to_string())
                                })
                                on_change=Callback::new(move |(name, value)| handle.set_filter(name, value))
                            />
                        }
                    })
                    .collect_view()
            }}
            <Button
                appearance=ButtonAppearance::Subtle
                disabled=Signal::derive(move || !can_reset())
                on_click=move |_| handle.clear_filters()
            >
                {icon("filter-off")}
                " Сбросить"
            </Button>
        </div>
    }
}

/// Pagination bound to a list handle.
#[component]
pub fn ListPager<T>(handle: ListQueryHandle<T>) -> impl IntoView
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    let snapshot = handle.snapshot;

    view! {
        <PaginationControls
            current_page=Signal::derive(move || snapshot.with(|s| s.query.page))
            total_pages=Signal::derive(move || snapshot.with(|s| s.total_pages()))
            total_count=Signal::derive(move || snapshot.with(|s| s.total_count()))
            on_page_change=Callback::new(move |page| handle.set_page(page))
            disabled=Signal::derive(move || snapshot.with(|s| s.is_loading()))
        />
    }
}
