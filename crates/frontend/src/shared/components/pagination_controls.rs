use crate::shared::icons::icon;
use leptos::prelude::*;

/// Page navigation for list screens. Pages are 1-indexed; the controller
/// clamps any request outside `[1, total_pages]`.
#[component]
pub fn PaginationControls(
    /// Current page (1-indexed)
    #[prop(into)]
    current_page: Signal<u32>,

    /// Total number of pages, at least 1
    #[prop(into)]
    total_pages: Signal<u32>,

    /// Total count of items matching the query
    #[prop(into)]
    total_count: Signal<u64>,

    /// Callback when page changes
    on_page_change: Callback<u32>,

    /// Disables navigation while a request is in flight
    #[prop(optional, into)]
    disabled: Signal<bool>,
) -> impl IntoView {
    let at_first = move || disabled.get() || current_page.get() <= 1;
    let at_last = move || disabled.get() || current_page.get() >= total_pages.get().max(1);

    view! {
        <div class="pagination-controls">
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(1)
                disabled=at_first
                title="Первая страница"
            >
                {icon("chevrons-left")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(current_page.get().saturating_sub(1))
                disabled=at_first
                title="Предыдущая страница"
            >
                {icon("chevron-left")}
            </button>
            <span class="pagination-info">
                {move || {
                    format!(
                        "{} / {} ({})",
                        current_page.get(),
                        total_pages.get().max(1),
                        total_count.get()
                    )
                }}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(current_page.get() + 1)
                disabled=at_last
                title="Следующая страница"
            >
                {icon("chevron-right")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(total_pages.get().max(1))
                disabled=at_last
                title="Последняя страница"
            >
                {icon("chevrons-right")}
            </button>
        </div>
    }
}
