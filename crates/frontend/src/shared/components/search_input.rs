use crate::shared::icons::icon;
use leptos::prelude::*;

/// Free-text search box. Every keystroke is reported; debouncing is the
/// list controller's job.
#[component]
pub fn SearchInput(
    #[prop(into)] value: Signal<String>,
    on_input: Callback<String>,
    #[prop(optional, into)] placeholder: MaybeProp<String>,
) -> impl IntoView {
    let placeholder = move || placeholder.get().unwrap_or_else(|| "Поиск...".to_string());

    view! {
        <div class="search-input">
            <span class="search-input__icon">{icon("search")}</span>
            <input
                type="search"
                class="form__input search-input__field"
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
        </div>
    }
}
