use crate::shared::list_query::FilterDef;
use leptos::prelude::*;

/// Dropdown for one list filter. The first option is always the "All"
/// sentinel supplied by [`FilterDef`].
#[component]
pub fn FilterSelect(
    filter: FilterDef,
    #[prop(into)] value: Signal<String>,
    on_change: Callback<(String, String)>,
) -> impl IntoView {
    let FilterDef {
        name,
        label,
        options,
    } = filter;
    let select_id = format!("filter-{}", name);

    view! {
        <div class="form__group filter-select">
            <label class="form__label" for=select_id.clone()>{label}</label>
            <select
                id=select_id
                class="form__select"
                on:change=move |ev| on_change.run((name.clone(), event_target_value(&ev)))
            >
                {options
                    .into_iter()
                    .map(|option| {
                        let option_value = option.value.clone();
                        view! {
                            <option
                                value=option.value
                                selected=move || value.get() == option_value
                            >
                                {option.label}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </div>
    }
}
