use contracts::domain::country::Country;
use leptos::prelude::*;

use crate::domain::common::{active_filter, active_param_mapper};
use crate::domain::country::ENDPOINT;
use crate::shared::components::{ActiveBadge, ListPager, ListStatusView, ListToolbar};
use crate::shared::config::config;
use crate::shared::icons::icon;
use crate::shared::list_query::{use_list_query, ListConfig};

#[component]
#[allow(non_snake_case)]
pub fn CountryList() -> impl IntoView {
    let list = use_list_query::<Country>(
        ListConfig::new(ENDPOINT)
            .with_defaults(&config().lists)
            .filter(active_filter())
            .param_mapper(active_param_mapper),
    );

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">{"Страны"}</h1>
                </div>
                <div class="header__actions">
                    <button class="button button--secondary" on:click=move |_| list.refresh()>
                        {icon("refresh")}
                        {"Обновить"}
                    </button>
                </div>
            </div>

            <ListToolbar handle=list search_placeholder="Название или ISO-код" />
            <ListStatusView handle=list />

            <div class="table">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell">{"Страна"}</th>
                            <th class="table__header-cell">{"ISO"}</th>
                            <th class="table__header-cell">{"Код телефона"}</th>
                            <th class="table__header-cell">{"Статус"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            list.snapshot
                                .with(|s| s.items().to_vec())
                                .into_iter()
                                .map(|country| view! {
                                    <tr class="table__row">
                                        <td class="table__cell">{country.name}</td>
                                        <td class="table__cell">{country.iso_code}</td>
                                        <td class="table__cell">{country.phone_code}</td>
                                        <td class="table__cell"><ActiveBadge active=country.is_active /></td>
                                    </tr>
                                })
                                .collect_view()
                        }}
                    </tbody>
                </table>
            </div>

            <ListPager handle=list />
        </div>
    }
}
