use std::rc::Rc;

use contracts::domain::country::State;
use contracts::shared::select::SelectOption;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::common::{active_filter, active_param_mapper};
use crate::domain::country::options::load_country_options;
use crate::domain::country::STATES_ENDPOINT;
use crate::shared::api::gloo::GlooTransport;
use crate::shared::api::ApiClient;
use crate::shared::components::{ActiveBadge, ListPager, ListStatusView, ListToolbar};
use crate::shared::config::config;
use crate::shared::icons::icon;
use crate::shared::list_query::{use_list_query, FilterDef, ListConfig};
use crate::system::auth::session::use_session;

const COUNTRY_FILTER: &str = "country";

fn country_filter(options: Vec<SelectOption>) -> FilterDef {
    FilterDef::new(COUNTRY_FILTER, "Страна", options)
}

#[component]
#[allow(non_snake_case)]
pub fn StateList() -> impl IntoView {
    let list = use_list_query::<State>(
        ListConfig::new(STATES_ENDPOINT)
            .with_defaults(&config().lists)
            .filter(country_filter(Vec::new()))
            .filter(active_filter())
            .param_mapper(active_param_mapper),
    );

    // Country choices arrive after the first page; until then the filter
    // offers only "All".
    let (countries, set_countries) = signal::<Vec<SelectOption>>(Vec::new());
    let client = ApiClient::new(Rc::new(GlooTransport), use_session());
    spawn_local(async move {
        match load_country_options(&client).await {
            Ok(options) => {
                let _ = set_countries.try_set(options);
            }
            Err(e) => log::warn!("Failed to load countries: {}", e),
        }
    });

    let filters = Signal::derive(move || vec![country_filter(countries.get()), active_filter()]);

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">{"Штаты и регионы"}</h1>
                </div>
                <div class="header__actions">
                    <button class="button button--secondary" on:click=move |_| list.refresh()>
                        {icon("refresh")}
                        {"Обновить"}
                    </button>
                </div>
            </div>

            <ListToolbar handle=list filters=filters search_placeholder="Название региона" />
            <ListStatusView handle=list />

            <div class="table">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell">{"Регион"}</th>
                            <th class="table__header-cell">{"Страна"}</th>
                            <th class="table__header-cell">{"Статус"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            list.snapshot
                                .with(|s| s.items().to_vec())
                                .into_iter()
                                .map(|state| {
                                    let country = state.country_name.unwrap_or(state.country);
                                    view! {
                                        <tr class="table__row">
                                            <td class="table__cell">{state.name}</td>
                                            <td class="table__cell">{country}</td>
                                            <td class="table__cell"><ActiveBadge active=state.is_active /></td>
                                        </tr>
                                    }
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
