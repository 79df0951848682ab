use contracts::domain::category::Category;
use leptos::prelude::*;

use super::details::CategoryDetails;
use crate::domain::category::ENDPOINT;
use crate::domain::common::{active_filter, active_param_mapper};
use crate::shared::components::{
    ActiveBadge, DetailTarget, ListPager, ListStatusView, ListToolbar,
};
use crate::shared::config::config;
use crate::shared::icons::icon;
use crate::shared::list_query::{use_list_query, ListConfig};

fn format_date(category: &Category) -> String {
    category
        .created_at
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

#[component]
#[allow(non_snake_case)]
pub fn CategoryList() -> impl IntoView {
    let list = use_list_query::<Category>(
        ListConfig::new(ENDPOINT)
            .with_defaults(&config().lists)
            .filter(active_filter())
            .param_mapper(active_param_mapper),
    );
    let (detail, set_detail) = signal::<Option<DetailTarget>>(None);

    let on_saved = Callback::new(move |_| list.refresh());
    let on_close = Callback::new(move |_| set_detail.set(None));

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">{"Категории"}</h1>
                </div>
                <div class="header__actions">
                    <button class="button button--primary" on:click=move |_| set_detail.set(Some(DetailTarget::New))>
                        {icon("plus")}
                        {"Новая категория"}
                    </button>
                    <button class="button button--secondary" on:click=move |_| list.refresh()>
                        {icon("refresh")}
                        {"Обновить"}
                    </button>
                </div>
            </div>

            <ListToolbar handle=list search_placeholder="Поиск по названию" />
            <ListStatusView handle=list />

            <div class="table">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell">{"Название"}</th>
                            <th class="table__header-cell">{"Описание"}</th>
                            <th class="table__header-cell">{"Статус"}</th>
                            <th class="table__header-cell">{"Создано"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            list.snapshot
                                .with(|s| s.items().to_vec())
                                .into_iter()
                                .map(|category| {
                                    let id = category.id.clone();
                                    let created = format_date(&category);
                                    view! {
                                        <tr
                                            class="table__row"
                                            on:click=move |_| {
                                                if let Some(id) = id.clone() {
                                                    set_detail.set(Some(DetailTarget::Existing(id)));
                                                }
                                            }
                                        >
                                            <td class="table__cell table__cell--link">{category.name}</td>
                                            <td class="table__cell">{category.description}</td>
                                            <td class="table__cell"><ActiveBadge active=category.is_active /></td>
                                            <td class="table__cell">{created}</td>
                                        </tr>
                                    }
                                })
                                .collect_view()
                        }}
                    </tbody>
                </table>
            </div>

            <ListPager handle=list />

            {move || {
                detail
                    .get()
                    .map(|target| {
                        view! { <CategoryDetails target=target on_saved=on_saved on_close=on_close /> }
                    })
            }}
        </div>
    }
}
