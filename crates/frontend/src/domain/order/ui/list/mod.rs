use contracts::domain::order::Order;
use leptos::prelude::*;

use crate::domain::order::{status_options, ENDPOINT};
use crate::shared::components::{ListPager, ListStatusView, ListToolbar, StatusBadge};
use crate::shared::config::config;
use crate::shared::icons::icon;
use crate::shared::list_query::{use_list_query, FilterDef, ListConfig};

#[derive(Clone, Debug)]
pub struct OrderRow {
    pub id: String,
    pub order_number: String,
    pub customer_name: String,
    pub vendor_name: String,
    pub total_amount: String,
    pub status: &'static str,
    pub created_at: String,
}

impl From<Order> for OrderRow {
    fn from(o: Order) -> Self {
        Self {
            id: o.id,
            order_number: o.order_number,
            customer_name: o.customer_name,
            vendor_name: o.vendor_name.unwrap_or_else(|| "-".to_string()),
            total_amount: format!("₹{:.2}", o.total_amount),
            status: o.status.as_str(),
            created_at: o
                .created_at
                .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

#[component]
#[allow(non_snake_case)]
pub fn OrderList() -> impl IntoView {
    let list = use_list_query::<Order>(
        ListConfig::new(ENDPOINT)
            .with_defaults(&config().lists)
            .filter(FilterDef::new("status", "Статус", status_options())),
    );

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">{"Заказы"}</h1>
                </div>
                <div class="header__actions">
                    <button class="button button--secondary" on:click=move |_| list.refresh()>
                        {icon("refresh")}
                        {"Обновить"}
                    </button>
                </div>
            </div>

            <ListToolbar handle=list search_placeholder="Номер заказа или покупатель" />
            <ListStatusView handle=list />

            <div class="table">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell">{"Номер"}</th>
                            <th class="table__header-cell">{"Покупатель"}</th>
                            <th class="table__header-cell">{"Продавец"}</th>
                            <th class="table__header-cell table__header-cell--right">{"Сумма"}</th>
                            <th class="table__header-cell">{"Статус"}</th>
                            <th class="table__header-cell">{"Создан"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || {
                                list.snapshot
                                    .with(|s| s.items().to_vec())
                                    .into_iter()
                                    .map(OrderRow::from)
                                    .collect::<Vec<_>>()
                            }
                            key=|row| row.id.clone()
                            children=move |row: OrderRow| {
                                view! {
                                    <tr class="table__row">
                                        <td class="table__cell table__cell--mono">{row.order_number}</td>
                                        <td class="table__cell">{row.customer_name}</td>
                                        <td class="table__cell">{row.vendor_name}</td>
                                        <td class="table__cell table__cell--right">{row.total_amount}</td>
                                        <td class="table__cell"><StatusBadge status=row.status /></td>
                                        <td class="table__cell">{row.created_at}</td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </div>

            <ListPager handle=list />
        </div>
    }
}
