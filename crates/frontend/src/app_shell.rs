//! Application shell: auth gate, sidebar and the active admin screen.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::bank::ui::list::BankList;
use crate::domain::category::ui::list::CategoryList;
use crate::domain::country::ui::list::CountryList;
use crate::domain::country::ui::states::StateList;
use crate::domain::order::ui::list::OrderList;
use crate::domain::vendor::ui::list::VendorList;
use crate::shared::icons::icon;
use crate::system::auth::context::{do_logout, use_auth};
use crate::system::auth::guard::RequireAuth;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Vendors,
    Orders,
    Categories,
    Banks,
    Countries,
    States,
}

impl Screen {
    pub fn label(&self) -> &'static str {
        match self {
            Screen::Vendors => "Продавцы",
            Screen::Orders => "Заказы",
            Screen::Categories => "Категории",
            Screen::Banks => "Банки",
            Screen::Countries => "Страны",
            Screen::States => "Регионы",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Screen::Vendors => "vendors",
            Screen::Orders => "orders",
            Screen::Categories => "categories",
            Screen::Banks => "banks",
            Screen::Countries | Screen::States => "countries",
        }
    }
}

struct MenuGroup {
    label: &'static str,
    items: &'static [Screen],
}

const MENU: &[MenuGroup] = &[
    MenuGroup {
        label: "Продажи",
        items: &[Screen::Vendors, Screen::Orders],
    },
    MenuGroup {
        label: "Справочники",
        items: &[Screen::Categories, Screen::Banks, Screen::Countries, Screen::States],
    },
];

#[component]
fn Sidebar(active: RwSignal<Screen>) -> impl IntoView {
    view! {
        <div class="app-sidebar__content">
            {MENU
                .iter()
                .map(|group| {
                    view! {
                        <div class="app-sidebar__group">
                            <div class="app-sidebar__group-label">{group.label}</div>
                            {group
                                .items
                                .iter()
                                .copied()
                                .map(|screen| {
                                    view! {
                                        <div
                                            class="app-sidebar__item"
                                            class:app-sidebar__item--active=move || active.get() == screen
                                            on:click=move |_| active.set(screen)
                                        >
                                            {icon(screen.icon())}
                                            <span>{screen.label()}</span>
                                        </div>
                                    }
                                })
                                .collect_view()}
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[component]
fn MainLayout() -> impl IntoView {
    let (auth_state, set_auth_state) = use_auth();
    let active = RwSignal::new(Screen::default());

    let admin_name = move || {
        auth_state.with(|s| {
            s.admin
                .as_ref()
                .map(|a| a.display_name().to_string())
                .unwrap_or_default()
        })
    };

    view! {
        <div class="app-layout">
            <header class="app-header">
                <span class="app-header__title">"Marketplace Admin"</span>
                <div class="app-header__user">
                    <span>{admin_name}</span>
                    <button class="button button--secondary" on:click=move |_| spawn_local(do_logout(set_auth_state))>
                        {icon("logout")}
                        {"Выйти"}
                    </button>
                </div>
            </header>
            <div class="app-body">
                <aside class="app-sidebar">
                    <Sidebar active=active />
                </aside>
                <main class="app-main">
                    {move || match active.get() {
                        Screen::Vendors => view! { <VendorList /> }.into_any(),
                        Screen::Orders => view! { <OrderList /> }.into_any(),
                        Screen::Categories => view! { <CategoryList /> }.into_any(),
                        Screen::Banks => view! { <BankList /> }.into_any(),
                        Screen::Countries => view! { <CountryList /> }.into_any(),
                        Screen::States => view! { <StateList /> }.into_any(),
                    }}
                </main>
            </div>
        </div>
    }
}

/// Login page until the operator signs in, the admin layout afterwards.
#[component]
pub fn AppShell() -> impl IntoView {
    view! {
        <RequireAuth>
            <MainLayout />
        </RequireAuth>
    }
}
