use crate::shared::api::ErrorKind;
use crate::shared::list_query::ListQueryHandle;
use leptos::prelude::*;
use serde::de::DeserializeOwned;
use thaw::{Spinner, SpinnerSize};

/// Loading, error and empty-result banners for a list screen. Renders
/// nothing once rows are on screen. Retry reissues the current query.
#[component]
pub fn ListStatusView<T>(handle: ListQueryHandle<T>) -> impl IntoView
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    let snapshot = handle.snapshot;
    move || {
        let current = snapshot.get();
        if current.is_loading() {
            return view! {
                <div class="list-status list-status--loading">
                    <Spinner size=SpinnerSize::Small label="Загрузка..." />
                </div>
            }
            .into_any();
        }
        if let Some(error) = current.error() {
            let hint = match error.kind {
                ErrorKind::Network => "Сервер недоступен.",
                ErrorKind::Auth => "Сессия истекла, войдите снова.",
                _ => "",
            };
            let message = error.to_string();
            return view! {
                <div class="alert alert--error">
                    <span class="alert__text">{message} " " {hint}</span>
                    <button class="button button--secondary" on:click=move |_| handle.refresh()>
                        "Повторить"
                    </button>
                </div>
            }
            .into_any();
        }
        if current.is_empty_result() {
            let text = if current.query.is_filtered() {
                "Ничего не найдено по заданным условиям"
            } else {
                "Нет данных"
            };
            return view! { <div class="list-status list-status--empty">{text}</div> }.into_any();
        }
        ().into_any()
    }
}
