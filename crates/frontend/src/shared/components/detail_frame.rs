use leptos::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thaw::{Button, ButtonAppearance, Spinner, SpinnerSize};

use crate::shared::entity_edit::{EditMode, EntityDetailHandle, SaveOutcome};
use crate::shared::icons::icon;

/// What a list screen has opened in its detail panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailTarget {
    New,
    Existing(String),
}

/// Shell shared by every detail form: header, load and save errors, and the
/// mode-dependent action buttons. The form fields go in `children` and are
/// mounted once the entity is ready.
#[component]
pub fn DetailFrame<T>(
    handle: EntityDetailHandle<T>,
    #[prop(into)] title: Signal<String>,
    on_saved: Callback<()>,
    on_close: Callback<()>,
    children: ChildrenFn,
) -> impl IntoView
where
    T: Serialize + DeserializeOwned + Clone + PartialEq + Send + Sync + 'static,
{
    let snapshot = handle.snapshot;
    let mode = move || snapshot.with(|s| s.mode());
    let is_new = move || snapshot.with(|s| s.is_new);

    let save = move |_: leptos::ev::MouseEvent| {
        handle.save(move |outcome| match outcome {
            SaveOutcome::Saved => on_saved.run(()),
            SaveOutcome::Invalid => log::debug!("save blocked by validation"),
            SaveOutcome::Failed(e) => log::warn!("save failed: {}", e),
        })
    };

    let cancel = move |_: leptos::ev::MouseEvent| {
        if is_new() {
            on_close.run(());
        } else {
            handle.cancel();
        }
    };

    view! {
        <div class="details-container">
            <div class="details-header">
                <h3>{move || title.get()}</h3>
                <Button appearance=ButtonAppearance::Subtle on_click=move |_| on_close.run(())>
                    {icon("cancel")}
                </Button>
            </div>

            {move || {
                snapshot
                    .with(|s| s.is_loading())
                    .then(|| view! { <Spinner size=SpinnerSize::Small label="Загрузка..." /> })
            }}

            {move || {
                snapshot
                    .with(|s| s.load_error().map(|e| e.to_string()))
                    .map(|message| {
                        view! {
                            <div class="alert alert--error">
                                <span class="alert__text">{message}</span>
                                <button class="button button--secondary" on:click=move |_| handle.reload()>
                                    "Повторить"
                                </button>
                            </div>
                        }
                    })
            }}

            {move || {
                snapshot
                    .with(|s| s.error.as_ref().map(|e| e.to_string()))
                    .map(|message| view! { <div class="alert alert--error">{message}</div> })
            }}

            <Show when=move || snapshot.with(|s| s.entity().is_some())>
                <div class="details-form">{children()}</div>

                <div class="details-actions">
                    {move || match mode() {
                        Some(EditMode::View) => view! {
                            <Button appearance=ButtonAppearance::Primary on_click=move |_| handle.edit()>
                                {icon("edit")}
                                " Редактировать"
                            </Button>
                            <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                                "Закрыть"
                            </Button>
                        }
                        .into_any(),
                        Some(EditMode::Editing) => view! {
                            <Button appearance=ButtonAppearance::Primary on_click=save>
                                {icon("save")}
                                {if is_new() { " Создать" } else { " Сохранить" }}
                            </Button>
                            <Button appearance=ButtonAppearance::Secondary on_click=cancel>
                                {icon("cancel")}
                                " Отмена"
                            </Button>
                        }
                        .into_any(),
                        Some(EditMode::Saving) => view! {
                            <Button appearance=ButtonAppearance::Primary disabled=true>
                                "Сохранение..."
                            </Button>
                        }
                        .into_any(),
                        None => ().into_any(),
                    }}
                </div>
            </Show>
        </div>
    }
}
