use contracts::shared::select::SelectOption;
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::HtmlInputElement;

use crate::shared::api::gloo::read_file;
use crate::shared::api::FileUpload;
use crate::shared::icons::icon;

/// Inline validation message under a form control.
#[component]
pub fn FieldError(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    move || {
        message
            .get()
            .map(|text| view! { <div class="form__error">{text}</div> })
    }
}

/// Labelled text input bound to one draft field.
#[component]
pub fn TextField(
    #[prop(into)] label: String,
    #[prop(into)] value: Signal<String>,
    on_input: Callback<String>,
    #[prop(into)] error: Signal<Option<String>>,
    #[prop(into)] disabled: Signal<bool>,
    #[prop(optional, into)] input_type: Option<String>,
    #[prop(optional, into)] placeholder: Option<String>,
) -> impl IntoView {
    let input_type = input_type.unwrap_or_else(|| "text".to_string());

    view! {
        <div class="form__group" class:form__group--invalid=move || error.get().is_some()>
            <label class="form__label">{label}</label>
            <input
                type=input_type
                class="form__input"
                placeholder=placeholder.unwrap_or_default()
                prop:value=move || value.get()
                disabled=move || disabled.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
            <FieldError message=error />
        </div>
    }
}

/// Labelled checkbox bound to one boolean draft field.
#[component]
pub fn CheckboxField(
    #[prop(into)] label: String,
    #[prop(into)] checked: Signal<bool>,
    on_change: Callback<bool>,
    #[prop(into)] disabled: Signal<bool>,
) -> impl IntoView {
    view! {
        <label class="form__checkbox">
            <input
                type="checkbox"
                prop:checked=move || checked.get()
                disabled=move || disabled.get()
                on:change=move |ev| on_change.run(event_target_checked(&ev))
            />
            <span>{label}</span>
        </label>
    }
}

/// Labelled dropdown bound to one enumerated draft field.
#[component]
pub fn SelectField(
    #[prop(into)] label: String,
    options: Vec<SelectOption>,
    #[prop(into)] value: Signal<String>,
    on_change: Callback<String>,
    #[prop(into)] error: Signal<Option<String>>,
    #[prop(into)] disabled: Signal<bool>,
) -> impl IntoView {
    view! {
        <div class="form__group" class:form__group--invalid=move || error.get().is_some()>
            <label class="form__label">{label}</label>
            <select
                class="form__select"
                disabled=move || disabled.get()
                on:change=move |ev| on_change.run(event_target_value(&ev))
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
            <FieldError message=error />
        </div>
    }
}

/// Document picker. The chosen file is read into memory and handed over as
/// a [`FileUpload`]; `current` shows the staged file name or the stored URL.
#[component]
pub fn FileField(
    #[prop(into)] label: String,
    #[prop(into)] current: Signal<Option<String>>,
    on_file: Callback<FileUpload>,
    #[prop(into)] error: Signal<Option<String>>,
    #[prop(into)] disabled: Signal<bool>,
    #[prop(optional, into)] accept: Option<String>,
) -> impl IntoView {
    let accept = accept.unwrap_or_else(|| ".pdf,.png,.jpg,.jpeg".to_string());

    let on_change = move |ev: leptos::ev::Event| {
        let input: HtmlInputElement = event_target(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        spawn_local(async move {
            match read_file(&file).await {
                Ok(upload) => on_file.run(upload),
                Err(e) => log::warn!("Failed to read {}: {}", file.name(), e),
            }
        });
    };

    view! {
        <div class="form__group" class:form__group--invalid=move || error.get().is_some()>
            <label class="form__label">{label}</label>
            <div class="form__file">
                {move || match current.get() {
                    Some(name) => view! { <span class="form__file-name">{name}</span> }.into_any(),
                    None => view! { <span class="form__file-name form__file-name--empty">"Файл не выбран"</span> }.into_any(),
                }}
                <label class="button button--secondary" class:button--disabled=move || disabled.get()>
                    {icon("upload")}
                    " Загрузить"
                    <input
                        type="file"
                        class="form__file-input"
                        accept=accept
                        disabled=move || disabled.get()
                        on:change=on_change
                    />
                </label>
            </div>
            <FieldError message=error />
        </div>
    }
}
