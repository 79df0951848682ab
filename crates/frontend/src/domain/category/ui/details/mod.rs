use contracts::domain::category::{fields, Category};
use leptos::prelude::*;

use crate::domain::category::ENDPOINT;
use crate::shared::components::{CheckboxField, DetailFrame, DetailTarget, FileField, TextField};
use crate::shared::entity_edit::{use_entity_detail, EntityConfig, Rule, Schema};

fn schema() -> Schema {
    Schema::new()
        .field(fields::NAME, "Name", [Rule::Required, Rule::MaxLength(100)])
        .field(fields::DESCRIPTION, "Description", [Rule::MaxLength(500)])
}

#[component]
#[allow(non_snake_case)]
pub fn CategoryDetails(
    target: DetailTarget,
    on_saved: Callback<()>,
    on_close: Callback<()>,
) -> impl IntoView {
    let details = use_entity_detail::<Category>(EntityConfig::new(ENDPOINT).schema(schema()));
    match target {
        DetailTarget::New => details.create(Category {
            is_active: true,
            ..Category::default()
        }),
        DetailTarget::Existing(id) => details.load(id),
    }

    let title = Signal::derive(move || {
        details.snapshot.with(|s| {
            if s.is_new {
                "Новая категория".to_string()
            } else {
                s.entity()
                    .map(|d| d.original().name.clone())
                    .unwrap_or_else(|| "Категория".to_string())
            }
        })
    });
    let read_only = details.read_only();

    view! {
        <DetailFrame handle=details title=title on_saved=on_saved on_close=on_close>
            <TextField
                label="Название"
                value=details.field_text(fields::NAME)
                on_input=details.text_input(fields::NAME)
                error=details.field_error(fields::NAME)
                disabled=read_only
            />
            <TextField
                label="Описание"
                value=details.field_text(fields::DESCRIPTION)
                on_input=details.text_input(fields::DESCRIPTION)
                error=details.field_error(fields::DESCRIPTION)
                disabled=read_only
            />
            <FileField
                label="Изображение"
                current=details.upload_label(fields::IMAGE)
                on_file=details.file_input(fields::IMAGE)
                error=details.field_error(fields::IMAGE)
                disabled=read_only
                accept="image/*"
            />
            <CheckboxField
                label="Активна"
                checked=details.field_bool(fields::IS_ACTIVE)
                on_change=details.bool_input(fields::IS_ACTIVE)
                disabled=read_only
            />
        </DetailFrame>
    }
}
