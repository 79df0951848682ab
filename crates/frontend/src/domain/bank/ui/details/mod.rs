use contracts::domain::bank::{fields, Bank};
use leptos::prelude::*;

use crate::domain::bank::ENDPOINT;
use crate::shared::components::{CheckboxField, DetailFrame, DetailTarget, TextField};
use crate::shared::entity_edit::{use_entity_detail, EntityConfig, Rule, Schema};

fn schema() -> Schema {
    Schema::new()
        .field(fields::BANK_NAME, "Bank name", [Rule::Required, Rule::MaxLength(100)])
        .field(fields::BRANCH, "Branch", [Rule::MaxLength(100)])
        .field(fields::IFSC_CODE, "IFSC code", [Rule::Required, Rule::ifsc()])
}

#[component]
#[allow(non_snake_case)]
pub fn BankDetails(
    target: DetailTarget,
    on_saved: Callback<()>,
    on_close: Callback<()>,
) -> impl IntoView {
    let details = use_entity_detail::<Bank>(EntityConfig::new(ENDPOINT).schema(schema()));
    match target {
        DetailTarget::New => details.create(Bank {
            is_active: true,
            ..Bank::default()
        }),
        DetailTarget::Existing(id) => details.load(id),
    }

    let title = Signal::derive(move || {
        details.snapshot.with(|s| match s.entity() {
            Some(_) if s.is_new => "Новый банк".to_string(),
            Some(d) => d.original().bank_name.clone(),
            None => "Банк".to_string(),
        })
    });
    let read_only = details.read_only();

    view! {
        <DetailFrame handle=details title=title on_saved=on_saved on_close=on_close>
            <TextField
                label="Название банка"
                value=details.field_text(fields::BANK_NAME)
                on_input=details.text_input(fields::BANK_NAME)
                error=details.field_error(fields::BANK_NAME)
                disabled=read_only
            />
            <TextField
                label="Отделение"
                value=details.field_text(fields::BRANCH)
                on_input=details.text_input(fields::BRANCH)
                error=details.field_error(fields::BRANCH)
                disabled=read_only
            />
            <TextField
                label="IFSC"
                value=details.field_text(fields::IFSC_CODE)
                on_input=details.text_input(fields::IFSC_CODE)
                error=details.field_error(fields::IFSC_CODE)
                disabled=read_only
                placeholder="SBIN0001234"
            />
            <CheckboxField
                label="Активен"
                checked=details.field_bool(fields::IS_ACTIVE)
                on_change=details.bool_input(fields::IS_ACTIVE)
                disabled=read_only
            />
        </DetailFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::entity_edit::FieldInput;

    fn input(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> FieldInput {
        move |name| FieldInput {
            text: pairs
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.to_string())
                .unwrap_or_default(),
            has_upload: false,
        }
    }

    #[test]
    fn test_bank_schema_checks_ifsc() {
        let errors = schema().validate(input(&[("bankName", "SBI"), ("ifscCode", "sbin1")]));
        assert_eq!(errors.len(), 1);
        assert!(errors["ifscCode"].starts_with("IFSC code"));

        let errors = schema().validate(input(&[("bankName", "SBI"), ("ifscCode", "SBIN0001234")]));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_bank_schema_requires_name() {
        let errors = schema().validate(input(&[("ifscCode", "SBIN0001234")]));
        assert_eq!(errors["bankName"], "Bank name is required");
    }
}
