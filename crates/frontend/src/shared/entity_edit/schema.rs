//! Declarative form validation.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

pub type FieldErrors = BTreeMap<String, String>;

/// Formats used across the vendor and bank forms.
pub mod patterns {
    use super::*;

    pub static IFSC: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^[A-Z]{4}0[A-Z0-9]{6}$").expect("Invalid IFSC regex"));

    pub static GSTIN: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"^[0-9]{2}[A-Z]{5}[0-9]{4}[A-Z][1-9A-Z]Z[0-9A-Z]$")
            .expect("Invalid GSTIN regex")
    });

    pub static PAN: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]$").expect("Invalid PAN regex"));

    pub static EMAIL: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex"));

    pub static PHONE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^[6-9][0-9]{9}$").expect("Invalid phone regex"));

    pub static ACCOUNT_NUMBER: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^[0-9]{9,18}$").expect("Invalid account number regex"));
}

#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// Non-blank text, or a staged file for upload fields.
    Required,
    MinLength(usize),
    MaxLength(usize),
    /// Checked only when the field has a value.
    Pattern {
        regex: &'static Lazy<Regex>,
        message: &'static str,
    },
}

impl Rule {
    pub fn ifsc() -> Self {
        Rule::Pattern {
            regex: &patterns::IFSC,
            message: "must look like SBIN0001234",
        }
    }

    pub fn gstin() -> Self {
        Rule::Pattern {
            regex: &patterns::GSTIN,
            message: "must be a 15-character GSTIN",
        }
    }

    pub fn pan() -> Self {
        Rule::Pattern {
            regex: &patterns::PAN,
            message: "must look like ABCDE1234F",
        }
    }

    pub fn email() -> Self {
        Rule::Pattern {
            regex: &patterns::EMAIL,
            message: "must be a valid email address",
        }
    }

    pub fn phone() -> Self {
        Rule::Pattern {
            regex: &patterns::PHONE,
            message: "must be a 10-digit mobile number",
        }
    }

    pub fn account_number() -> Self {
        Rule::Pattern {
            regex: &patterns::ACCOUNT_NUMBER,
            message: "must be 9 to 18 digits",
        }
    }

    fn check(&self, label: &str, input: &FieldInput) -> Option<String> {
        let text = input.text.trim();
        match self {
            Rule::Required if text.is_empty() && !input.has_upload => {
                Some(format!("{} is required", label))
            }
            Rule::MinLength(min) if !text.is_empty() && text.chars().count() < *min => {
                Some(format!("{} must be at least {} characters", label, min))
            }
            Rule::MaxLength(max) if text.chars().count() > *max => {
                Some(format!("{} must be at most {} characters", label, max))
            }
            Rule::Pattern { regex, message } if !text.is_empty() && !regex.is_match(text) => {
                Some(format!("{} {}", label, message))
            }
            _ => None,
        }
    }
}

/// A field's current value as the validator sees it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldInput {
    pub text: String,
    pub has_upload: bool,
}

#[derive(Debug, Clone)]
struct FieldRules {
    name: &'static str,
    label: &'static str,
    rules: Vec<Rule>,
}

#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<FieldRules>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(
        mut self,
        name: &'static str,
        label: &'static str,
        rules: impl IntoIterator<Item = Rule>,
    ) -> Self {
        self.fields.push(FieldRules {
            name,
            label,
            rules: rules.into_iter().collect(),
        });
        self
    }

    pub fn label(&self, name: &str) -> Option<&'static str> {
        self.fields.iter().find(|f| f.name == name).map(|f| f.label)
    }

    /// First failing rule per field, keyed by field name.
    pub fn validate(&self, input: impl Fn(&str) -> FieldInput) -> FieldErrors {
        let mut errors = FieldErrors::new();
        for field in &self.fields {
            let value = input(field.name);
            if let Some(message) = field.rules.iter().find_map(|r| r.check(field.label, &value)) {
                errors.insert(field.name.to_string(), message);
            }
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> FieldInput {
        FieldInput {
            text: value.to_string(),
            has_upload: false,
        }
    }

    #[test]
    fn test_identifier_patterns() {
        assert!(patterns::IFSC.is_match("SBIN0001234"));
        assert!(!patterns::IFSC.is_match("SBIN1001234"));
        assert!(patterns::GSTIN.is_match("27AAPFU0939F1ZV"));
        assert!(!patterns::GSTIN.is_match("27AAPFU0939F1XV"));
        assert!(patterns::PAN.is_match("AAPFU0939F"));
        assert!(!patterns::PAN.is_match("aapfu0939f"));
        assert!(patterns::PHONE.is_match("9876543210"));
        assert!(!patterns::PHONE.is_match("1234567890"));
    }

    #[test]
    fn test_validate_reports_first_failure_per_field() {
        let schema = Schema::new()
            .field("bankName", "Bank name", [Rule::Required, Rule::MaxLength(5)])
            .field("ifscCode", "IFSC code", [Rule::Required, Rule::ifsc()])
            .field("branch", "Branch", [Rule::MinLength(3)]);

        let errors = schema.validate(|name| match name {
            "bankName" => text("   "),
            "ifscCode" => text("bad"),
            _ => text(""),
        });
        assert_eq!(errors.get("bankName").map(String::as_str), Some("Bank name is required"));
        assert_eq!(
            errors.get("ifscCode").map(String::as_str),
            Some("IFSC code must look like SBIN0001234")
        );
        assert!(!errors.contains_key("branch"));

        let errors = schema.validate(|name| match name {
            "bankName" => text("Canara Bank"),
            "ifscCode" => text("CNRB0000001"),
            _ => text("ab"),
        });
        assert!(errors["bankName"].contains("at most 5"));
        assert!(errors["branch"].contains("at least 3"));
        assert!(!errors.contains_key("ifscCode"));
    }

    #[test]
    fn test_required_file_accepts_staged_upload() {
        let schema = Schema::new().field("panCard", "PAN card", [Rule::Required]);
        let errors = schema.validate(|_| FieldInput {
            text: String::new(),
            has_upload: true,
        });
        assert!(errors.is_empty());
        assert_eq!(schema.label("panCard"), Some("PAN card"));
    }
}
