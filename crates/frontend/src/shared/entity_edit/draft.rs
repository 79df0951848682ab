use std::collections::BTreeMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Number, Value};
use thiserror::Error;

use super::schema::{FieldErrors, FieldInput};
use crate::shared::api::{FileUpload, FormPart, RequestBody};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    View,
    Editing,
    Saving,
}

impl fmt::Display for EditMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EditMode::View => "viewing",
            EditMode::Editing => "editing",
            EditMode::Saving => "saving",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("Nothing is loaded")]
    NotLoaded,
    #[error("Cannot {action} while {mode}")]
    InvalidMode { action: &'static str, mode: EditMode },
    #[error("Unknown field: {0}")]
    UnknownField(String),
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("Failed to encode entity: {0}")]
    Encode(String),
}

/// A value typed into one form field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Bool(bool),
    Number(f64),
    Null,
    File(FileUpload),
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<FileUpload> for FieldValue {
    fn from(value: FileUpload) -> Self {
        FieldValue::File(value)
    }
}

impl FieldValue {
    fn into_json(self, field: &str) -> Result<Value, EditError> {
        Ok(match self {
            FieldValue::Text(text) => Value::String(text),
            FieldValue::Bool(flag) => Value::Bool(flag),
            FieldValue::Null => Value::Null,
            // Whole numbers go out as integers so integer fields accept them.
            FieldValue::Number(n) if n.fract() == 0.0 && n.abs() < i64::MAX as f64 => {
                Value::Number(Number::from(n as i64))
            }
            FieldValue::Number(n) => Number::from_f64(n).map(Value::Number).ok_or_else(|| {
                EditError::InvalidValue {
                    field: field.to_string(),
                    reason: "not a finite number".to_string(),
                }
            })?,
            FieldValue::File(_) => Value::Null,
        })
    }
}

fn to_object<T: Serialize>(entity: &T) -> Result<Map<String, Value>, EditError> {
    match serde_json::to_value(entity) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(EditError::Encode("entity is not a JSON object".to_string())),
        Err(e) => Err(EditError::Encode(e.to_string())),
    }
}

fn display(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Server copy, working copy and per-field messages of one entity form.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityDraft<T> {
    original: T,
    draft: T,
    pub field_errors: FieldErrors,
    uploads: BTreeMap<String, FileUpload>,
    mode: EditMode,
}

impl<T> EntityDraft<T> {
    pub fn original(&self) -> &T {
        &self.original
    }

    pub fn draft(&self) -> &T {
        &self.draft
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn uploads(&self) -> &BTreeMap<String, FileUpload> {
        &self.uploads
    }
}

impl<T> EntityDraft<T>
where
    T: Serialize + DeserializeOwned + Clone + PartialEq,
{
    /// A freshly loaded entity, shown read-only.
    pub fn new(entity: T) -> Self {
        Self {
            original: entity.clone(),
            draft: entity,
            field_errors: FieldErrors::new(),
            uploads: BTreeMap::new(),
            mode: EditMode::View,
        }
    }

    /// A new entity, editable straight away.
    pub fn blank(entity: T) -> Self {
        Self {
            mode: EditMode::Editing,
            ..Self::new(entity)
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.draft != self.original || !self.uploads.is_empty()
    }

    fn require(&self, mode: EditMode, action: &'static str) -> Result<(), EditError> {
        if self.mode == mode {
            Ok(())
        } else {
            Err(EditError::InvalidMode {
                action,
                mode: self.mode,
            })
        }
    }

    pub fn begin_edit(&mut self) -> Result<(), EditError> {
        self.require(EditMode::View, "edit")?;
        self.draft = self.original.clone();
        self.uploads.clear();
        self.field_errors.clear();
        self.mode = EditMode::Editing;
        Ok(())
    }

    /// Back to the server copy.
    pub fn discard(&mut self) -> Result<(), EditError> {
        self.require(EditMode::Editing, "cancel")?;
        self.draft = self.original.clone();
        self.uploads.clear();
        self.field_errors.clear();
        self.mode = EditMode::View;
        Ok(())
    }

    /// Stores `value` under the wire name `name`. Only that field's error is
    /// touched: cleared on success, replaced when the value does not fit.
    pub fn set_field(&mut self, name: &str, value: FieldValue) -> Result<(), EditError> {
        self.require(EditMode::Editing, "update a field")?;
        let mut object = to_object(&self.draft)?;
        if !object.contains_key(name) {
            return Err(EditError::UnknownField(name.to_string()));
        }

        if let FieldValue::File(file) = value {
            log::debug!("staged {} ({} bytes) for {}", file.file_name, file.bytes.len(), name);
            self.uploads.insert(name.to_string(), file);
            self.field_errors.remove(name);
            return Ok(());
        }

        object.insert(name.to_string(), value.into_json(name)?);
        match serde_json::from_value::<T>(Value::Object(object)) {
            Ok(draft) => {
                self.draft = draft;
                self.uploads.remove(name);
                self.field_errors.remove(name);
                Ok(())
            }
            Err(e) => {
                self.field_errors
                    .insert(name.to_string(), "Invalid value".to_string());
                Err(EditError::InvalidValue {
                    field: name.to_string(),
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Current draft value of `name` as form text; empty for unset fields.
    pub fn field_text(&self, name: &str) -> String {
        to_object(&self.draft)
            .ok()
            .and_then(|object| object.get(name).map(display))
            .unwrap_or_default()
    }

    pub fn field_bool(&self, name: &str) -> bool {
        to_object(&self.draft)
            .ok()
            .and_then(|object| object.get(name).and_then(Value::as_bool))
            .unwrap_or(false)
    }

    pub fn field_input(&self, name: &str) -> FieldInput {
        FieldInput {
            text: self.field_text(name),
            has_upload: self.uploads.contains_key(name),
        }
    }

    pub fn begin_save(&mut self) -> Result<(), EditError> {
        self.require(EditMode::Editing, "save")?;
        self.mode = EditMode::Saving;
        Ok(())
    }

    /// The save was rejected: keep every edit and return to `Editing`.
    pub fn fail_save(&mut self) {
        if self.mode == EditMode::Saving {
            self.mode = EditMode::Editing;
        }
    }

    /// Takes the server's copy after a save.
    pub fn accept(&mut self, server: T) {
        self.original = server.clone();
        self.draft = server;
        self.uploads.clear();
        self.field_errors.clear();
        self.mode = EditMode::View;
    }

    /// JSON for text-only drafts; multipart with one part per field once a
    /// file is staged. Null fields are left out of multipart bodies.
    pub fn to_body(&self) -> Result<RequestBody, EditError> {
        let object = to_object(&self.draft)?;
        if self.uploads.is_empty() {
            return Ok(RequestBody::Json(Value::Object(object)));
        }

        let mut parts: Vec<FormPart> = object
            .iter()
            .filter(|(name, value)| !value.is_null() && !self.uploads.contains_key(*name))
            .map(|(name, value)| FormPart::Text {
                name: name.clone(),
                value: display(value),
            })
            .collect();
        parts.extend(self.uploads.iter().map(|(name, file)| FormPart::File {
            name: name.clone(),
            file: file.clone(),
        }));
        Ok(RequestBody::Multipart(parts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::order::{Order, OrderStatus};
    use contracts::domain::vendor::{fields, Vendor};

    fn vendor() -> Vendor {
        Vendor {
            id: Some("v1".to_string()),
            business_name: "Acme Traders".to_string(),
            owner_name: "R. Rao".to_string(),
            email: "rao@acme.in".to_string(),
            ..Default::default()
        }
    }

    fn certificate() -> FileUpload {
        FileUpload {
            file_name: "gst.pdf".to_string(),
            mime_type: "application/pdf".to_string(),
            bytes: vec![1, 2, 3],
        }
    }

    #[test]
    fn test_set_field_requires_editing() {
        let mut draft = EntityDraft::new(vendor());
        let err = draft.set_field(fields::EMAIL, "x@y.in".into()).unwrap_err();
        assert_eq!(
            err,
            EditError::InvalidMode {
                action: "update a field",
                mode: EditMode::View
            }
        );
        assert_eq!(draft.draft(), draft.original());
    }

    #[test]
    fn test_set_field_and_discard() {
        let mut draft = EntityDraft::new(vendor());
        draft.begin_edit().unwrap();
        draft.set_field(fields::BUSINESS_NAME, "Acme Exports".into()).unwrap();
        assert_eq!(draft.draft().business_name, "Acme Exports");
        assert!(draft.is_dirty());

        draft.discard().unwrap();
        assert_eq!(draft.mode(), EditMode::View);
        assert_eq!(draft.draft().business_name, "Acme Traders");
        assert!(!draft.is_dirty());
    }

    #[test]
    fn test_begin_edit_starts_from_server_copy() {
        let mut draft = EntityDraft::new(vendor());
        draft.field_errors.insert("email".to_string(), "Email is required".to_string());
        draft.begin_edit().unwrap();
        assert_eq!(draft.mode(), EditMode::Editing);
        assert!(draft.field_errors.is_empty());
        assert_eq!(draft.draft(), draft.original());
        assert!(draft.uploads().is_empty());
    }

    #[test]
    fn test_accessors_need_no_serde() {
        #[derive(Debug, Clone, PartialEq)]
        struct Plain(u8);

        let draft = EntityDraft {
            original: Plain(1),
            draft: Plain(2),
            field_errors: FieldErrors::new(),
            uploads: BTreeMap::new(),
            mode: EditMode::Saving,
        };
        assert_eq!(draft.original(), &Plain(1));
        assert_eq!(draft.draft(), &Plain(2));
        assert_eq!(draft.mode(), EditMode::Saving);
    }

    #[test]
    fn test_unknown_and_mistyped_fields() {
        let mut draft = EntityDraft::new(vendor());
        draft.begin_edit().unwrap();
        assert_eq!(
            draft.set_field("nickname", "x".into()),
            Err(EditError::UnknownField("nickname".to_string()))
        );

        let err = draft.set_field(fields::STATUS, "Dormant".into()).unwrap_err();
        assert!(matches!(err, EditError::InvalidValue { ref field, .. } if field == "status"));
        assert!(draft.field_errors.contains_key("status"));
        assert_eq!(draft.draft(), draft.original());

        draft.set_field(fields::STATUS, "Approved".into()).unwrap();
        assert!(draft.field_errors.is_empty());
    }

    #[test]
    fn test_numbers_fit_numeric_fields() {
        let order = Order {
            id: "o1".to_string(),
            order_number: "ORD-1".to_string(),
            customer_name: "Asha".to_string(),
            vendor_name: Some("Acme".to_string()),
            total_amount: 10.5,
            status: OrderStatus::Pending,
            created_at: None,
        };
        let mut draft = EntityDraft::new(order);
        draft.begin_edit().unwrap();
        draft.set_field("totalAmount", 12.0.into()).unwrap();
        assert_eq!(draft.draft().total_amount, 12.0);
        assert!(draft.set_field("totalAmount", f64::NAN.into()).is_err());
        assert_eq!(draft.field_text("totalAmount"), "12.0");
    }

    #[test]
    fn test_json_body_without_uploads() {
        let draft = EntityDraft::new(vendor());
        match draft.to_body().unwrap() {
            RequestBody::Json(value) => {
                assert_eq!(value["businessName"], "Acme Traders");
                assert_eq!(value["_id"], "v1");
            }
            other => panic!("expected JSON body, got {:?}", other),
        }
    }

    #[test]
    fn test_multipart_body_with_upload() {
        let mut draft = EntityDraft::new(vendor());
        draft.begin_edit().unwrap();
        draft
            .set_field(fields::GST_CERTIFICATE, certificate().into())
            .unwrap();
        assert!(draft.is_dirty());
        assert!(draft.field_input(fields::GST_CERTIFICATE).has_upload);

        let RequestBody::Multipart(parts) = draft.to_body().unwrap() else {
            panic!("expected multipart body");
        };
        let names: Vec<&str> = parts
            .iter()
            .map(|part| match part {
                FormPart::Text { name, .. } | FormPart::File { name, .. } => name.as_str(),
            })
            .collect();
        assert_eq!(names.iter().filter(|n| **n == "gstCertificate").count(), 1);
        assert!(!names.contains(&"panCard"));
        assert!(parts.contains(&FormPart::Text {
            name: "status".to_string(),
            value: "Pending".to_string()
        }));
        assert!(parts.contains(&FormPart::File {
            name: "gstCertificate".to_string(),
            file: certificate()
        }));

        draft.set_field(fields::GST_CERTIFICATE, FieldValue::Null).unwrap();
        assert!(draft.uploads().is_empty());
    }

    #[test]
    fn test_accept_replaces_original() {
        let mut draft = EntityDraft::new(vendor());
        draft.begin_edit().unwrap();
        draft.set_field(fields::PHONE, "9876543210".into()).unwrap();
        draft.begin_save().unwrap();

        let mut server = vendor();
        server.phone = "9876543210".to_string();
        server.gst_certificate = Some("/uploads/gst.pdf".to_string());
        draft.accept(server.clone());
        assert_eq!(draft.original(), &server);
        assert_eq!(draft.draft(), &server);
        assert_eq!(draft.mode(), EditMode::View);
    }
}
