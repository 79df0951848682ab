use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::controller::{DetailSnapshot, EntityConfig, EntityDetailController, SaveOutcome};
use super::draft::{EditError, EditMode, FieldValue};
use crate::shared::api::gloo::GlooTransport;
use crate::shared::api::{ApiClient, FileUpload};
use crate::system::auth::session::use_session;

/// Reactive handle over an [`EntityDetailController`] owned by the current
/// component.
pub struct EntityDetailHandle<T: 'static> {
    pub snapshot: RwSignal<DetailSnapshot<T>>,
    controller: StoredValue<EntityDetailController<T>, LocalStorage>,
}

impl<T: 'static> Clone for EntityDetailHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for EntityDetailHandle<T> {}

impl<T> EntityDetailHandle<T>
where
    T: Serialize + DeserializeOwned + Clone + PartialEq + Send + Sync + 'static,
{
    fn call<R>(
        &self,
        action: impl FnOnce(&EntityDetailController<T>) -> Result<R, EditError>,
    ) -> Result<R, EditError> {
        self.controller
            .try_with_value(action)
            .unwrap_or(Err(EditError::NotLoaded))
    }

    pub fn load(&self, id: String) {
        if let Some(pending) = self.controller.try_with_value(|c| c.load(id)) {
            spawn_local(pending);
        }
    }

    pub fn reload(&self) {
        if let Some(pending) = self.controller.try_with_value(|c| c.reload()) {
            spawn_local(pending);
        }
    }

    pub fn create(&self, blank: T) {
        self.controller.try_with_value(|c| c.create(blank));
    }

    pub fn edit(&self) {
        if let Err(e) = self.call(|c| c.edit()) {
            log::warn!("{}", e);
        }
    }

    /// Field errors land in the snapshot; the returned error is only for
    /// callers that want to react to it.
    pub fn update_field(&self, name: &str, value: impl Into<FieldValue>) -> Result<(), EditError> {
        let value = value.into();
        self.call(|c| c.update_field(name, value))
    }

    pub fn cancel(&self) {
        if let Err(e) = self.call(|c| c.cancel()) {
            log::warn!("{}", e);
        }
    }

    /// Draft value of `name` as form text.
    pub fn field_text(&self, name: &'static str) -> Signal<String> {
        let snapshot = self.snapshot;
        Signal::derive(move || {
            snapshot.with(|s| s.entity().map(|d| d.field_text(name)).unwrap_or_default())
        })
    }

    pub fn field_bool(&self, name: &'static str) -> Signal<bool> {
        let snapshot = self.snapshot;
        Signal::derive(move || snapshot.with(|s| s.entity().is_some_and(|d| d.field_bool(name))))
    }

    pub fn field_error(&self, name: &'static str) -> Signal<Option<String>> {
        let snapshot = self.snapshot;
        Signal::derive(move || {
            snapshot.with(|s| s.entity().and_then(|d| d.field_errors.get(name).cloned()))
        })
    }

    /// Name of the staged file, else the stored value (usually a URL).
    pub fn upload_label(&self, name: &'static str) -> Signal<Option<String>> {
        let snapshot = self.snapshot;
        Signal::derive(move || {
            snapshot.with(|s| {
                let draft = s.entity()?;
                match draft.uploads().get(name) {
                    Some(file) => Some(file.file_name.clone()),
                    None => Some(draft.field_text(name)).filter(|text| !text.is_empty()),
                }
            })
        })
    }

    /// True unless the form is in editing mode.
    pub fn read_only(&self) -> Signal<bool> {
        let snapshot = self.snapshot;
        Signal::derive(move || snapshot.with(|s| s.mode() != Some(EditMode::Editing)))
    }

    pub fn text_input(&self, name: &'static str) -> Callback<String> {
        let handle = *self;
        Callback::new(move |text: String| {
            let _ = handle.update_field(name, text);
        })
    }

    pub fn bool_input(&self, name: &'static str) -> Callback<bool> {
        let handle = *self;
        Callback::new(move |value: bool| {
            let _ = handle.update_field(name, value);
        })
    }

    pub fn file_input(&self, name: &'static str) -> Callback<FileUpload> {
        let handle = *self;
        Callback::new(move |file: FileUpload| {
            let _ = handle.update_field(name, file);
        })
    }

    /// Starts a save; `on_done` receives the outcome once the server answers.
    pub fn save(&self, on_done: impl FnOnce(SaveOutcome) + 'static) {
        match self.call(|c| c.save()) {
            Ok(pending) => spawn_local(async move { on_done(pending.await) }),
            Err(e) => log::warn!("{}", e),
        }
    }
}

/// Creates the detail controller for a form and disposes it when the form
/// unmounts. Nothing is loaded until `load` or `create` is called.
pub fn use_entity_detail<T>(config: EntityConfig) -> EntityDetailHandle<T>
where
    T: Serialize + DeserializeOwned + Clone + PartialEq + Send + Sync + 'static,
{
    let client = ApiClient::new(Rc::new(GlooTransport), use_session());
    let controller = EntityDetailController::new(config, client);

    let snapshot = RwSignal::new(controller.snapshot());
    controller.subscribe(move |s| {
        let _ = snapshot.try_set(s.clone());
    });

    let handle = EntityDetailHandle {
        snapshot,
        controller: StoredValue::new_local(controller),
    };

    on_cleanup(move || {
        handle.controller.try_with_value(|c| c.dispose());
    });

    handle
}
