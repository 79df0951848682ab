//! Entity Detail/Edit Controller
//!
//! Loads one record, walks it through `View -> Editing -> Saving` and back,
//! and writes the server's answer into the draft after a save. Loads and
//! saves share one sequence counter so a late answer for an entity the
//! screen has moved away from is dropped.

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::draft::{EditError, EditMode, EntityDraft, FieldValue};
use super::schema::Schema;
use crate::shared::api::client::entity_path;
use crate::shared::api::{ApiClient, ApiError, Method, RequestBody};

#[derive(Debug, Clone, PartialEq)]
pub enum DetailStatus<T> {
    Idle,
    Loading,
    Ready(EntityDraft<T>),
    LoadFailed(ApiError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailSnapshot<T> {
    pub status: DetailStatus<T>,
    /// Last rejected save, shown above the form while editing continues.
    pub error: Option<ApiError>,
    pub is_new: bool,
}

impl<T> DetailSnapshot<T> {
    pub fn entity(&self) -> Option<&EntityDraft<T>> {
        match &self.status {
            DetailStatus::Ready(draft) => Some(draft),
            _ => None,
        }
    }

    pub fn mode(&self) -> Option<EditMode> {
        self.entity().map(|d| d.mode())
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, DetailStatus::Loading)
    }

    pub fn load_error(&self) -> Option<&ApiError> {
        match &self.status {
            DetailStatus::LoadFailed(err) => Some(err),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    Saved,
    /// Validation failed; nothing was sent.
    Invalid,
    Failed(ApiError),
}

#[derive(Debug, Clone)]
pub struct EntityConfig {
    pub endpoint: String,
    pub schema: Schema,
}

impl EntityConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            schema: Schema::new(),
        }
    }

    pub fn schema(mut self, schema: Schema) -> Self {
        self.schema = schema;
        self
    }
}

/// Server-assigned id of a saved entity (`_id`, or `id` as a fallback).
fn entity_id<T: Serialize>(entity: &T) -> Option<String> {
    let value = serde_json::to_value(entity).ok()?;
    ["_id", "id"]
        .iter()
        .find_map(|key| match value.get(*key) {
            Some(Value::String(id)) if !id.is_empty() => Some(id.clone()),
            Some(Value::Number(id)) => Some(id.to_string()),
            _ => None,
        })
}

type Listener<T> = Rc<dyn Fn(&DetailSnapshot<T>)>;

struct Inner<T> {
    status: DetailStatus<T>,
    error: Option<ApiError>,
    /// `None` while creating.
    id: Option<String>,
    seq: u64,
    disposed: bool,
    listeners: Vec<Listener<T>>,
}

impl<T: Clone> Inner<T> {
    fn snapshot(&self) -> DetailSnapshot<T> {
        DetailSnapshot {
            status: self.status.clone(),
            error: self.error.clone(),
            is_new: self.id.is_none() && matches!(self.status, DetailStatus::Ready(_)),
        }
    }
}

struct SavePlan {
    ticket: u64,
    method: Method,
    path: String,
    body: RequestBody,
    id: Option<String>,
}

pub struct EntityDetailController<T> {
    inner: Rc<RefCell<Inner<T>>>,
    client: ApiClient,
    config: Rc<EntityConfig>,
}

impl<T> Clone for EntityDetailController<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
            client: self.client.clone(),
            config: Rc::clone(&self.config),
        }
    }
}

impl<T> EntityDetailController<T>
where
    T: Serialize + DeserializeOwned + Clone + PartialEq + 'static,
{
    pub fn new(config: EntityConfig, client: ApiClient) -> Self {
        let inner = Inner {
            status: DetailStatus::Idle,
            error: None,
            id: None,
            seq: 0,
            disposed: false,
            listeners: Vec::new(),
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
            client,
            config: Rc::new(config),
        }
    }

    pub fn config(&self) -> &EntityConfig {
        &self.config
    }

    pub fn snapshot(&self) -> DetailSnapshot<T> {
        self.inner.borrow().snapshot()
    }

    pub fn subscribe(&self, listener: impl Fn(&DetailSnapshot<T>) + 'static) {
        self.inner.borrow_mut().listeners.push(Rc::new(listener));
    }

    fn notify(&self) {
        let (snapshot, listeners) = {
            let inner = self.inner.borrow();
            if inner.disposed {
                return;
            }
            (inner.snapshot(), inner.listeners.clone())
        };
        for listener in listeners {
            listener(&snapshot);
        }
    }

    /// Runs `change` on the loaded draft and publishes the result. State is
    /// published even when `change` fails, since a rejected value still
    /// records a field error.
    fn with_draft<R>(
        &self,
        change: impl FnOnce(&mut EntityDraft<T>) -> Result<R, EditError>,
    ) -> Result<R, EditError> {
        let result = match &mut self.inner.borrow_mut().status {
            DetailStatus::Ready(draft) => change(draft),
            _ => return Err(EditError::NotLoaded),
        };
        self.notify();
        result
    }

    pub fn load(&self, id: impl Into<String>) -> impl Future<Output = ()> + 'static {
        let id = id.into();
        let ticket = {
            let mut inner = self.inner.borrow_mut();
            inner.seq += 1;
            inner.id = Some(id.clone());
            inner.status = DetailStatus::Loading;
            inner.error = None;
            inner.seq
        };
        log::debug!("{} load {} #{}", self.config.endpoint, id, ticket);
        self.notify();

        let this = self.clone();
        async move {
            let result = this.client.get_one::<T>(&this.config.endpoint, &id).await;
            this.apply_load(ticket, result);
        }
    }

    fn apply_load(&self, ticket: u64, result: Result<T, ApiError>) {
        let mut escalate = false;
        {
            let mut inner = self.inner.borrow_mut();
            if inner.disposed || inner.seq != ticket {
                log::debug!("{} discarding superseded load #{}", self.config.endpoint, ticket);
                return;
            }
            inner.status = match result {
                Ok(entity) => DetailStatus::Ready(EntityDraft::new(entity)),
                Err(err) => {
                    log::warn!("{} load failed: {}", self.config.endpoint, err);
                    escalate = err.is_auth();
                    DetailStatus::LoadFailed(err)
                }
            };
        }

        if escalate {
            self.client.session().unauthorized();
        }
        self.notify();
    }

    /// Loads the current id again; does nothing for an unsaved new entity.
    pub fn reload(&self) -> impl Future<Output = ()> + 'static {
        let id = self.inner.borrow().id.clone();
        let pending = id.map(|id| self.load(id));
        async move {
            if let Some(pending) = pending {
                pending.await;
            }
        }
    }

    /// Starts a new entity in `Editing`; its first save POSTs to the
    /// collection endpoint.
    pub fn create(&self, blank: T) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.seq += 1;
            inner.id = None;
            inner.error = None;
            inner.status = DetailStatus::Ready(EntityDraft::blank(blank));
        }
        log::debug!("{} create", self.config.endpoint);
        self.notify();
    }

    pub fn edit(&self) -> Result<(), EditError> {
        self.with_draft(EntityDraft::begin_edit)
    }

    pub fn update_field(&self, name: &str, value: impl Into<FieldValue>) -> Result<(), EditError> {
        let value = value.into();
        self.with_draft(|draft| draft.set_field(name, value))
    }

    /// Runs the schema against the draft and stores the field errors.
    /// Returns whether the draft is valid.
    pub fn validate(&self) -> Result<bool, EditError> {
        let schema = &self.config.schema;
        self.with_draft(|draft| {
            draft.field_errors = schema.validate(|name| draft.field_input(name));
            Ok(draft.field_errors.is_empty())
        })
    }

    pub fn cancel(&self) -> Result<(), EditError> {
        self.with_draft(EntityDraft::discard)?;
        if self.inner.borrow_mut().error.take().is_some() {
            self.notify();
        }
        Ok(())
    }

    /// Validates, then sends the draft: PUT `endpoint/{id}` for a loaded
    /// entity, POST `endpoint` for a new one. Errors only for a save
    /// attempted outside `Editing`.
    pub fn save(&self) -> Result<impl Future<Output = SaveOutcome> + 'static, EditError> {
        let plan = self.begin_save()?;
        let this = self.clone();
        Ok(async move {
            match plan {
                Some(plan) => this.run_save(plan).await,
                None => SaveOutcome::Invalid,
            }
        })
    }

    fn begin_save(&self) -> Result<Option<SavePlan>, EditError> {
        let plan = {
            let mut guard = self.inner.borrow_mut();
            let inner = &mut *guard;
            let id = inner.id.clone();
            let DetailStatus::Ready(draft) = &mut inner.status else {
                return Err(EditError::NotLoaded);
            };
            if draft.mode() != EditMode::Editing {
                return Err(EditError::InvalidMode {
                    action: "save",
                    mode: draft.mode(),
                });
            }

            draft.field_errors = self.config.schema.validate(|name| draft.field_input(name));
            if draft.field_errors.is_empty() {
                let body = draft.to_body()?;
                draft.begin_save()?;
                let (method, path) = match &id {
                    Some(id) => (Method::Put, entity_path(&self.config.endpoint, id)),
                    None => (Method::Post, self.config.endpoint.clone()),
                };
                inner.error = None;
                inner.seq += 1;
                Some(SavePlan {
                    ticket: inner.seq,
                    method,
                    path,
                    body,
                    id,
                })
            } else {
                log::debug!(
                    "{} save blocked by {} invalid field(s)",
                    self.config.endpoint,
                    draft.field_errors.len()
                );
                None
            }
        };
        self.notify();
        Ok(plan)
    }

    async fn run_save(&self, plan: SavePlan) -> SaveOutcome {
        let result = match self
            .client
            .submit::<T>(plan.method, plan.path, plan.body)
            .await
        {
            // Accepted without a body: read the stored copy back.
            Ok(None) => match &plan.id {
                Some(id) => self
                    .client
                    .get_one::<T>(&self.config.endpoint, id)
                    .await
                    .map(Some),
                None => Ok(None),
            },
            other => other,
        };
        self.finish_save(plan.ticket, result)
    }

    fn finish_save(&self, ticket: u64, result: Result<Option<T>, ApiError>) -> SaveOutcome {
        let outcome = match &result {
            Ok(_) => SaveOutcome::Saved,
            Err(err) => SaveOutcome::Failed(err.clone()),
        };

        let mut escalate = false;
        {
            let mut guard = self.inner.borrow_mut();
            let inner = &mut *guard;
            if inner.disposed || inner.seq != ticket {
                log::debug!("{} discarding superseded save #{}", self.config.endpoint, ticket);
                return outcome;
            }
            match result {
                Ok(Some(entity)) => {
                    log::debug!("{} saved", self.config.endpoint);
                    if inner.id.is_none() {
                        inner.id = entity_id(&entity);
                    }
                    if let DetailStatus::Ready(draft) = &mut inner.status {
                        draft.accept(entity);
                    }
                }
                Ok(None) => {
                    log::debug!("{} created, server returned no entity", self.config.endpoint);
                    inner.status = DetailStatus::Idle;
                }
                Err(err) => {
                    log::warn!("{} save failed: {}", self.config.endpoint, err);
                    escalate = err.is_auth();
                    if let DetailStatus::Ready(draft) = &mut inner.status {
                        draft.fail_save();
                    }
                    inner.error = Some(err);
                }
            }
        }

        if escalate {
            self.client.session().unauthorized();
        }
        self.notify();
        outcome
    }

    pub fn dispose(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.disposed = true;
        inner.listeners.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api::{ErrorKind, FileUpload, FormPart};
    use crate::shared::entity_edit::schema::Rule;
    use crate::shared::testing::{client_with, FakeTransport, Scripted, SessionProbe};
    use contracts::domain::bank::Bank;
    use contracts::domain::category::{fields, Category};
    use contracts::domain::vendor::{self, Vendor};
    use serde_json::json;

    fn category_body(name: &str, description: &str) -> String {
        json!({ "_id": "c1", "name": name, "description": description, "isActive": true })
            .to_string()
    }

    fn category_schema() -> Schema {
        Schema::new()
            .field(fields::NAME, "Name", [Rule::Required, Rule::MaxLength(40)])
            .field(fields::DESCRIPTION, "Description", [Rule::MinLength(3)])
    }

    fn controller(
        transport: &Rc<FakeTransport>,
    ) -> (EntityDetailController<Category>, SessionProbe) {
        let (client, probe) = client_with(transport);
        let config = EntityConfig::new("/api/categories").schema(category_schema());
        (EntityDetailController::new(config, client), probe)
    }

    async fn editing(transport: &Rc<FakeTransport>) -> (EntityDetailController<Category>, SessionProbe) {
        let (ctl, probe) = controller(transport);
        ctl.load("c1").await;
        ctl.edit().unwrap();
        (ctl, probe)
    }

    fn draft_name(ctl: &EntityDetailController<Category>) -> String {
        ctl.snapshot()
            .entity()
            .map(|d| d.draft().name.clone())
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn test_load_shows_entity_read_only() {
        let transport = FakeTransport::new(|_| Scripted::json(200, category_body("Toys", "Fun")));
        let (ctl, _) = controller(&transport);
        ctl.load("c1").await;

        let snapshot = ctl.snapshot();
        let draft = snapshot.entity().unwrap();
        assert_eq!(draft.mode(), EditMode::View);
        assert_eq!(draft.original(), draft.draft());
        assert!(!snapshot.is_new);
        assert_eq!(transport.last_request().unwrap().path, "/api/categories/c1");
    }

    #[tokio::test]
    async fn test_load_unauthorized_escalates_once() {
        let transport = FakeTransport::new(|_| Scripted::json(401, r#"{"message":"jwt expired"}"#));
        let (ctl, probe) = controller(&transport);
        ctl.load("abc").await;

        let snapshot = ctl.snapshot();
        assert_eq!(snapshot.load_error().map(|e| e.kind), Some(ErrorKind::Auth));
        assert!(snapshot.entity().is_none());
        assert_eq!(probe.unauthorized_calls(), 1);
        assert_eq!(transport.last_request().unwrap().path, "/api/categories/abc");
    }

    #[tokio::test]
    async fn test_load_failure_is_retryable() {
        let transport = FakeTransport::new(|_| Scripted::unreachable());
        let (ctl, probe) = controller(&transport);
        ctl.load("c1").await;
        assert_eq!(ctl.snapshot().load_error().map(|e| e.kind), Some(ErrorKind::Network));
        assert_eq!(probe.unauthorized_calls(), 0);

        transport.respond_with(|_| Scripted::json(200, category_body("Toys", "Fun")));
        ctl.reload().await;
        assert_eq!(draft_name(&ctl), "Toys");
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_load_is_dropped() {
        let transport = FakeTransport::new(|request| {
            if request.path.ends_with("/slow") {
                Scripted::json(200, category_body("Slow", "late")).after(200)
            } else {
                Scripted::json(200, category_body("Fast", "first")).after(10)
            }
        });
        let (ctl, _) = controller(&transport);
        tokio::join!(ctl.load("slow"), ctl.load("fast"));
        assert_eq!(draft_name(&ctl), "Fast");
    }

    #[tokio::test]
    async fn test_cancel_discards_draft() {
        let transport = FakeTransport::new(|_| Scripted::json(200, category_body("Toys", "Fun")));
        let (ctl, _) = editing(&transport).await;
        ctl.update_field(fields::NAME, "Games").unwrap();
        assert_eq!(draft_name(&ctl), "Games");

        ctl.cancel().unwrap();
        let snapshot = ctl.snapshot();
        let draft = snapshot.entity().unwrap();
        assert_eq!(draft.mode(), EditMode::View);
        assert_eq!(draft.draft(), draft.original());
        assert_eq!(draft.draft().name, "Toys");
    }

    #[tokio::test]
    async fn test_transitions_outside_their_mode_are_rejected() {
        let transport = FakeTransport::new(|_| Scripted::json(200, category_body("Toys", "Fun")));
        let (ctl, _) = controller(&transport);
        assert_eq!(ctl.edit(), Err(EditError::NotLoaded));

        ctl.load("c1").await;
        let before = ctl.snapshot();
        assert!(matches!(
            ctl.update_field(fields::NAME, "X"),
            Err(EditError::InvalidMode { mode: EditMode::View, .. })
        ));
        assert!(matches!(ctl.cancel(), Err(EditError::InvalidMode { .. })));
        assert!(ctl.save().is_err());
        assert_eq!(ctl.snapshot(), before);

        ctl.edit().unwrap();
        assert!(matches!(ctl.edit(), Err(EditError::InvalidMode { .. })));
        assert_eq!(
            ctl.update_field("colour", "red"),
            Err(EditError::UnknownField("colour".to_string()))
        );
    }

    #[tokio::test]
    async fn test_edit_drops_errors_found_while_viewing() {
        let transport = FakeTransport::new(|_| Scripted::json(200, category_body("", "Fun")));
        let (ctl, _) = controller(&transport);
        ctl.load("c1").await;
        assert_eq!(ctl.validate(), Ok(false));
        assert!(!ctl.snapshot().entity().unwrap().field_errors.is_empty());

        ctl.edit().unwrap();
        let snapshot = ctl.snapshot();
        let draft = snapshot.entity().unwrap();
        assert_eq!(draft.mode(), EditMode::Editing);
        assert!(draft.field_errors.is_empty());
        assert_eq!(draft.draft(), draft.original());
    }

    #[tokio::test]
    async fn test_update_field_clears_only_its_error() {
        let transport = FakeTransport::new(|_| Scripted::json(200, category_body("Toys", "Fun")));
        let (ctl, _) = editing(&transport).await;
        ctl.update_field(fields::NAME, "").unwrap();
        ctl.update_field(fields::DESCRIPTION, "ab").unwrap();
        assert_eq!(ctl.validate(), Ok(false));

        ctl.update_field(fields::NAME, "Games").unwrap();
        let snapshot = ctl.snapshot();
        let errors = &snapshot.entity().unwrap().field_errors;
        assert!(!errors.contains_key(fields::NAME));
        assert!(errors.contains_key(fields::DESCRIPTION));

        assert!(ctl.update_field(fields::IS_ACTIVE, "yes").is_err());
        assert!(ctl.snapshot().entity().unwrap().field_errors.contains_key(fields::IS_ACTIVE));
    }

    #[tokio::test]
    async fn test_invalid_save_sends_nothing() {
        let transport = FakeTransport::new(|_| Scripted::json(200, category_body("Toys", "Fun")));
        let (ctl, _) = editing(&transport).await;
        ctl.update_field(fields::NAME, "   ").unwrap();

        let outcome = ctl.save().unwrap().await;
        assert_eq!(outcome, SaveOutcome::Invalid);
        assert_eq!(transport.request_count(), 1);
        let snapshot = ctl.snapshot();
        let draft = snapshot.entity().unwrap();
        assert_eq!(draft.mode(), EditMode::Editing);
        assert_eq!(draft.field_errors[fields::NAME], "Name is required");
    }

    #[tokio::test]
    async fn test_save_failure_keeps_draft() {
        let transport = FakeTransport::new(|_| Scripted::json(200, category_body("Toys", "Fun")));
        let (ctl, probe) = editing(&transport).await;
        ctl.update_field(fields::NAME, "Games").unwrap();

        transport.respond_with(|_| Scripted::json(500, r#"{"message":"duplicate name"}"#));
        let pending = ctl.save().unwrap();
        assert_eq!(ctl.snapshot().mode(), Some(EditMode::Saving));

        let outcome = pending.await;
        assert!(matches!(outcome, SaveOutcome::Failed(ref e) if e.kind == ErrorKind::Server));
        let snapshot = ctl.snapshot();
        assert_eq!(snapshot.mode(), Some(EditMode::Editing));
        assert_eq!(draft_name(&ctl), "Games");
        assert_eq!(snapshot.error.as_ref().map(|e| e.message.as_str()), Some("duplicate name"));
        assert_eq!(probe.unauthorized_calls(), 0);
    }

    #[tokio::test]
    async fn test_save_takes_server_copy() {
        let transport = FakeTransport::new(|_| Scripted::json(200, category_body("Toys", "Fun")));
        let (ctl, _) = editing(&transport).await;
        ctl.update_field(fields::NAME, "games").unwrap();

        // The server normalizes the name.
        transport.respond_with(|_| Scripted::json(200, category_body("Games", "Fun")));
        assert_eq!(ctl.save().unwrap().await, SaveOutcome::Saved);

        let request = transport.last_request().unwrap();
        assert_eq!(request.method, Method::Put);
        assert_eq!(request.path, "/api/categories/c1");
        match request.body {
            RequestBody::Json(body) => assert_eq!(body["name"], "games"),
            other => panic!("expected JSON body, got {:?}", other),
        }

        let snapshot = ctl.snapshot();
        let draft = snapshot.entity().unwrap();
        assert_eq!(draft.mode(), EditMode::View);
        assert_eq!(draft.original().name, "Games");
        assert_eq!(draft.draft(), draft.original());
        assert!(snapshot.error.is_none());
    }

    #[tokio::test]
    async fn test_empty_update_response_reloads() {
        let transport = FakeTransport::new(|_| Scripted::json(200, category_body("Toys", "Fun")));
        let (ctl, _) = editing(&transport).await;
        ctl.update_field(fields::DESCRIPTION, "Board games").unwrap();

        transport.respond_with(|request| match request.method {
            Method::Put => Scripted::json(204, ""),
            _ => Scripted::json(200, category_body("Toys", "Board games")),
        });
        assert_eq!(ctl.save().unwrap().await, SaveOutcome::Saved);

        let methods: Vec<Method> = transport.requests().iter().map(|r| r.method).collect();
        assert_eq!(methods, vec![Method::Get, Method::Put, Method::Get]);
        let snapshot = ctl.snapshot();
        assert_eq!(snapshot.entity().unwrap().original().description, "Board games");
    }

    #[tokio::test]
    async fn test_create_posts_to_collection() {
        let transport = FakeTransport::new(|_| {
            Scripted::json(
                201,
                r#"{"data":{"_id":"b9","bankName":"Canara Bank","branch":"MG Road","ifscCode":"CNRB0000001","isActive":true}}"#,
            )
        });
        let (client, _) = client_with(&transport);
        let ctl: EntityDetailController<Bank> =
            EntityDetailController::new(EntityConfig::new("/api/banks"), client);

        ctl.create(Bank::default());
        assert!(ctl.snapshot().is_new);
        assert_eq!(ctl.snapshot().mode(), Some(EditMode::Editing));
        ctl.update_field("bankName", "Canara Bank").unwrap();
        ctl.update_field("ifscCode", "CNRB0000001").unwrap();

        assert_eq!(ctl.save().unwrap().await, SaveOutcome::Saved);
        let request = transport.last_request().unwrap();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.path, "/api/banks");

        let snapshot = ctl.snapshot();
        assert!(!snapshot.is_new);
        assert_eq!(snapshot.entity().unwrap().original().id.as_deref(), Some("b9"));

        ctl.reload().await;
        assert_eq!(transport.last_request().unwrap().path, "/api/banks/b9");
    }

    #[tokio::test]
    async fn test_staged_file_is_sent_as_multipart() {
        let transport = FakeTransport::new(|_| {
            Scripted::json(
                200,
                r#"{"_id":"v1","businessName":"Acme","ownerName":"Rao","email":"rao@acme.in","gstCertificate":"/uploads/gst.pdf"}"#,
            )
        });
        let (client, _) = client_with(&transport);
        let schema = Schema::new().field(vendor::fields::GST_CERTIFICATE, "GST certificate", [Rule::Required]);
        let ctl: EntityDetailController<Vendor> =
            EntityDetailController::new(EntityConfig::new("/api/vendors").schema(schema), client);
        ctl.load("v1").await;
        ctl.edit().unwrap();

        let upload = FileUpload {
            file_name: "gst.pdf".to_string(),
            mime_type: "application/pdf".to_string(),
            bytes: b"%PDF".to_vec(),
        };
        ctl.update_field(vendor::fields::GST_CERTIFICATE, upload.clone())
            .unwrap();
        assert_eq!(ctl.save().unwrap().await, SaveOutcome::Saved);

        let RequestBody::Multipart(parts) = transport.last_request().unwrap().body else {
            panic!("expected multipart body");
        };
        assert!(parts.contains(&FormPart::File {
            name: "gstCertificate".to_string(),
            file: upload,
        }));
        assert!(parts.contains(&FormPart::Text {
            name: "businessName".to_string(),
            value: "Acme".to_string(),
        }));

        let snapshot = ctl.snapshot();
        assert!(snapshot.entity().unwrap().uploads().is_empty());
        assert_eq!(
            snapshot.entity().unwrap().original().gst_certificate.as_deref(),
            Some("/uploads/gst.pdf")
        );
    }

    #[tokio::test]
    async fn test_dispose_ignores_late_load() {
        let transport = FakeTransport::new(|_| Scripted::json(200, category_body("Toys", "Fun")));
        let (ctl, _) = controller(&transport);
        let pending = ctl.load("c1");
        ctl.dispose();
        pending.await;
        assert!(ctl.snapshot().is_loading());
    }
}
