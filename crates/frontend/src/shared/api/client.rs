//! Session-aware request helpers shared by both controllers.

use std::rc::Rc;

use contracts::shared::list::ListEnvelope;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ApiError;
use super::session::SessionContext;
use super::transport::{ApiRequest, Method, RequestBody, Transport};

/// `endpoint/{id}` with the id percent-encoded.
pub fn entity_path(endpoint: &str, id: &str) -> String {
    format!(
        "{}/{}",
        endpoint.trim_end_matches('/'),
        urlencoding::encode(id)
    )
}

/// Decodes a single entity, accepting either the bare object or the
/// `{ "data": {...} }` wrapper some endpoints use.
pub fn decode_entity<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| ApiError::server(format!("Failed to parse response: {}", e)))?;
    let value = match value {
        Value::Object(mut map) if matches!(map.get("data"), Some(Value::Object(_))) => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    };
    serde_json::from_value(value)
        .map_err(|e| ApiError::server(format!("Unexpected entity shape: {}", e)))
}

#[derive(Clone)]
pub struct ApiClient {
    transport: Rc<dyn Transport>,
    session: SessionContext,
}

impl ApiClient {
    pub fn new(transport: Rc<dyn Transport>, session: SessionContext) -> Self {
        Self { transport, session }
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Sends an authenticated request and returns the body of a 2xx answer.
    pub async fn send(&self, mut request: ApiRequest) -> Result<String, ApiError> {
        let token = self
            .session
            .token()
            .ok_or_else(|| ApiError::auth("Not authenticated"))?;
        request.bearer = Some(token);

        log::debug!("{:?} {} {:?}", request.method, request.path, request.query);
        let response = self
            .transport
            .send(request)
            .await
            .map_err(|e| ApiError::network(e.to_string()))?;

        if !response.is_success() {
            return Err(ApiError::from_status(response.status, &response.body));
        }
        Ok(response.body)
    }

    pub async fn get_list(
        &self,
        endpoint: &str,
        params: Vec<(String, String)>,
    ) -> Result<ListEnvelope, ApiError> {
        let mut request = ApiRequest::new(Method::Get, endpoint);
        request.query = params;
        let body = self.send(request).await?;
        ListEnvelope::parse(&body).map_err(|e| ApiError::server(e.to_string()))
    }

    pub async fn get_one<T: DeserializeOwned>(&self, endpoint: &str, id: &str) -> Result<T, ApiError> {
        let body = self
            .send(ApiRequest::new(Method::Get, entity_path(endpoint, id)))
            .await?;
        decode_entity(&body)
    }

    /// Sends a create/update body. `Ok(None)` means the server accepted the
    /// change but returned no entity.
    pub async fn submit<T: DeserializeOwned>(
        &self,
        method: Method,
        path: String,
        body: RequestBody,
    ) -> Result<Option<T>, ApiError> {
        let mut request = ApiRequest::new(method, path);
        request.body = body;
        let body = self.send(request).await?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        decode_entity(&body).map(Some)
    }
}
