//! Browser transport over `gloo-net`.

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, FormData};

use super::transport::{
    ApiRequest, ApiResponse, FileUpload, FormPart, Method, RequestBody, Transport,
    TransportError,
};
use crate::shared::api_utils::api_url;

#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTransport;

fn js_error(context: &str, value: JsValue) -> TransportError {
    TransportError(format!("{}: {:?}", context, value))
}

fn builder_for(request: &ApiRequest) -> RequestBuilder {
    let url = api_url(&request.path);
    let mut builder = match request.method {
        Method::Get => Request::get(&url),
        Method::Post => Request::post(&url),
        Method::Put => Request::put(&url),
        Method::Delete => Request::delete(&url),
    };

    if !request.query.is_empty() {
        builder = builder.query(
            request
                .query
                .iter()
                .map(|(key, value)| (key.as_str(), value.as_str())),
        );
    }

    if let Some(token) = &request.bearer {
        builder = builder.header("Authorization", &format!("Bearer {}", token));
    }

    builder
}

fn blob_from(file: &FileUpload) -> Result<Blob, TransportError> {
    let bytes = js_sys::Uint8Array::from(file.bytes.as_slice());
    let parts = js_sys::Array::of1(&bytes);
    let options = BlobPropertyBag::new();
    options.set_type(&file.mime_type);
    Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|e| js_error("Failed to build file blob", e))
}

fn form_data_from(parts: &[FormPart]) -> Result<FormData, TransportError> {
    let form = FormData::new().map_err(|e| js_error("Failed to create form data", e))?;
    for part in parts {
        match part {
            FormPart::Text { name, value } => form
                .append_with_str(name, value)
                .map_err(|e| js_error("Failed to append form field", e))?,
            FormPart::File { name, file } => {
                let blob = blob_from(file)?;
                form.append_with_blob_and_filename(name, &blob, &file.file_name)
                    .map_err(|e| js_error("Failed to append file", e))?
            }
        }
    }
    Ok(form)
}

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let builder = builder_for(&request);

        let sent = match &request.body {
            RequestBody::Empty => builder.send().await,
            RequestBody::Json(value) => builder
                .json(value)
                .map_err(|e| TransportError(format!("Failed to serialize request: {}", e)))?
                .send()
                .await,
            RequestBody::Multipart(parts) => {
                // The browser sets the multipart boundary header itself.
                let form = form_data_from(parts)?;
                builder
                    .body(form)
                    .map_err(|e| TransportError(format!("Failed to attach form: {}", e)))?
                    .send()
                    .await
            }
        };

        let response = sent.map_err(|e| TransportError(format!("Failed to send request: {}", e)))?;
        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                log::warn!("Could not read body of {} response: {}", status, e);
                String::new()
            }
        };

        Ok(ApiResponse { status, body })
    }
}

/// Reads a picked browser file into memory for a multipart save.
pub async fn read_file(file: &web_sys::File) -> Result<FileUpload, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("Failed to read {}: {:?}", file.name(), e))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();

    let mime_type = match file.type_() {
        t if t.is_empty() => "application/octet-stream".to_string(),
        t => t,
    };

    Ok(FileUpload {
        file_name: file.name(),
        mime_type,
        bytes,
    })
}
