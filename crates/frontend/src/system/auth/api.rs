use contracts::system::auth::{
    AdminInfo, LoginRequest, LoginResponse, RefreshRequest, RefreshResponse,
};
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

use crate::shared::api::ApiError;
use crate::shared::api_utils::api_url;

fn encode_error(e: gloo_net::Error) -> ApiError {
    ApiError::server(format!("Failed to serialize request: {}", e))
}

fn send_error(e: gloo_net::Error) -> ApiError {
    ApiError::network(format!("Failed to send request: {}", e))
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await.map_err(send_error)?;
    if !response.ok() {
        return Err(ApiError::from_status(status, &body));
    }
    serde_json::from_str(&body)
        .map_err(|e| ApiError::server(format!("Failed to parse response: {}", e)))
}

/// Login with email and password
pub async fn login(email: String, password: String) -> Result<LoginResponse, ApiError> {
    let request = LoginRequest { email, password };

    let response = Request::post(&api_url("/api/system/auth/login"))
        .json(&request)
        .map_err(encode_error)?
        .send()
        .await
        .map_err(send_error)?;

    read_json(response).await
}

/// Exchange the refresh token for a new access token
pub async fn refresh_token(refresh_token: String) -> Result<RefreshResponse, ApiError> {
    let request = RefreshRequest { refresh_token };

    let response = Request::post(&api_url("/api/system/auth/refresh"))
        .json(&request)
        .map_err(encode_error)?
        .send()
        .await
        .map_err(send_error)?;

    read_json(response).await
}

/// Revoke the refresh token on the server
pub async fn logout(refresh_token: String) -> Result<(), ApiError> {
    let request = RefreshRequest { refresh_token };

    let response = Request::post(&api_url("/api/system/auth/logout"))
        .json(&request)
        .map_err(encode_error)?
        .send()
        .await
        .map_err(send_error)?;

    if !response.ok() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::from_status(response.status(), &body));
    }
    Ok(())
}

/// Profile of the operator owning `access_token`
pub async fn get_current_admin(access_token: &str) -> Result<AdminInfo, ApiError> {
    let response = Request::get(&api_url("/api/system/auth/me"))
        .header("Authorization", &format!("Bearer {}", access_token))
        .send()
        .await
        .map_err(send_error)?;

    read_json(response).await
}
