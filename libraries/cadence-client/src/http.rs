//! Request helpers shared by the endpoint clients.

use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::error::{ApiError, Result};

/// Send a request, turning transport failures and non-success statuses into errors.
pub(crate) async fn send(request: RequestBuilder) -> Result<Response> {
    let response = request.send().await.map_err(|e| {
        if e.is_connect() || e.is_timeout() {
            ApiError::ServerUnreachable(e.to_string())
        } else {
            ApiError::Request(e)
        }
    })?;

    if response.status().is_success() {
        Ok(response)
    } else {
        Err(ApiError::from_response(response).await)
    }
}

/// Send a request and parse the JSON body.
pub(crate) async fn fetch<T: DeserializeOwned>(request: RequestBuilder, what: &str) -> Result<T> {
    send(request)
        .await?
        .json()
        .await
        .map_err(|e| ApiError::ParseError(format!("Failed to parse {}: {}", what, e)))
}
