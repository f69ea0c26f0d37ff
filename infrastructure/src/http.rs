use reqwest::Response;
use serde::de::DeserializeOwned;
use shared::types::{Result, StylistError};

/// Maps a non-success status to `StylistError::Api`, carrying the body text.
pub(crate) async fn check_status(service: &'static str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(StylistError::Api {
        service,
        status: status.as_u16(),
        body,
    })
}

/// Status check, then decode the body as JSON.
pub(crate) async fn read_json<T: DeserializeOwned>(service: &'static str, response: Response) -> Result<T> {
    let body = check_status(service, response).await?.text().await?;
    Ok(serde_json::from_str(&body)?)
}
