//! HTTP API Client
//!
//! Calls to the two form endpoints. Both are relative to the current page
//! and both carry the CSRF header when a token was found.

use gloo_net::http::{Request, RequestBuilder, Response};
use web_sys::{File, FormData};

use expensense::ocr::{decode_ocr_response, OCR_FILE_FIELD};
use expensense::{ClientConfig, ClientError, ClientResult, OcrResult, TeamRecord, TeamsRequest};

use crate::dom::describe_js_error;

#[derive(Debug, serde::Deserialize)]
struct ApiError {
    error: String,
}

/// Attach the CSRF header if the page had a token
fn with_csrf(builder: RequestBuilder, config: &ClientConfig) -> RequestBuilder {
    match config.csrf_header() {
        Some((name, token)) => builder.header(name, token),
        None => builder,
    }
}

/// Turn a non-2xx response into an error, preferring the server's message
async fn status_error(response: &Response) -> ClientError {
    let message = match response.text().await {
        Ok(body) => serde_json::from_str::<ApiError>(&body)
            .map(|e| e.error)
            .unwrap_or_else(|_| response.status_text()),
        Err(_) => response.status_text(),
    };

    ClientError::Status {
        status: response.status(),
        message,
    }
}

/// Upload a receipt to the OCR endpoint
pub async fn upload_receipt(config: &ClientConfig, file: &File) -> ClientResult<OcrResult> {
    let form = FormData::new().map_err(|e| ClientError::Request(describe_js_error(&e)))?;
    form.append_with_blob_and_filename(OCR_FILE_FIELD, file, &file.name())
        .map_err(|e| ClientError::Request(describe_js_error(&e)))?;

    let response = with_csrf(Request::post(&config.endpoints.ocr), config)
        .body(form)
        .map_err(|e| ClientError::Request(e.to_string()))?
        .send()
        .await
        .map_err(|e| ClientError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(status_error(&response).await);
    }

    let body = response
        .text()
        .await
        .map_err(|e| ClientError::Network(e.to_string()))?;

    decode_ocr_response(&body)
}

/// Fetch the teams belonging to a company
pub async fn fetch_teams(config: &ClientConfig, company_id: &str) -> ClientResult<Vec<TeamRecord>> {
    let response = with_csrf(Request::post(&config.endpoints.teams), config)
        .json(&TeamsRequest::new(company_id))
        .map_err(|e| ClientError::Request(e.to_string()))?
        .send()
        .await
        .map_err(|e| ClientError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(status_error(&response).await);
    }

    response
        .json::<Vec<TeamRecord>>()
        .await
        .map_err(|e| ClientError::Decode(e.to_string()))
}
