//! Response envelope and error mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Local;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: Option<T>,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn now() -> String {
    Local::now().naive_local().format("%Y-%m-%dT%H:%M:%S%.3f").to_string()
}

pub fn ok<T: Serialize>(data: T) -> Json<Envelope<T>> {
    Json(Envelope {
        success: true,
        message: None,
        data: Some(data),
        timestamp: now(),
        error: None,
    })
}

pub fn ok_with<T: Serialize>(data: T, message: &str) -> Json<Envelope<T>> {
    Json(Envelope {
        success: true,
        message: Some(message.to_string()),
        data: Some(data),
        timestamp: now(),
        error: None,
    })
}

pub fn created<T: Serialize>(data: T, message: &str) -> (StatusCode, Json<Envelope<T>>) {
    (StatusCode::CREATED, ok_with(data, message))
}

/// `data: null` plus a message, as deletes answer.
pub fn done(message: &str) -> Json<Envelope<()>> {
    Json(Envelope {
        success: true,
        message: Some(message.to_string()),
        data: None,
        timestamp: now(),
        error: None,
    })
}

/// A failed request, rendered as `{success: false, error, timestamp}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiFailure {
    pub status: StatusCode,
    pub error: String,
}

impl ApiFailure {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            error: what.into(),
        }
    }

    pub fn bad_request(why: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: why.into(),
        }
    }

    pub fn unauthorized(why: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            error: why.into(),
        }
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, error = %self.error, "request failed");
        } else {
            tracing::debug!(status = %self.status, error = %self.error, "request rejected");
        }
        let body = Envelope::<()> {
            success: false,
            message: None,
            data: None,
            timestamp: now(),
            error: Some(self.error),
        };
        (self.status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiFailure>;
