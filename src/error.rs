use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::Error as SqlxError;
use std::collections::HashMap;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("translation failed: {0}")]
    Translation(String),

    #[error("no SQL produced")]
    EmptySql,

    #[error("query failed: {message}")]
    Query { sql: String, message: String },

    #[error("storage error: {0}")]
    Storage(#[from] SqlxError),

    #[error("Gemini API error: {0:?}")]
    GeminiApi(GeminiError),

    #[error("upstream error with status: {0}")]
    UpstreamStatus(StatusCode),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_body) = match self {
            AppError::GeminiApi(gemini_err) => {
                let status = StatusCode::from_u16(gemini_err.error.code as u16)
                    .unwrap_or(StatusCode::BAD_GATEWAY);
                let body = ApiErrorBody {
                    code: gemini_err.error.status,
                    message: gemini_err.error.message,
                };
                (status, body)
            }
            AppError::Config(msg) => {
                let body = ApiErrorBody {
                    code: "CONFIG_ERROR".to_string(),
                    message: msg,
                };
                (StatusCode::INTERNAL_SERVER_ERROR, body)
            }
            AppError::Storage(e) => {
                let body = ApiErrorBody {
                    code: "STORAGE_ERROR".to_string(),
                    message: e.to_string(),
                };
                (StatusCode::INTERNAL_SERVER_ERROR, body)
            }
            AppError::Query { sql, message } => {
                let body = ApiErrorBody {
                    code: "QUERY_ERROR".to_string(),
                    message: format!("{message} (sql: {sql})"),
                };
                (StatusCode::BAD_REQUEST, body)
            }
            AppError::Translation(msg) => {
                let body = ApiErrorBody {
                    code: "TRANSLATION_ERROR".to_string(),
                    message: msg,
                };
                (StatusCode::BAD_GATEWAY, body)
            }
            AppError::EmptySql => {
                let body = ApiErrorBody {
                    code: "TRANSLATION_ERROR".to_string(),
                    message: "the model produced no SQL for this question".to_string(),
                };
                (StatusCode::BAD_GATEWAY, body)
            }
            AppError::Json(e) => {
                let body = ApiErrorBody {
                    code: "BAD_RESPONSE".to_string(),
                    message: format!("malformed upstream payload: {e}"),
                };
                (StatusCode::BAD_GATEWAY, body)
            }
            AppError::Reqwest(_) | AppError::UrlParse(_) => {
                let body = ApiErrorBody {
                    code: "BAD_GATEWAY".to_string(),
                    message: "upstream service is unavailable".to_string(),
                };
                (StatusCode::BAD_GATEWAY, body)
            }
            AppError::UpstreamStatus(code) => {
                let (err_code, msg) = match code {
                    StatusCode::TOO_MANY_REQUESTS => ("RATE_LIMIT", "upstream rate limit exceeded"),
                    StatusCode::UNAUTHORIZED => ("UNAUTHORIZED", "upstream authentication failed"),
                    StatusCode::FORBIDDEN => ("FORBIDDEN", "upstream permission denied"),
                    _ => ("UPSTREAM_ERROR", "an upstream error occurred"),
                };
                (
                    code,
                    ApiErrorBody {
                        code: err_code.to_string(),
                        message: msg.to_string(),
                    },
                )
            }
        };
        (status, Json(ApiErrorResponse { error: error_body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

/// Gemini API error response structure
#[derive(Deserialize, Debug)]
pub struct GeminiError {
    pub error: GeminiErrorBody,
}

#[derive(Deserialize, Debug)]
pub struct GeminiErrorBody {
    pub code: u32,
    pub message: String,
    pub status: String,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}
