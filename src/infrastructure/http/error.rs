//! HTTP Error Handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::SynthesisError;
use crate::domain::synthesis::ValidationError;

/// 通用错误响应体
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// 合成端点错误响应体（前端契约：{success, error}）
#[derive(Debug, Serialize)]
pub struct SynthesisErrorBody {
    pub success: bool,
    pub error: String,
}

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
    /// 合成端点的失败，响应体形状与其余端点不同
    Synthesis {
        message: String,
        client_error: bool,
    },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(msg) => {
                tracing::warn!(error = %msg, "Resource not found");
                (StatusCode::NOT_FOUND, Json(ErrorBody { error: msg })).into_response()
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!(error = %msg, "Bad request");
                (StatusCode::BAD_REQUEST, Json(ErrorBody { error: msg })).into_response()
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody { error: msg }),
                )
                    .into_response()
            }
            ApiError::Synthesis {
                message,
                client_error,
            } => {
                let status = if client_error {
                    tracing::warn!(error = %message, "Synthesis rejected");
                    StatusCode::BAD_REQUEST
                } else {
                    tracing::error!(error = %message, "Synthesis failed");
                    StatusCode::INTERNAL_SERVER_ERROR
                };
                (
                    status,
                    Json(SynthesisErrorBody {
                        success: false,
                        error: message,
                    }),
                )
                    .into_response()
            }
        }
    }
}

impl From<SynthesisError> for ApiError {
    fn from(err: SynthesisError) -> Self {
        ApiError::Synthesis {
            client_error: err.kind.is_client_error(),
            message: err.to_string(),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Synthesis {
            message: err.to_string(),
            client_error: true,
        }
    }
}
