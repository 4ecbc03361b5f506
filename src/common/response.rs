use crate::common::error::StoreError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::borrow::Cow;
use tracing::error;
use utoipa::ToSchema;
use validator::{ValidationError, ValidationErrors};

#[derive(Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub status: String,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    pub fn success(data: T, message: &str) -> Self {
        Self {
            status: "success".to_string(),
            message: message.to_string(),
            data: Some(data),
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            status: "error".to_string(),
            message: message.to_string(),
            data: None,
        }
    }
}

pub struct ApiSuccess<T>(pub T, pub StatusCode);

impl<T> IntoResponse for ApiSuccess<ApiResponse<T>>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        let (response, status) = (self.0, self.1);
        (status, Json(response)).into_response()
    }
}

pub struct ApiError(pub String, pub StatusCode);

impl ApiError {
    pub fn not_found(message: &str) -> Self {
        Self(message.to_string(), StatusCode::NOT_FOUND)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (message, status) = (self.0, self.1);
        let response = ApiResponse::<()>::error(&message);
        (status, Json(response)).into_response()
    }
}

// Store details stay in the logs.
impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        error!(error = %e, "movie store failure");
        Self(
            "Internal Server Error".to_string(),
            StatusCode::INTERNAL_SERVER_ERROR,
        )
    }
}

/// Field-level validation failures, rendered as 422.
pub struct ApiValidationError(pub ValidationErrors);

impl IntoResponse for ApiValidationError {
    fn into_response(self) -> Response {
        let response = ApiResponse {
            status: "error".to_string(),
            message: "Validation failed".to_string(),
            data: Some(self.0),
        };
        (StatusCode::UNPROCESSABLE_ENTITY, Json(response)).into_response()
    }
}

/// A JSON body that could not be read into the request type.
///
/// Shape errors (unknown genre, missing or mistyped field) share the 422
/// envelope of [`ApiValidationError`]; other rejections keep axum's status.
pub struct ApiJsonRejection(pub JsonRejection);

impl IntoResponse for ApiJsonRejection {
    fn into_response(self) -> Response {
        match self.0 {
            JsonRejection::JsonDataError(rejection) => {
                let detail = rejection.body_text();
                let mut err = ValidationError::new("invalid_body");
                if let Some(field) = rejected_field(&detail) {
                    err.add_param(Cow::Borrowed("field"), &field);
                }
                err.message = Some(Cow::Owned(detail));

                let mut errors = ValidationErrors::new();
                errors.add("body", err);
                ApiValidationError(errors).into_response()
            }
            other => ApiError(other.body_text(), other.status()).into_response(),
        }
    }
}

/// Pulls the offending field out of a serde message such as
/// `genre[0]: unknown variant ..` or ``missing field `title` ..``.
fn rejected_field(detail: &str) -> Option<String> {
    let detail = detail
        .split_once("target type: ")
        .map_or(detail, |(_, rest)| rest);

    if let Some((_, rest)) = detail.split_once("missing field `") {
        return rest.split_once('`').map(|(field, _)| field.to_string());
    }

    let (path, _) = detail.split_once(": ")?;
    (!path.is_empty() && !path.contains(' ')).then(|| path.to_string())
}
