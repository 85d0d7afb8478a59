use std::collections::BTreeMap;

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::QueryRejection;
use serde_json::{Value, json};
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] foodgram_shared::Error),

    #[error("{0}")]
    Json(#[from] JsonRejection),

    #[error("{0}")]
    Path(#[from] PathRejection),

    #[error("{0}")]
    Query(#[from] QueryRejection),

    #[error("{0}")]
    Internal(#[from] anyhow::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<sqlx::Error> for AppError {
    fn from(value: sqlx::Error) -> Self {
        Self::Domain(value.into())
    }
}

/// Flattens validator errors to `{"field": ["message", ...]}`. Nested list
/// items are reported under their parent field.
pub fn validation_body(errors: &ValidationErrors) -> Value {
    let mut fields = BTreeMap::<String, Vec<String>>::new();
    collect(errors, None, &mut fields);

    json!(fields)
}

fn collect(
    errors: &ValidationErrors,
    parent: Option<&str>,
    fields: &mut BTreeMap<String, Vec<String>>,
) {
    for (field, kind) in errors.errors() {
        let name = parent.unwrap_or(&**field);
        match kind {
            ValidationErrorsKind::Field(errors) => {
                let messages = fields.entry(name.to_owned()).or_default();
                for error in errors {
                    messages.push(
                        error
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| format!("Invalid value ({}).", error.code)),
                    );
                }
            }
            ValidationErrorsKind::Struct(errors) => collect(errors, Some(name), fields),
            ValidationErrorsKind::List(items) => {
                for errors in items.values() {
                    collect(errors, Some(name), fields);
                }
            }
        }
    }
}

fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        use foodgram_shared::Error;

        match self {
            AppError::Domain(Error::Validate(errors)) => {
                (StatusCode::BAD_REQUEST, Json(validation_body(&errors))).into_response()
            }
            AppError::Domain(Error::User(message)) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "errors": message }))).into_response()
            }
            AppError::Domain(Error::Unauthorized) => detail(
                StatusCode::UNAUTHORIZED,
                "Authentication credentials were not provided.",
            ),
            AppError::Domain(Error::Forbidden(reason)) => {
                tracing::warn!(%reason, "Permission denied");
                detail(
                    StatusCode::FORBIDDEN,
                    "You do not have permission to perform this action.",
                )
            }
            AppError::Domain(Error::NotFound(what)) => {
                tracing::debug!(%what, "Not found");
                detail(StatusCode::NOT_FOUND, "Not found.")
            }
            AppError::Domain(Error::InvalidPage) => detail(StatusCode::NOT_FOUND, "Invalid page."),
            AppError::Domain(Error::Server(e)) => {
                tracing::error!("Server error: {e}");
                detail(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            AppError::Domain(Error::Unknown(e)) | AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                detail(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            AppError::Json(rejection) => (
                rejection.status(),
                Json(json!({ "non_field_errors": [rejection.body_text()] })),
            )
                .into_response(),
            AppError::Path(_) => detail(StatusCode::NOT_FOUND, "Not found."),
            AppError::Query(rejection) => detail(StatusCode::BAD_REQUEST, &rejection.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Input {
        #[validate(length(min = 1, message = "This field may not be blank."))]
        name: String,
        #[validate(range(min = 1))]
        cooking_time: i64,
    }

    #[test]
    fn test_validation_body_lists_messages_per_field() {
        let errors = Input {
            name: String::new(),
            cooking_time: 0,
        }
        .validate()
        .unwrap_err();

        let body = validation_body(&errors);
        assert_eq!(body["name"], json!(["This field may not be blank."]));
        assert_eq!(body["cooking_time"], json!(["Invalid value (range)."]));
    }

    #[test]
    fn test_status_codes() {
        use foodgram_shared::Error;

        let status = |e: Error| AppError::from(e).into_response().status();

        assert_eq!(status(Error::User("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status(Error::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(status(Error::Forbidden("x".into())), StatusCode::FORBIDDEN);
        assert_eq!(status(Error::NotFound("x".into())), StatusCode::NOT_FOUND);
        assert_eq!(status(Error::InvalidPage), StatusCode::NOT_FOUND);
        assert_eq!(
            status(Error::Server("x".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
