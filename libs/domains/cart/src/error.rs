use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use axum_helpers::errors::ErrorCode;
use axum_helpers::{AppError, ErrorResponse};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CartError {
    #[error("Cart item not found: {0}")]
    ItemNotFound(Uuid),

    #[error("Product not found: {0}")]
    ProductNotFound(Uuid),

    #[error("Stock limited. Only {available} items left.")]
    InsufficientStock { available: i64 },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type CartResult<T> = Result<T, CartError>;

impl From<CartError> for AppError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::ItemNotFound(id) => {
                AppError::NotFound(format!("Cart item {} not found", id))
            }
            CartError::ProductNotFound(id) => {
                AppError::NotFound(format!("Product {} not found", id))
            }
            CartError::InsufficientStock { available } => AppError::UnprocessableEntity(format!(
                "Stock limited. Only {} items left.",
                available
            )),
            CartError::Validation(msg) => AppError::BadRequest(msg),
            CartError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for CartError {
    fn into_response(self) -> Response {
        // Stock errors carry the available count as structured detail
        if let CartError::InsufficientStock { available } = self {
            let body = ErrorResponse::new(
                ErrorCode::UnprocessableEntity,
                format!("Stock limited. Only {} items left.", available),
            )
            .with_details(serde_json::json!({ "available": available }));

            return (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response();
        }

        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
