use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum WishlistError {
    #[error("Wishlist item not found: {0}")]
    ItemNotFound(Uuid),

    #[error("Product not found: {0}")]
    ProductNotFound(Uuid),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type WishlistResult<T> = Result<T, WishlistError>;

impl From<WishlistError> for AppError {
    fn from(err: WishlistError) -> Self {
        match err {
            WishlistError::ItemNotFound(id) => {
                AppError::NotFound(format!("Wishlist item {} not found", id))
            }
            WishlistError::ProductNotFound(id) => {
                AppError::NotFound(format!("Product {} not found", id))
            }
            WishlistError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for WishlistError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
