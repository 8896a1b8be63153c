use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("Order not found: {0}")]
    OrderNotFound(Uuid),

    #[error("No order for transaction {0}")]
    TransactionNotFound(String),

    #[error("Order is not awaiting payment")]
    NotPending,

    #[error("Gateway did not confirm the payment: {0}")]
    NotValidated(String),

    #[error("Gateway error: {0}")]
    Gateway(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type PaymentResult<T> = Result<T, PaymentError>;

impl From<PaymentError> for AppError {
    fn from(err: PaymentError) -> Self {
        match err {
            PaymentError::OrderNotFound(id) => {
                AppError::NotFound(format!("Order {} not found", id))
            }
            PaymentError::TransactionNotFound(tran_id) => {
                AppError::NotFound(format!("No order for transaction {}", tran_id))
            }
            PaymentError::NotPending => {
                AppError::Conflict("Order is not awaiting payment".to_string())
            }
            PaymentError::NotValidated(msg) => {
                AppError::BadRequest(format!("Payment not confirmed: {}", msg))
            }
            PaymentError::Gateway(msg) => {
                AppError::ServiceUnavailable(format!("Payment gateway error: {}", msg))
            }
            PaymentError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for PaymentError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
