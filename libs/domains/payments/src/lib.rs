//! Payments Domain
//!
//! SSLCommerz-style hosted-checkout integration. A payment session is
//! opened for a pending order and the buyer is redirected to the gateway;
//! the gateway calls back with success/fail/cancel results and an IPN.
//! Success is only trusted when the gateway reports the VALID or
//! VALIDATED sentinel, and IPN payloads are re-validated server-side
//! before any state changes.

pub mod error;
pub mod gateway;
pub mod handlers;
pub mod models;
pub mod service;
pub mod sslcommerz;

pub use error::{PaymentError, PaymentResult};
pub use gateway::PaymentGateway;
pub use handlers::PaymentState;
pub use models::{
    GatewayCallback, GatewaySession, GatewayValidation, InitPaymentRequest, InitPaymentResponse,
    PaymentSessionRequest,
};
pub use service::PaymentService;
pub use sslcommerz::{SslCommerzConfig, SslCommerzGateway};
