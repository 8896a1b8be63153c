use async_trait::async_trait;

use crate::error::PaymentResult;
use crate::models::{GatewaySession, GatewayValidation, PaymentSessionRequest};

/// Hosted-checkout gateway abstraction.
///
/// The production implementation is [`crate::SslCommerzGateway`]; tests
/// mock this trait to drive the callback flows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Open a checkout session and return the redirect URL
    async fn create_session(
        &self,
        request: &PaymentSessionRequest,
    ) -> PaymentResult<GatewaySession>;

    /// Validate a gateway `val_id` server-side
    async fn validate(&self, val_id: &str) -> PaymentResult<GatewayValidation>;
}
