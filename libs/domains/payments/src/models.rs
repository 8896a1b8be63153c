use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// What the gateway needs to open a hosted-checkout session
#[derive(Debug, Clone)]
pub struct PaymentSessionRequest {
    pub tran_id: String,
    pub amount: f64,
    pub currency: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub shipping_address: String,
}

/// Result of opening a gateway session
#[derive(Debug, Clone)]
pub struct GatewaySession {
    /// Hosted-checkout URL to redirect the buyer to
    pub gateway_url: Option<String>,
    pub failed_reason: Option<String>,
}

/// Server-side validation result for a `val_id`
#[derive(Debug, Clone)]
pub struct GatewayValidation {
    /// Gateway status word; only VALID or VALIDATED count as confirmed
    pub status: String,
    pub tran_id: String,
    pub amount: Option<String>,
}

impl GatewayValidation {
    /// The gateway's confirmation sentinel
    pub fn is_confirmed(&self) -> bool {
        self.status == "VALID" || self.status == "VALIDATED"
    }
}

/// DTO for starting a payment for an order
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct InitPaymentRequest {
    pub order_id: Uuid,
}

/// Response of the init endpoint; `fail` carries the gateway's reason
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct InitPaymentResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tran_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl InitPaymentResponse {
    pub fn success(redirect_url: String, tran_id: String) -> Self {
        Self {
            status: "success".to_string(),
            redirect_url: Some(redirect_url),
            tran_id: Some(tran_id),
            message: None,
        }
    }

    pub fn fail(message: String) -> Self {
        Self {
            status: "fail".to_string(),
            redirect_url: None,
            tran_id: None,
            message: Some(message),
        }
    }
}

/// Form body the gateway posts to the callback endpoints
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct GatewayCallback {
    pub tran_id: Option<String>,
    pub val_id: Option<String>,
    /// Gateway status word, e.g. VALID, FAILED, CANCELLED
    pub status: Option<String>,
    pub amount: Option<String>,
    pub card_type: Option<String>,
}

/// JSON acknowledgement returned to the gateway
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CallbackAck {
    pub status: String,
    pub message: String,
}

impl CallbackAck {
    pub fn new(status: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            message: message.into(),
        }
    }
}
