use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::error::{PaymentError, PaymentResult};
use crate::gateway::PaymentGateway;
use crate::models::{GatewaySession, GatewayValidation, PaymentSessionRequest};

const SANDBOX_SESSION_URL: &str = "https://sandbox.sslcommerz.com/gwprocess/v3/api.php";
const LIVE_SESSION_URL: &str = "https://securepay.sslcommerz.com/gwprocess/v4/api.php";
const SANDBOX_VALIDATION_URL: &str =
    "https://sandbox.sslcommerz.com/validator/api/validationserverAPI.php";
const LIVE_VALIDATION_URL: &str =
    "https://securepay.sslcommerz.com/validator/api/validationserverAPI.php";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// SSLCommerz merchant configuration
#[derive(Debug, Clone)]
pub struct SslCommerzConfig {
    pub store_id: String,
    pub store_password: String,
    pub sandbox: bool,
    /// Base URL the gateway redirects/calls back to, e.g.
    /// `https://shop.example.com/api/payment`
    pub callback_base_url: String,
}

impl SslCommerzConfig {
    fn session_url(&self) -> &'static str {
        if self.sandbox {
            SANDBOX_SESSION_URL
        } else {
            LIVE_SESSION_URL
        }
    }

    fn validation_url(&self) -> &'static str {
        if self.sandbox {
            SANDBOX_VALIDATION_URL
        } else {
            LIVE_VALIDATION_URL
        }
    }
}

/// SSLCommerz hosted-checkout client
#[derive(Clone)]
pub struct SslCommerzGateway {
    config: SslCommerzConfig,
    client: reqwest::Client,
}

/// Session response body; field names follow the gateway API
#[derive(Debug, Deserialize)]
struct SessionResponse {
    status: String,
    #[serde(rename = "GatewayPageURL")]
    gateway_page_url: Option<String>,
    #[serde(rename = "failedreason")]
    failed_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ValidationResponse {
    status: String,
    tran_id: Option<String>,
    amount: Option<String>,
}

impl SslCommerzGateway {
    pub fn new(config: SslCommerzConfig) -> PaymentResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| PaymentError::Internal(format!("HTTP client setup failed: {}", e)))?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl PaymentGateway for SslCommerzGateway {
    async fn create_session(
        &self,
        request: &PaymentSessionRequest,
    ) -> PaymentResult<GatewaySession> {
        let base = &self.config.callback_base_url;
        let amount = format!("{:.2}", request.amount);
        let success_url = format!("{}/success/{}", base, request.tran_id);
        let fail_url = format!("{}/fail/{}", base, request.tran_id);
        let cancel_url = format!("{}/cancel/{}", base, request.tran_id);
        let ipn_url = format!("{}/ipn", base);

        let params = [
            ("store_id", self.config.store_id.as_str()),
            ("store_passwd", self.config.store_password.as_str()),
            ("total_amount", amount.as_str()),
            ("currency", request.currency.as_str()),
            ("tran_id", request.tran_id.as_str()),
            ("success_url", success_url.as_str()),
            ("fail_url", fail_url.as_str()),
            ("cancel_url", cancel_url.as_str()),
            ("ipn_url", ipn_url.as_str()),
            ("cus_name", request.customer_name.as_str()),
            ("cus_email", request.customer_email.as_str()),
            ("cus_phone", request.customer_phone.as_str()),
            ("cus_add1", request.shipping_address.as_str()),
            ("shipping_method", "NO"),
            ("product_name", "Jersey Order"),
            ("product_category", "Apparel"),
            ("product_profile", "physical-goods"),
        ];

        let response = self
            .client
            .post(self.config.session_url())
            .form(&params)
            .send()
            .await
            .map_err(|e| PaymentError::Gateway(format!("Session request failed: {}", e)))?;

        let body: SessionResponse = response
            .json()
            .await
            .map_err(|e| PaymentError::Gateway(format!("Malformed session response: {}", e)))?;

        tracing::info!(tran_id = %request.tran_id, status = %body.status, "Opened gateway session");

        if body.status == "SUCCESS" {
            Ok(GatewaySession {
                gateway_url: body.gateway_page_url,
                failed_reason: None,
            })
        } else {
            Ok(GatewaySession {
                gateway_url: None,
                failed_reason: body.failed_reason,
            })
        }
    }

    async fn validate(&self, val_id: &str) -> PaymentResult<GatewayValidation> {
        let response = self
            .client
            .get(self.config.validation_url())
            .query(&[
                ("val_id", val_id),
                ("store_id", self.config.store_id.as_str()),
                ("store_passwd", self.config.store_password.as_str()),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(|e| PaymentError::Gateway(format!("Validation request failed: {}", e)))?;

        let body: ValidationResponse = response
            .json()
            .await
            .map_err(|e| PaymentError::Gateway(format!("Malformed validation response: {}", e)))?;

        Ok(GatewayValidation {
            status: body.status,
            tran_id: body.tran_id.unwrap_or_default(),
            amount: body.amount,
        })
    }
}
