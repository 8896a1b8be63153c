//! Configuration for the shop API

use axum_helpers::JwtConfig;
use core_config::{app_info, env_or_default, server::ServerConfig, AppInfo, FromEnv};
use database::postgres::PostgresConfig;
use domain_payments::SslCommerzConfig;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub postgres: PostgresConfig,
    pub jwt: JwtConfig,
    pub sslcommerz: SslCommerzConfig,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;
        let postgres = PostgresConfig::from_env()?;
        let jwt = JwtConfig::from_env()?;

        // sandbox store by default; production deployments override all four
        let sslcommerz = SslCommerzConfig {
            store_id: env_or_default("SSLCOMMERZ_STORE_ID", "testbox"),
            store_password: env_or_default("SSLCOMMERZ_STORE_PASSWORD", "qwerty"),
            sandbox: env_or_default("SSLCOMMERZ_SANDBOX", "true")
                .eq_ignore_ascii_case("true"),
            callback_base_url: env_or_default(
                "PAYMENT_CALLBACK_BASE_URL",
                "http://localhost:8080/api/payment",
            ),
        };

        Ok(Self {
            app: app_info!(),
            environment,
            server,
            postgres,
            jwt,
            sslcommerz,
        })
    }
}
