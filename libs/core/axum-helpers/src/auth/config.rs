use core_config::{env_required, ConfigError, FromEnv};

/// JWT signing configuration
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

impl FromEnv for JwtConfig {
    /// Reads the required JWT_SECRET environment variable.
    fn from_env() -> Result<Self, ConfigError> {
        let secret = env_required("JWT_SECRET")?;
        Ok(Self { secret })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_requires_secret() {
        temp_env::with_var_unset("JWT_SECRET", || {
            assert!(JwtConfig::from_env().is_err());
        });
    }

    #[test]
    fn test_jwt_config_from_env() {
        temp_env::with_var("JWT_SECRET", Some("test-secret"), || {
            let config = JwtConfig::from_env().unwrap();
            assert_eq!(config.secret, "test-secret");
        });
    }
}
