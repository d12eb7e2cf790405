use super::env::{ConfigError, Lookup, ProcessEnv, non_blank, parse_or};

/// Server configuration for HTTP listener
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
}

impl ServerConfig {
    /// Load server configuration from environment variables
    ///
    /// Environment variables:
    /// - SERVICE_IP: IP address to bind (default: "127.0.0.1")
    /// - SERVICE_PORT: Port to bind (default: 8080)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&ProcessEnv)
    }

    pub fn from_lookup(lookup: &dyn Lookup) -> Result<Self, ConfigError> {
        Ok(Self {
            ip: non_blank(lookup, "SERVICE_IP").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or(lookup, "SERVICE_PORT", 8080)?,
        })
    }

    /// Get the bind address as "ip:port"
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.ip, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::env::tests::vars;

    #[test]
    fn should_create_bind_address_from_ip_and_port() {
        // Arrange
        let config = ServerConfig {
            ip: "127.0.0.1".to_string(),
            port: 8080,
        };

        // Act
        let address = config.bind_address();

        // Assert
        assert_eq!(address, "127.0.0.1:8080");
    }

    #[test]
    fn should_reject_port_out_of_range() {
        let lookup = vars(&[("SERVICE_PORT", "70000")]);

        let result = ServerConfig::from_lookup(&lookup);

        assert!(matches!(result, Err(ConfigError::Invalid { name: "SERVICE_PORT", .. })));
    }
}
