//! Application configuration loaded from the environment.

use std::net::SocketAddr;
use std::time::Duration;

/// Errors raised while loading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is absent.
    #[error("missing required environment variable {name}")]
    Missing {
        /// Variable name.
        name: String,
    },
    /// A variable is present but unparsable.
    #[error("invalid value for {name}: {message}")]
    Invalid {
        /// Variable name.
        name: String,
        /// Parse failure description.
        message: String,
    },
}

impl ConfigError {
    fn missing(name: &str) -> Self {
        Self::Missing {
            name: name.to_owned(),
        }
    }

    fn invalid(name: &str, message: impl Into<String>) -> Self {
        Self::Invalid {
            name: name.to_owned(),
            message: message.into(),
        }
    }
}

/// Full application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Postgres connection string.
    pub database_url: String,
    /// Redis connection string, shared by cache and event publisher.
    pub redis_url: String,
    /// SMTP relay host.
    pub smtp_host: String,
    /// SMTP relay port.
    pub smtp_port: u16,
    /// Optional SMTP credentials.
    pub smtp_credentials: Option<(String, String)>,
    /// Sender address for notification email.
    pub mail_from: String,
    /// Symmetric JWT signing secret.
    pub jwt_secret: String,
    /// Issued-token lifetime.
    pub jwt_ttl: Duration,
    /// Listen address for the HTTP server.
    pub bind_addr: SocketAddr,
    /// Logical exchange name for mutation events.
    pub event_exchange: String,
    /// Routing key for mutation events.
    pub event_routing_key: String,
}

impl AppConfig {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through a lookup function.
    ///
    /// Tests inject a closure over a map instead of mutating process-wide
    /// environment state.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let require = |name: &str| lookup(name).ok_or_else(|| ConfigError::missing(name));

        let smtp_port = match lookup("SMTP_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|err| ConfigError::invalid("SMTP_PORT", err.to_string()))?,
            None => 587,
        };
        let smtp_credentials = match (lookup("SMTP_USERNAME"), lookup("SMTP_PASSWORD")) {
            (Some(username), Some(password)) => Some((username, password)),
            (None, None) => None,
            _ => {
                return Err(ConfigError::invalid(
                    "SMTP_USERNAME",
                    "SMTP_USERNAME and SMTP_PASSWORD must be set together",
                ));
            }
        };
        let jwt_ttl = match lookup("JWT_TTL_SECS") {
            Some(raw) => Duration::from_secs(
                raw.parse::<u64>()
                    .map_err(|err| ConfigError::invalid("JWT_TTL_SECS", err.to_string()))?,
            ),
            None => Duration::from_secs(3600),
        };
        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| "0.0.0.0:8080".to_owned())
            .parse::<SocketAddr>()
            .map_err(|err| ConfigError::invalid("BIND_ADDR", err.to_string()))?;

        Ok(Self {
            database_url: require("DATABASE_URL")?,
            redis_url: require("REDIS_URL")?,
            smtp_host: require("SMTP_HOST")?,
            smtp_port,
            smtp_credentials,
            mail_from: require("MAIL_FROM")?,
            jwt_secret: require("JWT_SECRET")?,
            jwt_ttl,
            bind_addr,
            event_exchange: lookup("EVENT_EXCHANGE")
                .unwrap_or_else(|| "addressbook.exchange".to_owned()),
            event_routing_key: lookup("EVENT_ROUTING_KEY")
                .unwrap_or_else(|| "contact.events".to_owned()),
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::collections::HashMap;

    use rstest::rstest;

    use super::*;

    fn base_env() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("DATABASE_URL", "postgres://localhost/addressbook"),
            ("REDIS_URL", "redis://localhost:6379"),
            ("SMTP_HOST", "smtp.example.com"),
            ("MAIL_FROM", "AddressBook <noreply@example.com>"),
            ("JWT_SECRET", "test-secret"),
        ])
    }

    fn load(env: &HashMap<&'static str, &'static str>) -> Result<AppConfig, ConfigError> {
        AppConfig::from_lookup(|name| env.get(name).map(|value| (*value).to_owned()))
    }

    #[rstest]
    fn defaults_fill_the_optional_settings() {
        let config = load(&base_env()).expect("config loads");

        assert_eq!(config.smtp_port, 587);
        assert_eq!(config.smtp_credentials, None);
        assert_eq!(config.jwt_ttl, Duration::from_secs(3600));
        assert_eq!(config.bind_addr, "0.0.0.0:8080".parse().expect("addr"));
        assert_eq!(config.event_exchange, "addressbook.exchange");
        assert_eq!(config.event_routing_key, "contact.events");
    }

    #[rstest]
    #[case("DATABASE_URL")]
    #[case("REDIS_URL")]
    #[case("SMTP_HOST")]
    #[case("MAIL_FROM")]
    #[case("JWT_SECRET")]
    fn missing_required_variables_are_reported_by_name(#[case] name: &str) {
        let mut env = base_env();
        env.remove(name);

        let err = load(&env).expect_err("missing variable must fail");

        assert_eq!(err, ConfigError::missing(name));
    }

    #[rstest]
    fn unparsable_port_is_invalid() {
        let mut env = base_env();
        env.insert("SMTP_PORT", "not-a-port");

        let err = load(&env).expect_err("bad port must fail");

        assert!(matches!(err, ConfigError::Invalid { name, .. } if name == "SMTP_PORT"));
    }

    #[rstest]
    fn half_configured_credentials_are_rejected() {
        let mut env = base_env();
        env.insert("SMTP_USERNAME", "mailer");

        let err = load(&env).expect_err("lone username must fail");

        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[rstest]
    fn explicit_settings_override_the_defaults() {
        let mut env = base_env();
        env.insert("SMTP_PORT", "2525");
        env.insert("SMTP_USERNAME", "mailer");
        env.insert("SMTP_PASSWORD", "hunter2");
        env.insert("JWT_TTL_SECS", "600");
        env.insert("BIND_ADDR", "127.0.0.1:9090");
        env.insert("EVENT_EXCHANGE", "contacts.exchange");
        env.insert("EVENT_ROUTING_KEY", "contacts.changed");

        let config = load(&env).expect("config loads");

        assert_eq!(config.smtp_port, 2525);
        assert_eq!(
            config.smtp_credentials,
            Some(("mailer".to_owned(), "hunter2".to_owned()))
        );
        assert_eq!(config.jwt_ttl, Duration::from_secs(600));
        assert_eq!(config.bind_addr, "127.0.0.1:9090".parse().expect("addr"));
        assert_eq!(config.event_exchange, "contacts.exchange");
        assert_eq!(config.event_routing_key, "contacts.changed");
    }
}
