use std::env;
use thiserror::Error;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";

/// Port that switches the SMTP transport to implicit TLS.
pub const IMPLICIT_TLS_PORT: u16 = 465;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error(
        "Email configuration is missing. Please set EMAIL_HOST, EMAIL_PORT, EMAIL_USER, and EMAIL_PASS."
    )]
    Missing,
    #[error("Email configuration is invalid. EMAIL_PORT must be a port number, got: {0}")]
    InvalidPort(String),
    #[error("Email configuration is invalid. EMAIL_USER must be an email address, got: {0}")]
    InvalidSender(String),
    #[error("Email transport could not be configured: {0}")]
    Transport(String),
}

/// Everything the process reads from its environment, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_address: String,
    pub port: u16,
    pub mail: MailSettings,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        let port = match env::var("PORT") {
            Ok(port) => port.parse()?,
            Err(_) => DEFAULT_PORT,
        };
        Ok(Self {
            bind_address: env::var("BIND_ADDRESS")
                .unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string()),
            port,
            mail: MailSettings::from_env(),
        })
    }
}

/// Raw SMTP settings. Any of them may be absent; that is only reported when
/// a booking actually needs to send mail.
#[derive(Clone, Default)]
pub struct MailSettings {
    pub host: Option<String>,
    pub port: Option<String>,
    pub user: Option<String>,
    pub pass: Option<String>,
}

// redacts the password
impl std::fmt::Debug for MailSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("pass", &self.pass.as_ref().map(|_| "***"))
            .finish()
    }
}

impl MailSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the settings from any key lookup, empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());
        Self {
            host: get("EMAIL_HOST"),
            port: get("EMAIL_PORT"),
            user: get("EMAIL_USER"),
            pass: get("EMAIL_PASS"),
        }
    }

    pub fn resolve(&self) -> Result<SmtpConfig, ConfigError> {
        let (Some(host), Some(port), Some(user), Some(pass)) =
            (&self.host, &self.port, &self.user, &self.pass)
        else {
            return Err(ConfigError::Missing);
        };
        let port = port
            .trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort(port.clone()))?;
        Ok(SmtpConfig {
            host: host.clone(),
            port,
            user: user.clone(),
            pass: pass.clone(),
        })
    }
}

/// Complete SMTP configuration.
#[derive(Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
}

impl SmtpConfig {
    pub fn implicit_tls(&self) -> bool {
        self.port == IMPLICIT_TLS_PORT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(pairs: &[(&str, &str)]) -> MailSettings {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        MailSettings::from_lookup(|key| vars.get(key).cloned())
    }

    const COMPLETE: [(&str, &str); 4] = [
        ("EMAIL_HOST", "smtp.example.com"),
        ("EMAIL_PORT", "587"),
        ("EMAIL_USER", "bookings@example.com"),
        ("EMAIL_PASS", "hunter2"),
    ];

    #[test]
    fn complete_settings_resolve() {
        let config = settings(&COMPLETE).resolve().unwrap();
        assert_eq!(config.host, "smtp.example.com");
        assert_eq!(config.port, 587);
        assert!(!config.implicit_tls());
    }

    #[test]
    fn each_missing_variable_is_a_missing_config() {
        for skip in 0..COMPLETE.len() {
            let pairs: Vec<_> = COMPLETE
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != skip)
                .map(|(_, pair)| *pair)
                .collect();
            assert_eq!(
                settings(&pairs).resolve().err(),
                Some(ConfigError::Missing),
                "{}",
                COMPLETE[skip].0
            );
        }
    }

    #[test]
    fn empty_value_counts_as_missing() {
        let mut pairs = COMPLETE.to_vec();
        pairs[3] = ("EMAIL_PASS", "");
        assert_eq!(settings(&pairs).resolve().err(), Some(ConfigError::Missing));
    }

    #[test]
    fn non_numeric_port_is_rejected() {
        let mut pairs = COMPLETE.to_vec();
        pairs[1] = ("EMAIL_PORT", "smtp");
        assert_eq!(
            settings(&pairs).resolve().err(),
            Some(ConfigError::InvalidPort("smtp".into()))
        );
    }

    #[test]
    fn port_465_uses_implicit_tls() {
        let mut pairs = COMPLETE.to_vec();
        pairs[1] = ("EMAIL_PORT", "465");
        assert!(settings(&pairs).resolve().unwrap().implicit_tls());
    }

    #[test]
    fn debug_hides_the_password() {
        let rendered = format!("{:?}", settings(&COMPLETE));
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("smtp.example.com"));
    }

    #[test]
    fn missing_message_names_every_setting() {
        let message = ConfigError::Missing.to_string();
        assert!(message.starts_with("Email configuration is missing."));
        for key in ["EMAIL_HOST", "EMAIL_PORT", "EMAIL_USER", "EMAIL_PASS"] {
            assert!(message.contains(key));
        }
    }
}
