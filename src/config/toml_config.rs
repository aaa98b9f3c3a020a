use crate::core::response::AmbiguousResponsePolicy;
use crate::core::validator::DEFAULT_MAX_ROOMS;
use crate::utils::error::{BookingError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_resolved, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_GATEWAY_ENDPOINT: &str = "https://bookings.skyrooms.in/bookapi";
pub const DEFAULT_EMAIL_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

pub const ENV_GATEWAY_ENDPOINT: &str = "SKYHMS_ENDPOINT";
pub const ENV_PROPERTY_ID: &str = "SKYHMS_PROP_ID";
pub const ENV_ACCESS_KEY: &str = "SKYHMS_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfig {
    pub gateway: GatewayConfig,
    pub booking: Option<BookingRules>,
    pub notification: Option<NotificationConfig>,
}

/// How the booking intent travels to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum TransportStrategy {
    /// JSON body, reply interpreted.
    #[default]
    JsonPost,
    /// URL-encoded body, reply interpreted.
    FormPost,
    /// Single `apikey` form field carrying the JSON payload; reply not observed.
    DispatchForm,
    /// No network; fixed outcome.
    Stub,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_gateway_endpoint")]
    pub endpoint: String,
    pub property_id: u32,
    pub access_key: String,
    #[serde(default)]
    pub transport: TransportStrategy,
    #[serde(default)]
    pub on_ambiguous_response: AmbiguousResponsePolicy,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRules {
    pub max_rooms: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    #[serde(default = "default_email_endpoint")]
    pub endpoint: String,
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    #[serde(default = "default_recipient_name")]
    pub recipient_name: String,
    pub recipient_email: String,
    pub timeout_seconds: Option<u64>,
}

fn default_gateway_endpoint() -> String {
    DEFAULT_GATEWAY_ENDPOINT.to_string()
}

fn default_email_endpoint() -> String {
    DEFAULT_EMAIL_ENDPOINT.to_string()
}

fn default_recipient_name() -> String {
    "Hotel Manager".to_string()
}

impl BookingConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BookingError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| BookingError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 只用環境變數組出配置（沒有設定檔時）
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            gateway: GatewayConfig::from_env()?,
            booking: None,
            notification: None,
        })
    }

    /// 替換環境變數 (例如 ${SKYHMS_API_KEY})，找不到的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| BookingError::ConfigError {
            message: format!("placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn max_rooms(&self) -> u32 {
        self.booking
            .as_ref()
            .and_then(|b| b.max_rooms)
            .unwrap_or(DEFAULT_MAX_ROOMS)
    }

    pub fn notification(&self) -> Result<&NotificationConfig> {
        self.notification
            .as_ref()
            .ok_or_else(|| BookingError::MissingConfigError {
                field: "notification".to_string(),
            })
    }
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self> {
        let endpoint =
            std::env::var(ENV_GATEWAY_ENDPOINT).unwrap_or_else(|_| default_gateway_endpoint());

        let raw_property_id =
            std::env::var(ENV_PROPERTY_ID).map_err(|_| BookingError::MissingConfigError {
                field: ENV_PROPERTY_ID.to_string(),
            })?;
        let property_id =
            raw_property_id
                .trim()
                .parse::<u32>()
                .map_err(|e| BookingError::InvalidConfigValueError {
                    field: ENV_PROPERTY_ID.to_string(),
                    value: raw_property_id.clone(),
                    reason: format!("Property id must be an integer: {}", e),
                })?;

        let access_key =
            std::env::var(ENV_ACCESS_KEY).map_err(|_| BookingError::MissingConfigError {
                field: ENV_ACCESS_KEY.to_string(),
            })?;

        Ok(Self {
            endpoint,
            property_id,
            access_key,
            transport: TransportStrategy::default(),
            on_ambiguous_response: AmbiguousResponsePolicy::default(),
            timeout_seconds: None,
        })
    }
}

impl Validate for GatewayConfig {
    fn validate(&self) -> Result<()> {
        if self.transport != TransportStrategy::Stub {
            validate_url("gateway.endpoint", &self.endpoint)?;
        }
        validate_range("gateway.property_id", self.property_id, 1, u32::MAX)?;
        validate_non_empty_string("gateway.access_key", &self.access_key)?;
        validate_resolved("gateway.access_key", &self.access_key)?;
        if let Some(timeout) = self.timeout_seconds {
            validate_range("gateway.timeout_seconds", timeout, 1, 300)?;
        }
        Ok(())
    }
}

impl Validate for NotificationConfig {
    fn validate(&self) -> Result<()> {
        validate_url("notification.endpoint", &self.endpoint)?;
        for (field, value) in [
            ("notification.service_id", &self.service_id),
            ("notification.template_id", &self.template_id),
            ("notification.public_key", &self.public_key),
            ("notification.recipient_email", &self.recipient_email),
        ] {
            validate_non_empty_string(field, value)?;
            validate_resolved(field, value)?;
        }
        Ok(())
    }
}

impl Validate for BookingConfig {
    fn validate(&self) -> Result<()> {
        self.gateway.validate()?;
        validate_range("booking.max_rooms", self.max_rooms(), 1, 50)?;
        if let Some(notification) = &self.notification {
            notification.validate()?;
        }
        Ok(())
    }
}
