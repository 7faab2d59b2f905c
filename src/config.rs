use crate::error::{config_error, env_error, EngineResult};
use chrono_tz::Tz;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Default actor recorded on saves when the caller does not name one
pub const DEFAULT_ACTOR: &str = "system";

/// Default location of the optional TOML overlay
pub const CONFIG_FILE: &str = "config/scheduler.toml";

/// What `delete` does with an id that is not in the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeletePolicy {
    /// Report `NotFound`
    #[default]
    #[serde(alias = "error")]
    Strict,
    /// Treat the delete as already done
    #[serde(alias = "ignore")]
    Idempotent,
}

impl FromStr for DeletePolicy {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "error" | "strict" => Ok(DeletePolicy::Strict),
            "ignore" | "idempotent" => Ok(DeletePolicy::Idempotent),
            other => Err(config_error(&format!("Unknown delete policy: {}", other))),
        }
    }
}

impl fmt::Display for DeletePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeletePolicy::Strict => write!(f, "error"),
            DeletePolicy::Idempotent => write!(f, "ignore"),
        }
    }
}

/// Main configuration structure for the scheduler
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// IANA timezone used to decide what "today" is for drafts
    pub timezone: String,
    /// Actor recorded in the audit trail for console saves
    pub default_actor: String,
    /// Behaviour of deletes for unknown ids
    pub delete_policy: DeletePolicy,
    /// Bounded mailbox size for the engine and audit actors
    pub mailbox_capacity: usize,
    /// Optional JSON-lines file the audit actor appends to
    pub audit_log_path: Option<String>,
    /// Load the sample calendar at startup
    pub seed_demo_events: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
            default_actor: DEFAULT_ACTOR.to_string(),
            delete_policy: DeletePolicy::Strict,
            mailbox_capacity: 32,
            audit_log_path: None,
            seed_demo_events: false,
        }
    }
}

/// Subset of the config that may appear in the TOML overlay
#[derive(Debug, Default, Deserialize)]
struct FileOverlay {
    timezone: Option<String>,
    default_actor: Option<String>,
    delete_policy: Option<DeletePolicy>,
    mailbox_capacity: Option<usize>,
    audit_log_path: Option<String>,
    seed_demo_events: Option<bool>,
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> EngineResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let mut config = Config::default();

        if let Ok(timezone) = env::var("TIMEZONE") {
            config.timezone = timezone;
        }
        if let Ok(actor) = env::var("SCHEDULER_ACTOR") {
            config.default_actor = actor;
        }
        if let Ok(policy) = env::var("DELETE_MISSING") {
            config.delete_policy = policy.parse()?;
        }
        if let Ok(capacity) = env::var("ACTOR_MAILBOX_CAPACITY") {
            config.mailbox_capacity = capacity
                .parse::<usize>()
                .map_err(|_| env_error("ACTOR_MAILBOX_CAPACITY"))?;
        }
        if let Ok(path) = env::var("AUDIT_LOG_PATH") {
            if !path.trim().is_empty() {
                config.audit_log_path = Some(path);
            }
        }
        if let Ok(seed) = env::var("SEED_DEMO_EVENTS") {
            config.seed_demo_events = parse_flag(&seed).ok_or_else(|| env_error("SEED_DEMO_EVENTS"))?;
        }

        // File values override the environment
        if Path::new(CONFIG_FILE).exists() {
            let content = fs::read_to_string(CONFIG_FILE)?;
            config.apply_toml(&content)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Merge a TOML overlay into this config
    pub fn apply_toml(&mut self, content: &str) -> EngineResult<()> {
        let overlay: FileOverlay = toml::from_str(content)?;

        if let Some(timezone) = overlay.timezone {
            self.timezone = timezone;
        }
        if let Some(actor) = overlay.default_actor {
            self.default_actor = actor;
        }
        if let Some(policy) = overlay.delete_policy {
            self.delete_policy = policy;
        }
        if let Some(capacity) = overlay.mailbox_capacity {
            self.mailbox_capacity = capacity;
        }
        if overlay.audit_log_path.is_some() {
            self.audit_log_path = overlay.audit_log_path;
        }
        if let Some(seed) = overlay.seed_demo_events {
            self.seed_demo_events = seed;
        }

        Ok(())
    }

    /// Check values that cannot be expressed in the types
    pub fn validate(&self) -> EngineResult<()> {
        self.tz()?;
        if self.mailbox_capacity == 0 {
            return Err(config_error("mailbox_capacity must be greater than zero"));
        }
        if self.default_actor.trim().is_empty() {
            return Err(config_error("default_actor must not be empty"));
        }
        Ok(())
    }

    /// Parsed timezone
    pub fn tz(&self) -> EngineResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| config_error(&format!("Unknown timezone: {}", self.timezone)))
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.delete_policy, DeletePolicy::Strict);
        assert_eq!(config.tz().unwrap(), chrono_tz::UTC);
    }

    #[test]
    fn test_toml_overlay() {
        let mut config = Config::default();
        config
            .apply_toml(
                r#"
                timezone = "Europe/Helsinki"
                delete_policy = "ignore"
                mailbox_capacity = 8
                "#,
            )
            .unwrap();

        assert_eq!(config.timezone, "Europe/Helsinki");
        assert_eq!(config.delete_policy, DeletePolicy::Idempotent);
        assert_eq!(config.mailbox_capacity, 8);
        assert_eq!(config.default_actor, DEFAULT_ACTOR);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let mut config = Config::default();
        config.timezone = "Mars/Olympus".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.mailbox_capacity = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        assert!(config.apply_toml("mailbox_capacity = \"lots\"").is_err());
    }

    #[test]
    fn test_delete_policy_parsing() {
        assert_eq!("error".parse::<DeletePolicy>().unwrap(), DeletePolicy::Strict);
        assert_eq!("Ignore".parse::<DeletePolicy>().unwrap(), DeletePolicy::Idempotent);
        assert!("sometimes".parse::<DeletePolicy>().is_err());
        assert_eq!(parse_flag("yes"), Some(true));
        assert_eq!(parse_flag("maybe"), None);
    }
}
