use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use consult_core::{EmailAddress, FormSettings};
use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "consult";
const CONFIG_FILENAME: &str = "config.toml";

pub const DEFAULT_RECIPIENT: &str = "info@landisventures.com";
pub const DEFAULT_SITE_NAME: &str = "Landis Ventures";
pub const DEFAULT_PHONE: &str = "+1 (555) LANDIS-1";
pub const DEFAULT_HOURS: &str = "Monday - Friday: 9AM - 6PM EST";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub recipient: String,
    pub site_name: String,
    pub contact: ContactConfig,
    pub notifications: NotificationsConfig,
    pub dispatch: DispatchConfig,
}

/// Details shown next to the form.
#[derive(Debug, Clone)]
pub struct ContactConfig {
    pub phone: String,
    pub hours: String,
}

#[derive(Debug, Clone)]
pub struct NotificationsConfig {
    pub enabled: bool,
    pub backend: NotificationBackend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationBackend {
    Stdout,
    Desktop,
}

#[derive(Debug, Clone)]
pub struct DispatchConfig {
    pub mode: DispatchMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchMode {
    /// Hand the mailto URL to the platform's default handler.
    Open,
    /// Print the mailto URL instead of opening it.
    Print,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            recipient: DEFAULT_RECIPIENT.to_string(),
            site_name: DEFAULT_SITE_NAME.to_string(),
            contact: ContactConfig {
                phone: DEFAULT_PHONE.to_string(),
                hours: DEFAULT_HOURS.to_string(),
            },
            notifications: NotificationsConfig {
                enabled: true,
                backend: NotificationBackend::Stdout,
            },
            dispatch: DispatchConfig {
                mode: DispatchMode::Open,
            },
        }
    }
}

impl AppConfig {
    pub fn form_settings(&self) -> Result<FormSettings> {
        Ok(FormSettings {
            recipient: parse_recipient(&self.recipient)?,
            site_name: self.site_name.clone(),
        })
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("invalid recipient address: {0}")]
    InvalidRecipient(String),
    #[error("site_name cannot be empty")]
    EmptySiteName,
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    recipient: Option<String>,
    site_name: Option<String>,
    contact: Option<ContactFile>,
    notifications: Option<NotificationsFile>,
    dispatch: Option<DispatchFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ContactFile {
    phone: Option<String>,
    hours: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NotificationsFile {
    enabled: Option<bool>,
    backend: Option<NotificationBackend>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DispatchFile {
    mode: Option<DispatchMode>,
}

pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed)?))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(recipient) = parsed.recipient {
        config.recipient = parse_recipient(&recipient)?.to_string();
    }

    if let Some(site_name) = parsed.site_name {
        let trimmed = site_name.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::EmptySiteName);
        }
        config.site_name = trimmed.to_string();
    }

    if let Some(contact) = parsed.contact {
        if let Some(phone) = contact.phone {
            config.contact.phone = phone;
        }
        if let Some(hours) = contact.hours {
            config.contact.hours = hours;
        }
    }

    if let Some(notifications) = parsed.notifications {
        if let Some(enabled) = notifications.enabled {
            config.notifications.enabled = enabled;
        }
        if let Some(backend) = notifications.backend {
            config.notifications.backend = backend;
        }
    }

    if let Some(mode) = parsed.dispatch.and_then(|dispatch| dispatch.mode) {
        config.dispatch.mode = mode;
    }

    Ok(config)
}

fn parse_recipient(raw: &str) -> Result<EmailAddress> {
    raw.parse()
        .map_err(|_| ConfigError::InvalidRecipient(raw.to_string()))
}
