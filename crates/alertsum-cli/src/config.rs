use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use alertsum_adapters::mail::{recipient_addresses, SmtpConfig};
use alertsum_adapters::render::DEFAULT_TITLE;
use alertsum_adapters::zabbix::ZabbixConfig;
use alertsum_app::pipeline::DeliverySettings;

pub const CONFIG_ENV: &str = "ALERTSUM_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "config/alertsum.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub zabbix: ZabbixSection,
    pub smtp: SmtpSection,
    pub report: ReportSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZabbixSection {
    pub address: String,
    pub user: String,
    pub password: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpSection {
    pub host: String,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    pub username: String,
    pub password: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSection {
    #[serde(default = "default_sender_name")]
    pub sender_name: String,
    #[serde(default = "default_subject")]
    pub subject: String,
    #[serde(default = "default_title")]
    pub title: String,
    /// User names or full addresses.
    pub recipients: Vec<String>,
    /// Appended to recipients given without a domain.
    #[serde(default)]
    pub recipient_domain: String,
    #[serde(default)]
    pub attachments: Vec<PathBuf>,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_smtp_port() -> u16 {
    465
}

fn default_sender_name() -> String {
    "Infrastructure".to_string()
}

fn default_subject() -> String {
    "Zabbix Alerts - Weekly Report".to_string()
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.zabbix.address.trim().is_empty() {
            return Err(ConfigError::Invalid("zabbix.address is empty".into()));
        }
        if self.smtp.host.trim().is_empty() {
            return Err(ConfigError::Invalid("smtp.host is empty".into()));
        }
        if self.recipients().is_empty() {
            return Err(ConfigError::Invalid("report.recipients is empty".into()));
        }
        let bare = self
            .report
            .recipients
            .iter()
            .any(|r| !r.trim().is_empty() && !r.contains('@'));
        if bare && self.report.recipient_domain.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "report.recipient_domain is required for recipients without a domain".into(),
            ));
        }
        Ok(())
    }

    pub fn recipients(&self) -> Vec<String> {
        recipient_addresses(&self.report.recipients, &self.report.recipient_domain)
    }

    pub fn zabbix_config(&self) -> ZabbixConfig {
        ZabbixConfig {
            address: self.zabbix.address.clone(),
            timeout: Duration::from_secs(self.zabbix.timeout_secs),
        }
    }

    pub fn smtp_config(&self) -> SmtpConfig {
        SmtpConfig {
            host: self.smtp.host.clone(),
            port: self.smtp.port,
            username: self.smtp.username.clone(),
            password: self.smtp.password.clone(),
            timeout: Duration::from_secs(self.smtp.timeout_secs),
        }
    }

    pub fn delivery_settings(&self) -> DeliverySettings {
        DeliverySettings {
            sender_name: self.report.sender_name.clone(),
            recipients: self.recipients(),
            subject: self.report.subject.clone(),
            attachments: self.report.attachments.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MINIMAL: &str = r#"
[zabbix]
address = "zabbix.example.com"
user = "report"
password = "secret"

[smtp]
host = "smtp.example.com"
username = "reports@example.com"
password = "secret"

[report]
recipients = ["alice", "bob@other.org"]
recipient_domain = "example.com"
"#;

    #[test]
    fn defaults_fill_optional_fields() {
        let config = AppConfig::parse(MINIMAL).unwrap();
        assert_eq!(config.zabbix.timeout_secs, 30);
        assert_eq!(config.smtp.port, 465);
        assert_eq!(config.report.sender_name, "Infrastructure");
        assert_eq!(config.report.subject, "Zabbix Alerts - Weekly Report");
        assert!(config.report.attachments.is_empty());
    }

    #[test]
    fn recipients_expand_with_domain() {
        let config = AppConfig::parse(MINIMAL).unwrap();
        assert_eq!(
            config.delivery_settings().recipients,
            vec!["alice@example.com", "bob@other.org"]
        );
    }

    #[test]
    fn adapter_configs_carry_values() {
        let config = AppConfig::parse(MINIMAL).unwrap();
        let zabbix = config.zabbix_config();
        assert_eq!(zabbix.address, "zabbix.example.com");
        assert_eq!(zabbix.timeout, Duration::from_secs(30));
        let smtp = config.smtp_config();
        assert_eq!(smtp.host, "smtp.example.com");
        assert_eq!(smtp.username, "reports@example.com");
    }

    #[test]
    fn empty_recipients_rejected() {
        let content = MINIMAL.replace(r#"["alice", "bob@other.org"]"#, "[]");
        let err = AppConfig::parse(&content).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("recipients")));
    }

    #[test]
    fn bare_recipient_needs_domain() {
        let content = MINIMAL.replace(r#"recipient_domain = "example.com""#, "");
        let err = AppConfig::parse(&content).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("recipient_domain")));
    }

    #[test]
    fn missing_section_is_parse_error() {
        let err = AppConfig::parse("[zabbix]\naddress = \"x\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MINIMAL.as_bytes()).unwrap();
        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.zabbix.user, "report");
    }

    #[test]
    fn load_missing_file_reports_path() {
        let err = AppConfig::load(Path::new("/nonexistent/alertsum.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/alertsum.toml"));
    }
}
