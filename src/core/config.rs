//! Layered configuration
//!
//! Sources, later ones winning: built-in defaults, the user config file
//! (`~/.config/roi/config.yaml` or the platform equivalent), the project's
//! `.roi/config.yaml`, then environment variables for the webhook URL.

use directories::ProjectDirs;
use miette::{Diagnostic, NamedSource, SourceSpan};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::format::{CurrencyFormat, RUPEE};
use crate::core::project::Project;

/// Environment variable overriding the webhook URL
pub const WEBHOOK_ENV: &str = "ROI_WEBHOOK_URL";
/// Fallback variable name used by the Pages deployment
pub const LEGACY_WEBHOOK_ENV: &str = "GOOGLE_APPS_SCRIPT_URL";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("Invalid YAML in {path}")]
    #[diagnostic(code(roi::config::syntax), help("{message}"))]
    Syntax {
        path: String,
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: Option<SourceSpan>,
    },
}

/// Contact details printed on reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VendorInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub whatsapp: String,
    pub website: String,
}

impl Default for VendorInfo {
    fn default() -> Self {
        Self {
            name: "Neptune Plastics".to_string(),
            email: "nikunj@neptuneplastic.net".to_string(),
            phone: "+91 9830569698".to_string(),
            whatsapp: "+91 7439505779".to_string(),
            website: "https://neptuneplastic.net/".to_string(),
        }
    }
}

/// Effective configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub webhook_url: Option<String>,
    pub webhook_timeout_secs: u64,
    pub ledger: Option<PathBuf>,
    pub currency_symbol: String,
    pub report_dir: PathBuf,
    pub vendor: VendorInfo,
    pub logo: Option<PathBuf>,
    pub customer_logos: Vec<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            webhook_url: None,
            webhook_timeout_secs: DEFAULT_TIMEOUT_SECS,
            ledger: None,
            currency_symbol: RUPEE.to_string(),
            report_dir: PathBuf::from("reports"),
            vendor: VendorInfo::default(),
            logo: None,
            customer_logos: Vec::new(),
        }
    }
}

/// One config file; every key optional so files can be layered
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    webhook_url: Option<String>,
    webhook_timeout_secs: Option<u64>,
    ledger: Option<PathBuf>,
    currency_symbol: Option<String>,
    report_dir: Option<PathBuf>,
    vendor: Option<VendorInfo>,
    logo: Option<PathBuf>,
    customer_logos: Option<Vec<PathBuf>>,
}

impl Config {
    /// Load defaults, user config, project config and environment overrides
    pub fn load(project: Option<&Project>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(path) = user_config_path() {
            if let Some(file) = read_config_file(&path)? {
                config.apply(file);
            }
        }

        if let Some(project) = project {
            if let Some(file) = read_config_file(&project.config_path())? {
                config.apply(file);
            }
        }

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parse a single YAML document on top of the defaults
    pub fn from_yaml(content: &str, filename: &str) -> Result<Self, ConfigError> {
        let mut config = Config::default();
        config.apply(parse_config(content, filename)?);
        Ok(config)
    }

    fn apply(&mut self, file: ConfigFile) {
        if let Some(url) = file.webhook_url {
            self.webhook_url = non_empty(url);
        }
        if let Some(secs) = file.webhook_timeout_secs {
            self.webhook_timeout_secs = secs;
        }
        if let Some(ledger) = file.ledger {
            self.ledger = Some(ledger);
        }
        if let Some(symbol) = file.currency_symbol {
            self.currency_symbol = symbol;
        }
        if let Some(dir) = file.report_dir {
            self.report_dir = dir;
        }
        if let Some(vendor) = file.vendor {
            self.vendor = vendor;
        }
        if let Some(logo) = file.logo {
            self.logo = Some(logo);
        }
        if let Some(logos) = file.customer_logos {
            self.customer_logos = logos;
        }
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let url = lookup(WEBHOOK_ENV)
            .and_then(non_empty)
            .or_else(|| lookup(LEGACY_WEBHOOK_ENV).and_then(non_empty));
        if let Some(url) = url {
            log::debug!("Webhook URL taken from environment");
            self.webhook_url = Some(url);
        }
    }

    pub fn currency(&self) -> CurrencyFormat {
        CurrencyFormat::new(self.currency_symbol.clone())
    }
}

fn non_empty(s: String) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn user_config_path() -> Option<PathBuf> {
    ProjectDirs::from("net", "neptuneplastic", "roi").map(|dirs| dirs.config_dir().join("config.yaml"))
}

/// Read and parse a config file. Missing or unreadable files yield `None`;
/// a syntax error is reported.
fn read_config_file(path: &Path) -> Result<Option<ConfigFile>, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                log::warn!("Failed to read config file {}: {}", path.display(), e);
            }
            return Ok(None);
        }
    };
    log::debug!("Loaded config from {}", path.display());
    parse_config(&content, &path.display().to_string()).map(Some)
}

fn parse_config(content: &str, filename: &str) -> Result<ConfigFile, ConfigError> {
    let has_content = content
        .lines()
        .map(str::trim)
        .any(|l| !l.is_empty() && !l.starts_with('#'));
    if !has_content {
        return Ok(ConfigFile::default());
    }
    serde_yml::from_str::<ConfigFile>(content)
        .map_err(|e| ConfigError::Syntax {
            path: filename.to_string(),
            message: e.to_string(),
            span: e.location().map(|l| SourceSpan::from((l.index(), 1))),
            src: NamedSource::new(filename, content.to_string()),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.webhook_url, None);
        assert_eq!(config.webhook_timeout_secs, 10);
        assert_eq!(config.currency_symbol, "₹");
        assert_eq!(config.vendor.name, "Neptune Plastics");
    }

    #[test]
    fn test_from_yaml_overrides() {
        let yaml = r#"
webhook_url: https://example.test/hook
ledger: leads.csv
currency_symbol: "Rs. "
vendor:
  name: Test Vendor
customer_logos:
  - a.png
  - b.png
"#;
        let config = Config::from_yaml(yaml, "config.yaml").unwrap();
        assert_eq!(config.webhook_url.as_deref(), Some("https://example.test/hook"));
        assert_eq!(config.ledger, Some(PathBuf::from("leads.csv")));
        assert_eq!(config.currency().format(1000.0), "Rs. 1,000");
        assert_eq!(config.vendor.name, "Test Vendor");
        // unspecified vendor fields keep their defaults
        assert_eq!(config.vendor.email, "nikunj@neptuneplastic.net");
        assert_eq!(config.customer_logos.len(), 2);
    }

    #[test]
    fn test_blank_webhook_is_unset() {
        let config = Config::from_yaml("webhook_url: '  '", "config.yaml").unwrap();
        assert_eq!(config.webhook_url, None);
    }

    #[test]
    fn test_comment_only_file_is_empty() {
        let config = Config::from_yaml("# nothing here\n", "config.yaml").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        let result = Config::from_yaml("webhook_url: [unclosed", "config.yaml");
        assert!(matches!(result, Err(ConfigError::Syntax { .. })));
    }

    #[test]
    fn test_env_precedence() {
        let env: HashMap<&str, &str> = [
            (WEBHOOK_ENV, "https://primary.test"),
            (LEGACY_WEBHOOK_ENV, "https://legacy.test"),
        ]
        .into_iter()
        .collect();
        let mut config = Config::default();
        config.apply_env(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.webhook_url.as_deref(), Some("https://primary.test"));

        let mut config = Config::default();
        config.apply_env(|k| {
            (k == LEGACY_WEBHOOK_ENV).then(|| "https://legacy.test".to_string())
        });
        assert_eq!(config.webhook_url.as_deref(), Some("https://legacy.test"));
    }

    #[test]
    fn test_load_reads_project_config() {
        let tmp = tempfile::TempDir::new().unwrap();
        let project = Project::init(tmp.path(), false).unwrap();
        std::fs::write(project.config_path(), "ledger: out/leads.csv\nreport_dir: out\n").unwrap();
        let config = Config::load(Some(&project)).unwrap();
        assert_eq!(config.ledger, Some(PathBuf::from("out/leads.csv")));
        assert_eq!(config.report_dir, PathBuf::from("out"));
    }
}
