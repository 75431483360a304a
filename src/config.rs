//! Configuration for leadform.
//!
//! Settings are read from `.leadform/leadform.toml` and layered
//! file → environment → CLI. Every key is optional; the defaults reproduce the
//! Fast Friday landing page.
//!
//! # Configuration File Format
//!
//! ```toml
//! [webhook]
//! url = "https://n8n.unitycompany.com.br/webhook/lp-fast-friday"
//!
//! [metadata]
//! form_id = "fast-friday-whatsapp-group"
//! form_version = "1.0"
//! source = "landing-page"
//!
//! [redirect]
//! target = "redirect.html"
//!
//! [phone]
//! country_code = "55"
//!
//! [delivery]
//! assume_success = true
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use leadform_common::PayloadMetadata;

use crate::orchestrator::SubmissionSettings;
use crate::phone::{DEFAULT_COUNTRY_CODE, PhoneMask};
use crate::transport::parse_endpoint;
use crate::validation::FieldValidator;

/// Environment variable overriding `[webhook] url`.
pub const WEBHOOK_URL_ENV: &str = "LEADFORM_WEBHOOK_URL";
/// Environment variable overriding `[redirect] target`.
pub const REDIRECT_ENV: &str = "LEADFORM_REDIRECT";

const CONFIG_DIR: &str = ".leadform";
const CONFIG_FILE: &str = "leadform.toml";

/// Webhook endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookSection {
    #[serde(default = "default_webhook_url")]
    pub url: String,
}

fn default_webhook_url() -> String {
    "https://n8n.unitycompany.com.br/webhook/lp-fast-friday".to_string()
}

impl Default for WebhookSection {
    fn default() -> Self {
        Self {
            url: default_webhook_url(),
        }
    }
}

/// Literals identifying this integration to the receiving system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataSection {
    #[serde(default = "default_form_id")]
    pub form_id: String,
    #[serde(default = "default_form_version")]
    pub form_version: String,
    #[serde(default = "default_source")]
    pub source: String,
}

fn default_form_id() -> String {
    "fast-friday-whatsapp-group".to_string()
}

fn default_form_version() -> String {
    "1.0".to_string()
}

fn default_source() -> String {
    "landing-page".to_string()
}

impl Default for MetadataSection {
    fn default() -> Self {
        Self {
            form_id: default_form_id(),
            form_version: default_form_version(),
            source: default_source(),
        }
    }
}

impl MetadataSection {
    pub fn to_payload_metadata(&self) -> PayloadMetadata {
        PayloadMetadata {
            form_id: self.form_id.clone(),
            form_version: self.form_version.clone(),
            source: self.source.clone(),
        }
    }
}

/// Follow-up destination after a successful submit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedirectSection {
    #[serde(default = "default_redirect_target")]
    pub target: String,
}

fn default_redirect_target() -> String {
    "redirect.html".to_string()
}

impl Default for RedirectSection {
    fn default() -> Self {
        Self {
            target: default_redirect_target(),
        }
    }
}

/// Phone mask settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhoneSection {
    #[serde(default = "default_country_code")]
    pub country_code: String,
}

fn default_country_code() -> String {
    DEFAULT_COUNTRY_CODE.to_string()
}

impl Default for PhoneSection {
    fn default() -> Self {
        Self {
            country_code: default_country_code(),
        }
    }
}

/// Delivery policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliverySection {
    /// Redirect even when the webhook call fails (default: true)
    #[serde(default = "default_assume_success")]
    pub assume_success: bool,
}

fn default_assume_success() -> bool {
    true
}

impl Default for DeliverySection {
    fn default() -> Self {
        Self {
            assume_success: default_assume_success(),
        }
    }
}

/// The complete leadform.toml configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LeadformToml {
    #[serde(default)]
    pub webhook: WebhookSection,
    #[serde(default)]
    pub metadata: MetadataSection,
    #[serde(default)]
    pub redirect: RedirectSection,
    #[serde(default)]
    pub phone: PhoneSection,
    #[serde(default)]
    pub delivery: DeliverySection,
}

impl LeadformToml {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse leadform.toml")
    }

    /// Load `leadform.toml` from `config_dir`, or defaults if it doesn't exist.
    pub fn load_or_default(config_dir: &Path) -> Result<Self> {
        let config_path = config_dir.join(CONFIG_FILE);
        if config_path.exists() {
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).context("Failed to serialize leadform.toml")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Validate the configuration and return any warnings.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if let Err(e) = parse_endpoint(&self.webhook.url) {
            warnings.push(e.to_string());
        }

        let code = &self.phone.country_code;
        if code.is_empty() || !code.chars().all(|c| c.is_ascii_digit()) {
            warnings.push(format!(
                "Invalid country_code '{}': should contain digits only",
                code
            ));
        }

        for (key, value) in [
            ("form_id", &self.metadata.form_id),
            ("form_version", &self.metadata.form_version),
            ("source", &self.metadata.source),
        ] {
            if value.trim().is_empty() {
                warnings.push(format!("Empty metadata.{}", key));
            }
        }

        if self.redirect.target.trim().is_empty() {
            warnings.push("Empty redirect.target".to_string());
        }

        warnings
    }
}

/// Resolved configuration: leadform.toml plus environment and CLI overrides.
#[derive(Debug, Clone)]
pub struct LeadformConfig {
    /// Path to the project directory
    pub project_dir: PathBuf,
    /// Path to the .leadform directory
    pub config_dir: PathBuf,
    /// Parsed leadform.toml
    pub toml: LeadformToml,
    /// CLI override for the webhook URL
    pub cli_webhook_url: Option<String>,
}

impl LeadformConfig {
    /// Load configuration for a project directory.
    pub fn new(project_dir: PathBuf) -> Result<Self> {
        let config_dir = project_dir.join(CONFIG_DIR);
        let toml = LeadformToml::load_or_default(&config_dir)?;

        Ok(Self {
            project_dir,
            config_dir,
            toml,
            cli_webhook_url: None,
        })
    }

    /// Load configuration with CLI overrides.
    pub fn with_cli_args(project_dir: PathBuf, webhook_url: Option<String>) -> Result<Self> {
        let mut config = Self::new(project_dir)?;
        config.cli_webhook_url = webhook_url;
        Ok(config)
    }

    /// Path to leadform.toml.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }

    /// Webhook URL (CLI → env → file).
    pub fn webhook_url(&self) -> String {
        self.cli_webhook_url
            .clone()
            .or_else(|| std::env::var(WEBHOOK_URL_ENV).ok())
            .unwrap_or_else(|| self.toml.webhook.url.clone())
    }

    /// Redirect target (env → file).
    pub fn redirect_target(&self) -> String {
        std::env::var(REDIRECT_ENV).unwrap_or_else(|_| self.toml.redirect.target.clone())
    }

    pub fn phone_mask(&self) -> PhoneMask {
        PhoneMask::new(&self.toml.phone.country_code)
    }

    /// Settings for the submission orchestrator.
    pub fn submission_settings(&self) -> SubmissionSettings {
        SubmissionSettings {
            metadata: self.toml.metadata.to_payload_metadata(),
            redirect_to: self.redirect_target(),
            assume_delivered: self.toml.delivery.assume_success,
            validator: FieldValidator::new(self.phone_mask()),
        }
    }

    /// Validate configuration and return warnings.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = self.toml.validate();
        if let Err(e) = parse_endpoint(&self.webhook_url()) {
            let message = e.to_string();
            if !warnings.contains(&message) {
                warnings.push(message);
            }
        }
        warnings
    }

    /// Write a default leadform.toml, refusing to overwrite an existing one.
    pub fn init(&self) -> Result<PathBuf> {
        let path = self.config_file();
        if path.exists() {
            anyhow::bail!("Config file already exists: {}", path.display());
        }
        std::fs::create_dir_all(&self.config_dir).with_context(|| {
            format!(
                "Failed to create config directory: {}",
                self.config_dir.display()
            )
        })?;
        LeadformToml::default().save(&path)?;
        Ok(path)
    }
}
