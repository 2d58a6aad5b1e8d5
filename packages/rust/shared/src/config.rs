//! Application configuration for toponymy.
//!
//! User config lives at `~/.toponymy/toponymy.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, ToponymyError};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "toponymy.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".toponymy";

/// Romanian uppercase diacritics found in the toponymy dictionaries.
pub const DEFAULT_EXTRA_UPPERCASE: &str = "ĂÂÎȘȚ";

/// Shortest heading token (letters and hyphens, before any digits).
pub const DEFAULT_MIN_TOKEN_LEN: usize = 1;

// ---------------------------------------------------------------------------
// Config structs (matching toponymy.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Extraction defaults.
    #[serde(default)]
    pub extract: ExtractDefaults,

    /// Heading detection.
    #[serde(default)]
    pub headings: HeadingsConfig,

    /// Text report layout.
    #[serde(default)]
    pub report: ReportConfig,
}

/// `[extract]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractDefaults {
    /// Keywords searched for in entry paragraphs.
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,

    /// Report output path.
    #[serde(default = "default_output")]
    pub output: String,

    /// Report format: "text" or "json".
    #[serde(default)]
    pub format: ReportFormat,
}

impl Default for ExtractDefaults {
    fn default() -> Self {
        Self {
            keywords: default_keywords(),
            output: default_output(),
            format: ReportFormat::default(),
        }
    }
}

fn default_keywords() -> Vec<String> {
    ["pădur", "codr", "fiton", "dendron"]
        .into_iter()
        .map(String::from)
        .collect()
}
fn default_output() -> String {
    "rezultate_padure_codru.txt".into()
}

/// `[headings]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadingsConfig {
    /// Uppercase letters accepted in headings besides `A-Z`.
    #[serde(default = "default_extra_uppercase")]
    pub extra_uppercase: String,

    /// Minimum heading token length before trailing digits.
    #[serde(default = "default_min_token_len")]
    pub min_token_len: usize,
}

impl Default for HeadingsConfig {
    fn default() -> Self {
        Self {
            extra_uppercase: default_extra_uppercase(),
            min_token_len: default_min_token_len(),
        }
    }
}

fn default_extra_uppercase() -> String {
    DEFAULT_EXTRA_UPPERCASE.into()
}
fn default_min_token_len() -> usize {
    DEFAULT_MIN_TOKEN_LEN
}

/// `[report]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Label printed before each heading.
    #[serde(default = "default_entry_label")]
    pub entry_label: String,

    /// Label printed before each paragraph number.
    #[serde(default = "default_paragraph_label")]
    pub paragraph_label: String,

    /// Width of the separator rules.
    #[serde(default = "default_rule_width")]
    pub rule_width: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            entry_label: default_entry_label(),
            paragraph_label: default_paragraph_label(),
            rule_width: default_rule_width(),
        }
    }
}

fn default_entry_label() -> String {
    "INTRARE".into()
}
fn default_paragraph_label() -> String {
    "Paragraf".into()
}
fn default_rule_width() -> usize {
    50
}

/// Output format of the report file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Numbered paragraphs under ruled headings.
    #[default]
    Text,
    /// Ordered JSON object with run metadata.
    Json,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Json => f.write_str("json"),
        }
    }
}

// ---------------------------------------------------------------------------
// Extract config (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime extraction configuration, merged from config file + CLI flags.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Keywords to match.
    pub keywords: Vec<String>,
    /// Report output path.
    pub output: PathBuf,
    /// Report format.
    pub format: ReportFormat,
    /// Extra uppercase letters for heading detection.
    pub extra_uppercase: String,
    /// Minimum heading token length.
    pub min_token_len: usize,
    /// Text report layout.
    pub report: ReportConfig,
}

impl From<&AppConfig> for ExtractConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            keywords: config.extract.keywords.clone(),
            output: PathBuf::from(&config.extract.output),
            format: config.extract.format,
            extra_uppercase: config.headings.extra_uppercase.clone(),
            min_token_len: config.headings.min_token_len,
            report: config.report.clone(),
        }
    }
}

impl ExtractConfig {
    /// Reject settings that cannot produce a readable report.
    pub fn validate(&self) -> Result<()> {
        if self.report.rule_width == 0 {
            return Err(ToponymyError::validation("report.rule_width must be at least 1"));
        }
        if self.min_token_len == 0 {
            return Err(ToponymyError::validation("headings.min_token_len must be at least 1"));
        }
        if self.output.as_os_str().is_empty() {
            return Err(ToponymyError::validation("output path is empty"));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.toponymy/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| ToponymyError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.toponymy/toponymy.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| ToponymyError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| ToponymyError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| ToponymyError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| ToponymyError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| ToponymyError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("keywords"));
        assert!(toml_str.contains("extra_uppercase"));
        assert!(toml_str.contains("INTRARE"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.extract.keywords, ["pădur", "codr", "fiton", "dendron"]);
        assert_eq!(parsed.headings.extra_uppercase, DEFAULT_EXTRA_UPPERCASE);
        assert_eq!(parsed.headings.min_token_len, 1);
        assert_eq!(parsed.report.rule_width, 50);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let toml_str = r#"
[extract]
keywords = ["brad", "stejar"]
format = "json"

[headings]
extra_uppercase = "ĂÂÎȘȚŞŢ"
min_token_len = 2
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.extract.keywords, ["brad", "stejar"]);
        assert_eq!(config.extract.format, ReportFormat::Json);
        assert_eq!(config.extract.output, "rezultate_padure_codru.txt");
        assert_eq!(config.headings.extra_uppercase, "ĂÂÎȘȚŞŢ");
        assert_eq!(config.headings.min_token_len, 2);
        assert_eq!(config.report.paragraph_label, "Paragraf");
    }

    #[test]
    fn unknown_format_is_rejected() {
        let toml_str = "[extract]\nformat = \"yaml\"\n";
        assert!(toml::from_str::<AppConfig>(toml_str).is_err());
    }

    #[test]
    fn extract_config_from_app_config() {
        let app = AppConfig::default();
        let extract = ExtractConfig::from(&app);
        assert_eq!(extract.keywords.len(), 4);
        assert_eq!(extract.output, PathBuf::from("rezultate_padure_codru.txt"));
        assert_eq!(extract.format, ReportFormat::Text);
        assert!(extract.validate().is_ok());
    }

    #[test]
    fn zero_rule_width_fails_validation() {
        let mut extract = ExtractConfig::from(&AppConfig::default());
        extract.report.rule_width = 0;
        let err = extract.validate().unwrap_err();
        assert!(err.to_string().contains("rule_width"));
    }

    #[test]
    fn zero_min_token_len_fails_validation() {
        let mut extract = ExtractConfig::from(&AppConfig::default());
        extract.min_token_len = 0;
        let err = extract.validate().unwrap_err();
        assert!(err.to_string().contains("min_token_len"));
    }

    #[test]
    fn load_config_from_reports_parse_errors() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[extract\nkeywords = 3").expect("write");

        let err = load_config_from(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse"));
    }
}
