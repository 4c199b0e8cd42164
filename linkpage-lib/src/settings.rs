use crate::export_import::DEFAULT_FILE_PREFIX;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

fn default_file_prefix() -> String {
    DEFAULT_FILE_PREFIX.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Export file options
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExportSettings {
    /// Stem of generated export file names
    /// Defaults to "onelink"
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
    /// Directory export files are written to
    /// If not specified, the current directory is used
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            file_prefix: default_file_prefix(),
            output_dir: None,
        }
    }
}

/// Logging options for the binaries; `RUST_LOG` takes precedence
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingSettings {
    /// Default filter directive, e.g. "info" or "linkpage=debug"
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Root structure of the `linkpage.yaml` settings file
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    #[serde(default)]
    pub export: ExportSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl Settings {
    /// Directory exports go to, the current directory when unset
    pub fn output_dir(&self) -> &Path {
        self.export
            .output_dir
            .as_deref()
            .unwrap_or_else(|| Path::new("."))
    }
}

/// Validates that a file prefix can be used as a file name stem
fn validate_file_prefix(prefix: &str) -> Result<(), String> {
    let Some(first_char) = prefix.chars().next() else {
        return Err("File prefix cannot be empty".to_string());
    };

    if !first_char.is_ascii_alphabetic() {
        return Err(format!("File prefix '{}' must start with a letter", prefix));
    }

    // Check for invalid characters
    for ch in prefix.chars() {
        if !ch.is_ascii_alphanumeric() && ch != '_' && ch != '-' {
            return Err(format!(
                "File prefix '{}' contains invalid character '{}'. Only letters, numbers, '-' and '_' are allowed",
                prefix, ch
            ));
        }
    }

    Ok(())
}

/// Parse a YAML settings file and validate it
pub async fn parse_settings_file<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let content = fs::read_to_string(&path)
        .await
        .with_context(|| format!("Failed to read settings file: {}", path.as_ref().display()))?;

    let settings = parse_settings_string(&content)?;

    validate_settings(&settings)?;

    Ok(settings)
}

/// Parse a YAML string into settings; an empty document yields the defaults
pub fn parse_settings_string(content: &str) -> Result<Settings> {
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }

    let settings: Settings =
        serde_yaml::from_str(content).with_context(|| "Failed to parse settings YAML")?;

    Ok(settings)
}

/// Check values serde cannot check on its own
pub fn validate_settings(settings: &Settings) -> Result<()> {
    if let Err(error) = validate_file_prefix(&settings.export.file_prefix) {
        anyhow::bail!("Invalid export settings: {}", error);
    }
    if settings.logging.level.trim().is_empty() {
        anyhow::bail!("Invalid logging settings: level cannot be empty");
    }
    Ok(())
}

/// Load settings from `path` when given, otherwise use the defaults
pub async fn load_settings(path: Option<&Path>) -> Result<Settings> {
    match path {
        Some(path) => parse_settings_file(path).await,
        None => Ok(Settings::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_settings_string() {
        let settings = parse_settings_string(
            r#"
export:
  file_prefix: mylinks
  output_dir: exports
logging:
  level: debug
"#,
        )
        .unwrap();
        assert_eq!(settings.export.file_prefix, "mylinks");
        assert_eq!(settings.output_dir(), Path::new("exports"));
        assert_eq!(settings.logging.level, "debug");
    }

    #[test]
    fn test_defaults() {
        let settings = parse_settings_string("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.export.file_prefix, "onelink");
        assert_eq!(settings.output_dir(), Path::new("."));

        let settings = parse_settings_string("logging:\n  level: warn\n").unwrap();
        assert_eq!(settings.export.file_prefix, "onelink");
    }

    #[test]
    fn test_validate_file_prefix() {
        assert!(validate_file_prefix("onelink").is_ok());
        assert!(validate_file_prefix("my-links_2").is_ok());
        assert_eq!(
            validate_file_prefix(""),
            Err("File prefix cannot be empty".to_string())
        );
        assert!(validate_file_prefix("1links").unwrap_err().contains("start with a letter"));
        assert!(validate_file_prefix("my/links")
            .unwrap_err()
            .contains("invalid character '/'"));
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        assert!(parse_settings_string("export: [unclosed").is_err());
    }

    #[tokio::test]
    async fn test_parse_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("linkpage.yaml");
        tokio::fs::write(&path, "export:\n  file_prefix: bad prefix\n")
            .await
            .unwrap();

        let err = parse_settings_file(&path).await.unwrap_err();
        assert!(err.to_string().contains("Invalid export settings"));

        assert!(parse_settings_file(dir.path().join("missing.yaml")).await.is_err());
        assert_eq!(load_settings(None).await.unwrap(), Settings::default());
    }
}
