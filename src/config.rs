//! qrmaker runtime configuration handling

use crate::encoding::EncoderOptions;
use crate::error::{Error, Result};
use crate::render::{Color, DEFAULT_SIZE, RenderOptions};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level configuration structure read from disk or environment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QrmakerConfig {
    /// Default render parameters
    pub render: RenderDefaults,
    /// Encoder behaviour
    pub encoder: EncoderOptions,
    /// Export destination
    pub export: ExportOptions,
    /// Logging configuration
    pub logging: LoggingOptions,
}

impl QrmakerConfig {
    /// Load configuration from an explicit path or fall back to discovered defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = if let Some(path) = explicit_path {
            Self::from_file(path)?
        } else if let Some(path) = Self::discover_file()? {
            tracing::info!("Using configuration file: {}", path.display());
            Self::from_file(&path)?
        } else {
            tracing::debug!("No qrmaker.toml / qrmaker.yaml found, using defaults");
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Attempt to locate a configuration file in common locations.
    fn discover_file() -> Result<Option<PathBuf>> {
        let cwd =
            env::current_dir().map_err(|e| Error::Config(format!("Failed to read cwd: {e}")))?;
        for candidate in ["qrmaker.toml", "qrmaker.yaml", "qrmaker.yml"] {
            let path = cwd.join(candidate);
            if path.exists() {
                return Ok(Some(path));
            }
        }

        if let Some(xdg_config) = env::var_os("XDG_CONFIG_HOME") {
            let base = PathBuf::from(xdg_config).join("qrmaker");
            for candidate in ["config.toml", "config.yaml"] {
                let path = base.join(candidate);
                if path.exists() {
                    return Ok(Some(path));
                }
            }
        }

        Ok(None)
    }

    /// Read configuration from a concrete file path.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {e}", path.display())))?;

        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase()
            .as_str()
        {
            "toml" => toml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse TOML {}: {e}", path.display()))
            }),
            "yaml" | "yml" => serde_yaml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse YAML {}: {e}", path.display()))
            }),
            other => Err(Error::Config(format!(
                "Unsupported config format '{}', expected toml/yaml",
                other
            ))),
        }
    }

    /// Apply environment variable overrides after file/default loading.
    fn apply_env_overrides(&mut self) {
        self.render.apply_env_overrides();
        apply_encoder_env_overrides(&mut self.encoder);
        self.export.apply_env_overrides();
        self.logging.apply_env_overrides();
    }

    /// Produce validated render options.
    pub fn render_options(&self) -> Result<RenderOptions> {
        self.render.to_render_options()
    }
}

/// User-facing render defaults, validated into [`RenderOptions`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderDefaults {
    /// Foreground color: palette name or `#RRGGBB`
    pub color: String,
    /// Output size in pixels
    pub size: u32,
}

impl Default for RenderDefaults {
    fn default() -> Self {
        Self {
            color: "black".to_string(),
            size: DEFAULT_SIZE,
        }
    }
}

impl RenderDefaults {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(color) = env::var("QRMAKER_COLOR") {
            self.color = color;
        }
        if let Ok(size) = env::var("QRMAKER_SIZE") {
            if let Ok(parsed) = size.parse::<u32>() {
                self.size = parsed;
            }
        }
    }

    /// Validate into render options.
    pub fn to_render_options(&self) -> Result<RenderOptions> {
        let color = Color::parse(&self.color)
            .map_err(|e| Error::Config(format!("render.color: {e}")))?;
        RenderOptions::new(color, self.size).map_err(|e| Error::Config(format!("render.size: {e}")))
    }
}

fn apply_encoder_env_overrides(options: &mut EncoderOptions) {
    if let Some(trim) = env_flag("QRMAKER_TRIM_TEXT") {
        options.trim_text = trim;
    }
    if let Some(escape) = env_flag("QRMAKER_ESCAPE_VCARD") {
        options.escape_vcard = escape;
    }
}

/// Where exported PNG files go
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Directory that receives `qrcode-<mode>.png`
    pub directory: PathBuf,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
        }
    }
}

impl ExportOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(dir) = env::var("QRMAKER_EXPORT_DIR") {
            if !dir.trim().is_empty() {
                self.directory = PathBuf::from(dir);
            }
        }
    }
}

/// Structured logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingOptions {
    /// Default log level (overridable via `QRMAKER_LOG_LEVEL`)
    pub level: String,
    /// Optional log file path for teeing structured logs
    pub file: Option<PathBuf>,
    /// Force ANSI colors in terminal logging
    pub color: bool,
    /// Optional log rotation strategy applied to `file`
    pub rotation: Option<LogRotation>,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
            color: true,
            rotation: None,
        }
    }
}

impl LoggingOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(level) = env::var("QRMAKER_LOG_LEVEL") {
            self.level = level;
        }
        if let Ok(file) = env::var("QRMAKER_LOG_FILE") {
            self.file = Some(PathBuf::from(file));
        }
        if let Some(color) = env_flag("QRMAKER_LOG_COLOR") {
            self.color = color;
        }
        if let Ok(rotation) = env::var("QRMAKER_LOG_ROTATION") {
            if let Some(parsed) = LogRotation::parse(&rotation) {
                self.rotation = Some(parsed);
            }
        }
    }
}

/// Supported log rotation policies for file sinks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    /// Rotate log files once per hour
    Hourly,
    /// Rotate log files once per day
    Daily,
}

impl LogRotation {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "hourly" => Some(Self::Hourly),
            "daily" => Some(Self::Daily),
            _ => None,
        }
    }
}

fn env_flag(name: &str) -> Option<bool> {
    let value = env::var(name).ok()?;
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = QrmakerConfig::default();
        assert_eq!(config.render.color, "black");
        assert_eq!(config.render.size, DEFAULT_SIZE);
        assert!(config.encoder.trim_text);
        assert!(config.encoder.escape_vcard);
        assert_eq!(config.export.directory, PathBuf::from("."));
        assert_eq!(config.render_options().unwrap(), RenderOptions::default());
    }

    #[test]
    fn test_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qrmaker.toml");
        fs::write(
            &path,
            r##"
[render]
color = "#112233"
size = 256

[encoder]
escape_vcard = false

[logging]
level = "debug"
rotation = "daily"
"##,
        )
        .unwrap();

        let config = QrmakerConfig::from_file(&path).unwrap();
        let options = config.render_options().unwrap();
        assert_eq!(options.foreground(), Color([0x11, 0x22, 0x33]));
        assert_eq!(options.size(), 256);
        assert!(config.encoder.trim_text);
        assert!(!config.encoder.escape_vcard);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.rotation, Some(LogRotation::Daily));
    }

    #[test]
    fn test_from_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qrmaker.yaml");
        fs::write(
            &path,
            "render:\n  color: navy\nexport:\n  directory: out\n",
        )
        .unwrap();

        let config = QrmakerConfig::from_file(&path).unwrap();
        assert_eq!(config.render_options().unwrap().foreground(), Color::NAVY);
        assert_eq!(config.export.directory, PathBuf::from("out"));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qrmaker.ini");
        fs::write(&path, "size=1").unwrap();
        assert!(matches!(
            QrmakerConfig::from_file(&path),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_invalid_render_defaults() {
        let bad_size = RenderDefaults {
            size: 1000,
            ..RenderDefaults::default()
        };
        assert!(matches!(bad_size.to_render_options(), Err(Error::Config(_))));

        let bad_color = RenderDefaults {
            color: "chartreuse".to_string(),
            ..RenderDefaults::default()
        };
        assert!(matches!(bad_color.to_render_options(), Err(Error::Config(_))));
    }
}
