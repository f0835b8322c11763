/// Configuration schema and defaults for wardroom.
///
/// Defines the TOML-serializable configuration structure with all sections:
/// `[general]`, `[web]`, `[heatmap]`, and `[logging]`.
///
/// Every field has a sensible built-in default. Users only need to set the
/// values they want to override. Dashboard color thresholds are fixed
/// constants in `style` and are not configurable.
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level wardroom configuration.
///
/// Maps directly to the `~/.wardroom/config.toml` and `.wardroom.toml` file
/// schemas.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WardroomConfig {
    pub general: GeneralConfig,
    pub web: WebConfig,
    pub heatmap: HeatmapConfig,
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// [general]
// ---------------------------------------------------------------------------

/// Output format for terminal views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl OutputFormat {
    /// Parse a format name; unknown or missing values fall back to `Table`.
    pub fn from_str_opt(s: Option<&str>) -> Self {
        match s {
            Some("json") => Self::Json,
            Some("csv") => Self::Csv,
            _ => Self::Table,
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

/// General settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// JSON dataset fixture. Empty means the built-in sample. `~` is expanded.
    pub data_path: String,
    /// Default output format when `--format` is not given.
    pub format: OutputFormat,
}

// ---------------------------------------------------------------------------
// [web]
// ---------------------------------------------------------------------------

/// Embedded web dashboard settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    /// Listen address for `wardroom web`.
    pub address: String,
    /// Open the dashboard in the default browser on start.
    pub open_browser: bool,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:9747".to_string(),
            open_browser: true,
        }
    }
}

// ---------------------------------------------------------------------------
// [heatmap]
// ---------------------------------------------------------------------------

/// Module health matrix layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapConfig {
    /// Layout area width in layout units.
    pub width: f64,
    /// Layout area height in layout units.
    pub height: f64,
    /// Character columns used for the terminal rendering.
    pub terminal_columns: usize,
    /// Character rows used for the terminal rendering.
    pub terminal_rows: usize,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            width: crate::heatmap::DEFAULT_WIDTH,
            height: crate::heatmap::DEFAULT_HEIGHT,
            terminal_columns: 96,
            terminal_rows: 16,
        }
    }
}

impl HeatmapConfig {
    /// Whether both layout dimensions are finite and in range.
    pub fn is_valid(&self) -> bool {
        use crate::heatmap::layout_dimension;
        layout_dimension(self.width, f64::NAN) == self.width
            && layout_dimension(self.height, f64::NAN) == self.height
    }

    /// Replace unusable layout dimensions with the defaults.
    pub fn sanitize(&mut self) {
        use crate::heatmap::{DEFAULT_HEIGHT, DEFAULT_WIDTH, layout_dimension};
        self.width = layout_dimension(self.width, DEFAULT_WIDTH);
        self.height = layout_dimension(self.height, DEFAULT_HEIGHT);
    }
}

// ---------------------------------------------------------------------------
// [logging]
// ---------------------------------------------------------------------------

/// Activity logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Whether view activity is appended to the JSONL log.
    pub enabled: bool,
    /// Path to the activity log file. `~` is expanded to the home directory.
    pub path: String,
    /// Log level: `"error"`, `"warn"`, `"info"`, `"debug"`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "~/.wardroom/activity.jsonl".to_string(),
            level: "info".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Annotated default file
// ---------------------------------------------------------------------------

impl WardroomConfig {
    /// The annotated default config written by `wardroom config init`.
    pub fn default_toml() -> String {
        r#"# wardroom configuration
#
# Layers (highest priority last): built-in defaults, this file,
# .wardroom.toml in the working directory, WARDROOM_* environment variables.

[general]
# JSON dataset fixture; empty uses the built-in sample program.
data_path = ""
# Default output format: "table", "json", or "csv".
format = "table"

[web]
address = "127.0.0.1:9747"
open_browser = true

[heatmap]
# Treemap layout area in layout units. Cells under 80x80 hide their labels.
width = 1200.0
height = 400.0
terminal_columns = 96
terminal_rows = 16

[logging]
enabled = true
path = "~/.wardroom/activity.jsonl"
# One of: "error", "warn", "info", "debug".
level = "info"
"#
        .to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_produces_defaults() {
        let config: WardroomConfig = toml::from_str("").unwrap();
        assert!(config.general.data_path.is_empty());
        assert_eq!(config.general.format, OutputFormat::Table);
        assert_eq!(config.web.address, "127.0.0.1:9747");
        assert_eq!(config.heatmap.width, 1200.0);
        assert!(config.logging.enabled);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config: WardroomConfig = toml::from_str("[heatmap]\nwidth = 800.0\n").unwrap();
        assert_eq!(config.heatmap.width, 800.0);
        assert_eq!(config.heatmap.height, 400.0);
        assert_eq!(config.heatmap.terminal_columns, 96);
    }

    #[test]
    fn default_toml_parses_back() {
        let toml_str = WardroomConfig::default_toml();
        let config: WardroomConfig = toml::from_str(&toml_str).unwrap();
        assert!(config.web.open_browser);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.heatmap.terminal_rows, 16);
    }

    #[test]
    fn output_format_parsing() {
        assert_eq!(OutputFormat::from_str_opt(None), OutputFormat::Table);
        assert_eq!(OutputFormat::from_str_opt(Some("json")), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str_opt(Some("csv")), OutputFormat::Csv);
        assert_eq!(OutputFormat::from_str_opt(Some("xml")), OutputFormat::Table);
        assert_eq!(OutputFormat::Csv.to_string(), "csv");
    }

    #[test]
    fn format_serializes_kebab_case() {
        let toml_str = toml::to_string(&WardroomConfig::default()).unwrap();
        assert!(toml_str.contains("format = \"table\""));
    }
}
