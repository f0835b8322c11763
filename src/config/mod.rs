/// Configuration system for wardroom.
///
/// Provides a layered configuration hierarchy:
///
/// 1. **Built-in defaults** — hardcoded in [`schema::WardroomConfig::default()`]
/// 2. **User global config** — `~/.wardroom/config.toml`
/// 3. **Project local config** — `.wardroom.toml` in the current working directory
/// 4. **Environment variables** — `WARDROOM_*` overrides (highest precedence)
///
/// # Usage
///
/// ```rust,ignore
/// use wardroom::config;
///
/// let cfg = config::load();
/// let dataset = wardroom::data::load(cfg.data_path().as_deref())?;
/// ```
pub mod schema;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub use schema::{OutputFormat, WardroomConfig};

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the fully resolved configuration.
///
/// Merges all layers in order: defaults → global TOML → project TOML → env
/// vars. File layers merge key by key, so a project file only overrides the
/// keys it sets.
pub fn load() -> WardroomConfig {
    let mut merged = toml::Value::Table(toml::map::Map::new());

    for path in [global_config_path(), project_config_path()] {
        if let Some(layer) = load_toml_file(path) {
            merge_config(&mut merged, layer);
        }
    }

    let mut config: WardroomConfig = merged.try_into().unwrap_or_else(|e| {
        eprintln!("[wardroom] ignoring config files: {e}");
        WardroomConfig::default()
    });

    apply_env_overrides(&mut config);
    config.heatmap.sanitize();

    config
}

/// Load a TOML config file from the given path (if it exists).
///
/// Malformed files, including ones with values of the wrong type, are
/// reported on stderr and skipped; the dashboard still renders with the
/// remaining layers.
fn load_toml_file(path: Option<PathBuf>) -> Option<toml::Value> {
    let path = path?;
    let content = fs::read_to_string(&path).ok()?;
    let checked = toml::from_str::<WardroomConfig>(&content)
        .and_then(|_| toml::from_str::<toml::Value>(&content));
    match checked {
        Ok(value) => Some(value),
        Err(e) => {
            eprintln!("[wardroom] ignoring malformed config {}: {e}", path.display());
            None
        }
    }
}

/// Merge a loaded config layer into the base, table by table. Scalars in the
/// overlay replace the base value.
fn merge_config(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base), toml::Value::Table(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge_config(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

impl WardroomConfig {
    /// The dataset fixture path, with `~` expanded. `None` selects the
    /// built-in sample.
    pub fn data_path(&self) -> Option<PathBuf> {
        let raw = self.general.data_path.trim();
        if raw.is_empty() {
            None
        } else {
            Some(expand_tilde(raw))
        }
    }

    /// The activity log path, with `~` expanded.
    pub fn log_path(&self) -> PathBuf {
        expand_tilde(&self.logging.path)
    }
}

/// Expand a leading `~` to the home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    if path == "~"
        && let Some(home) = dirs::home_dir()
    {
        return home;
    }
    Path::new(path).to_path_buf()
}

// ---------------------------------------------------------------------------
// File paths
// ---------------------------------------------------------------------------

/// Path to the user global config: `~/.wardroom/config.toml`.
fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".wardroom").join("config.toml"))
}

/// Path to the project local config: `.wardroom.toml` in the current directory.
fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|cwd| cwd.join(".wardroom.toml"))
}

/// Return the path to the global config file for display/init purposes.
pub fn global_config_file() -> Option<PathBuf> {
    global_config_path()
}

/// Return the path to the project config file for display purposes.
pub fn project_config_file() -> Option<PathBuf> {
    project_config_path()
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides (highest precedence layer).
///
/// Supported variables:
/// - `WARDROOM_DATA` — dataset fixture path
/// - `WARDROOM_FORMAT` — default output format (`table`, `json`, `csv`)
/// - `WARDROOM_WEB_ADDR` — web dashboard listen address
/// - `WARDROOM_LOGGING` — activity logging on/off (`1`/`true`/`yes`/`on`)
/// - `WARDROOM_LOG_LEVEL` — activity log level
fn apply_env_overrides(config: &mut WardroomConfig) {
    if let Ok(val) = std::env::var("WARDROOM_DATA") {
        config.general.data_path = val;
    }
    if let Ok(val) = std::env::var("WARDROOM_FORMAT")
        && !val.is_empty()
    {
        config.general.format = OutputFormat::from_str_opt(Some(&val.to_ascii_lowercase()));
    }
    if let Ok(val) = std::env::var("WARDROOM_WEB_ADDR")
        && !val.is_empty()
    {
        config.web.address = val;
    }
    if let Ok(val) = std::env::var("WARDROOM_LOGGING") {
        config.logging.enabled = is_truthy(&val);
    }
    if let Ok(val) = std::env::var("WARDROOM_LOG_LEVEL")
        && !val.is_empty()
    {
        config.logging.level = val.to_ascii_lowercase();
    }
}

/// Check if a string value represents a truthy boolean.
fn is_truthy(val: &str) -> bool {
    matches!(
        val.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

// ---------------------------------------------------------------------------
// Config init / set / reset
// ---------------------------------------------------------------------------

/// Write the default annotated config to `~/.wardroom/config.toml`.
///
/// Returns an error if the file already exists (use `force = true` to
/// overwrite).
pub fn init_config(force: bool) -> Result<PathBuf> {
    let path = global_config_path().context("could not determine home directory")?;

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create ~/.wardroom/ directory")?;
    }

    fs::write(&path, WardroomConfig::default_toml()).context("failed to write config file")?;

    Ok(path)
}

/// Set a single config key to a value in the global config file.
///
/// Supports dotted keys like `heatmap.width`. When no file exists yet the
/// defaults are written first.
pub fn set_config_value(key: &str, value: &str) -> Result<()> {
    let path = global_config_path().context("could not determine home directory")?;

    let content = if path.exists() {
        fs::read_to_string(&path).context("failed to read config file")?
    } else {
        toml::to_string_pretty(&WardroomConfig::default())
            .context("failed to serialize default config")?
    };

    let mut root: toml::Value =
        toml::from_str(&content).context("failed to parse config as TOML value")?;
    set_toml_value(&mut root, key, value)?;

    // Reject values that would not load back.
    let updated = toml::to_string_pretty(&root).context("failed to serialize config")?;
    let parsed = toml::from_str::<WardroomConfig>(&updated)
        .with_context(|| format!("invalid value '{value}' for '{key}'"))?;
    if !parsed.heatmap.is_valid() {
        anyhow::bail!(
            "invalid value '{value}' for '{key}': layout size must be between {} and {}",
            crate::heatmap::MIN_LAYOUT,
            crate::heatmap::MAX_LAYOUT
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }
    fs::write(&path, updated).context("failed to write config file")?;

    Ok(())
}

/// Set a value in a TOML value tree using a dotted key path.
fn set_toml_value(root: &mut toml::Value, key: &str, raw_value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();
    let Some((&leaf, sections)) = parts.split_last() else {
        anyhow::bail!("empty config key");
    };

    let mut current = root;
    for &part in sections {
        current = current
            .get_mut(part)
            .with_context(|| format!("config key not found: section '{part}' in '{key}'"))?;
    }

    let table = current.as_table_mut().with_context(|| {
        format!(
            "expected table at '{}'",
            key.rsplit_once('.').map(|(s, _)| s).unwrap_or("")
        )
    })?;

    let new_value = match table.get(leaf) {
        Some(toml::Value::Boolean(_)) => toml::Value::Boolean(is_truthy(raw_value)),
        Some(toml::Value::Integer(_)) => {
            let n: i64 = raw_value
                .parse()
                .with_context(|| format!("expected integer for '{key}', got '{raw_value}'"))?;
            toml::Value::Integer(n)
        }
        Some(toml::Value::Float(_)) => {
            let f: f64 = raw_value
                .parse()
                .with_context(|| format!("expected number for '{key}', got '{raw_value}'"))?;
            toml::Value::Float(f)
        }
        Some(_) => toml::Value::String(raw_value.to_string()),
        None => anyhow::bail!("unknown config key '{key}'"),
    };

    table.insert(leaf.to_string(), new_value);
    Ok(())
}

/// Reset the global config to defaults (overwrite the file).
pub fn reset_config() -> Result<PathBuf> {
    init_config(true)
}

/// Show the effective (fully resolved) config as TOML.
pub fn show_effective_config() -> Result<String> {
    let config = load();
    toml::to_string_pretty(&config).context("failed to serialize effective config")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
