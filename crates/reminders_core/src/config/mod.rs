use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.json";
const CONFIG_ENV_VAR: &str = "REMINDERS_CONFIG_PATH";

/// ANSI colors used when rendering the task table.
#[derive(Debug, Clone)]
pub struct Palette {
    pub accent: &'static str,
    pub muted: &'static str,
    pub reset: &'static str,
}

impl Palette {
    pub fn accentize(&self, text: &str) -> String {
        if self.accent.is_empty() {
            text.to_string()
        } else {
            format!("{}{}{}", self.accent, text, self.reset)
        }
    }

    pub fn mutedize(&self, text: &str) -> String {
        if self.muted.is_empty() {
            text.to_string()
        } else {
            format!("{}{}{}", self.muted, text, self.reset)
        }
    }
}

pub fn palette_for_theme(theme: Option<&str>) -> Palette {
    match theme.and_then(canonical_theme_name) {
        Some(ref name) if name == "dark" => Palette {
            accent: "\x1b[38;5;111m",
            muted: "\x1b[38;5;245m",
            reset: "\x1b[0m",
        },
        _ => Palette {
            accent: "",
            muted: "",
            reset: "",
        },
    }
}

/// Normalize a user-supplied theme name. The application ships a light and
/// a dark theme; unknown names pass through so a future theme does not get
/// clobbered by old configs.
pub fn canonical_theme_name(raw: &str) -> Option<String> {
    let mut cleaned = String::new();
    let mut previous_underscore = false;

    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            cleaned.push(ch.to_ascii_lowercase());
            previous_underscore = false;
        } else if !previous_underscore && !cleaned.is_empty() {
            cleaned.push('_');
            previous_underscore = true;
        }
    }

    let trimmed = cleaned.trim_matches('_');
    if trimmed.is_empty() {
        return Some("light".into());
    }

    match trimmed {
        "vanilla" | "default" | "light" => Some("light".to_string()),
        "dark" | "dark_mode" | "darkmode" | "noir" => Some("dark".to_string()),
        other => Some(other.to_string()),
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub theme: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: Config,
    pub error: Option<AppError>,
}

pub fn config_path() -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    if cfg!(windows) {
        let appdata =
            std::env::var("APPDATA").map_err(|_| AppError::storage("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata)
            .join("reminders")
            .join(CONFIG_FILE_NAME))
    } else {
        let home = std::env::var("HOME").map_err(|_| AppError::storage("HOME is not set"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("reminders")
            .join(CONFIG_FILE_NAME))
    }
}

/// Load the config, falling back to defaults (and carrying the error for
/// reporting) when the file is missing or malformed. A broken config file
/// must not keep the application from starting.
pub fn load_config_with_fallback() -> ConfigLoad {
    match config_path() {
        Ok(path) => load_config_with_fallback_from_path(&path),
        Err(err) => ConfigLoad {
            config: Config::default(),
            error: Some(err),
        },
    }
}

fn load_config_with_fallback_from_path(path: &Path) -> ConfigLoad {
    if !path.exists() {
        return ConfigLoad {
            config: Config::default(),
            error: None,
        };
    }

    match load_config_from_path(path) {
        Ok(config) => ConfigLoad {
            config,
            error: None,
        },
        Err(err) => ConfigLoad {
            config: Config::default(),
            error: Some(err),
        },
    }
}

fn load_config_from_path(path: &Path) -> Result<Config, AppError> {
    let content = std::fs::read_to_string(path)
        .map_err(|err| AppError::storage(format!("{}: {}", path.display(), err)))?;
    let config: Config = serde_json::from_str(&content).map_err(|err| {
        AppError::validation(format!("invalid JSON in {}: {}", path.display(), err))
    })?;
    Ok(normalize_config_theme(config))
}

/// Persist the config (used by the theme switcher).
pub fn save_config(config: &Config) -> Result<(), AppError> {
    let path = config_path()?;
    save_config_to_path(&path, config)
}

fn save_config_to_path(path: &Path, config: &Config) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|err| AppError::storage(err.to_string()))?;
    }
    let content = serde_json::to_string_pretty(config)
        .map_err(|err| AppError::storage(err.to_string()))?;
    std::fs::write(path, content)
        .map_err(|err| AppError::storage(format!("{}: {}", path.display(), err)))?;
    Ok(())
}

fn normalize_config_theme(mut config: Config) -> Config {
    config.theme = config.theme.as_deref().and_then(canonical_theme_name);
    config
}

#[cfg(test)]
mod tests {
    use super::{
        Config, canonical_theme_name, load_config_from_path, load_config_with_fallback_from_path,
        palette_for_theme, save_config_to_path,
    };
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(file_name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("reminders-{nanos}-{file_name}"))
    }

    #[test]
    fn load_config_missing_returns_defaults() {
        let path = temp_path("missing-config.json");
        let result = load_config_with_fallback_from_path(&path);

        assert_eq!(result.config, Config::default());
        assert!(result.error.is_none());
    }

    #[test]
    fn load_config_invalid_returns_defaults_and_error() {
        let path = temp_path("invalid-config.json");
        fs::write(&path, "{ invalid json ").unwrap();

        let result = load_config_with_fallback_from_path(&path);
        fs::remove_file(&path).ok();

        assert_eq!(result.config, Config::default());
        assert!(result.error.is_some());
    }

    #[test]
    fn load_config_reads_and_normalizes_theme() {
        let path = temp_path("valid-config.json");
        fs::write(&path, r#"{ "theme": "Dark-Mode" }"#).unwrap();

        let loaded = load_config_from_path(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(loaded.theme.as_deref(), Some("dark"));
    }

    #[test]
    fn save_then_load_round_trips() {
        let path = temp_path("saved-config.json");
        let config = Config {
            theme: Some("dark".to_string()),
        };

        save_config_to_path(&path, &config).unwrap();
        let loaded = load_config_from_path(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }

    #[test]
    fn canonical_theme_name_maps_variants() {
        assert_eq!(canonical_theme_name("Light"), Some("light".into()));
        assert_eq!(canonical_theme_name("Vanilla"), Some("light".into()));
        assert_eq!(canonical_theme_name("Dark"), Some("dark".into()));
        assert_eq!(canonical_theme_name("dark-mode"), Some("dark".into()));
        assert_eq!(canonical_theme_name("  "), Some("light".into()));
        assert_eq!(canonical_theme_name("oceanic"), Some("oceanic".into()));
    }

    #[test]
    fn palette_for_theme_colors_only_dark() {
        let light = palette_for_theme(Some("light"));
        assert!(light.accent.is_empty());
        assert_eq!(light.accentize("title"), "title");

        let dark = palette_for_theme(Some("dark"));
        assert!(!dark.accent.is_empty());
        assert!(dark.accentize("title").contains("title"));

        let unknown = palette_for_theme(Some("oceanic"));
        assert!(unknown.accent.is_empty());
    }
}
