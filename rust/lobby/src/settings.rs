use holdem_engine::config::TableConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const CONFIG_PATH_ENV: &str = "HOLDEM_CONFIG";
pub const STARTING_STACK_ENV: &str = "HOLDEM_STARTING_STACK";
pub const MIN_BET_ENV: &str = "HOLDEM_MIN_BET";
pub const SEED_ENV: &str = "HOLDEM_SEED";
pub const LOG_ENV: &str = "HOLDEM_LOG";

const DEFAULT_LOG_FILTER: &str = "info";

/// Settings for a lobby process: the stakes every new table gets, and the
/// log filter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LobbySettings {
    pub table: TableConfig,
    pub log_filter: String,
}

impl Default for LobbySettings {
    fn default() -> Self {
        Self {
            table: TableConfig::default(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
    Cli,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingsSources {
    pub starting_stack: ValueSource,
    pub min_bet: ValueSource,
    pub seed: ValueSource,
    pub log_filter: ValueSource,
}

impl Default for SettingsSources {
    fn default() -> Self {
        Self {
            starting_stack: ValueSource::Default,
            min_bet: ValueSource::Default,
            seed: ValueSource::Default,
            log_filter: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SettingsResolved {
    pub settings: LobbySettings,
    pub sources: SettingsSources,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse settings file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
}

/// Keys accepted in a TOML settings file; all optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    #[serde(default)]
    starting_stack: Option<u32>,
    #[serde(default)]
    min_bet: Option<u32>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    log_filter: Option<String>,
}

impl LobbySettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.table
            .validate()
            .map_err(|e| SettingsError::InvalidValue(e.to_string()))?;
        if self.log_filter.trim().is_empty() {
            return Err(SettingsError::InvalidValue(
                "log_filter cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Resolves settings from defaults, then a TOML file (`path`, or the
    /// `HOLDEM_CONFIG` variable when `path` is `None`), then `HOLDEM_*`
    /// environment variables. The result is validated.
    pub fn load(path: Option<&Path>) -> Result<SettingsResolved, SettingsError> {
        let mut settings = LobbySettings::default();
        let mut sources = SettingsSources::default();

        let file_path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => std::env::var(CONFIG_PATH_ENV)
                .ok()
                .filter(|s| !s.is_empty())
                .map(Into::into),
        };
        if let Some(file_path) = file_path {
            let text = fs::read_to_string(&file_path)?;
            let file: FileSettings = toml::from_str(&text)?;
            if let Some(v) = file.starting_stack {
                settings.table.starting_stack = v;
                sources.starting_stack = ValueSource::File;
            }
            if let Some(v) = file.min_bet {
                settings.table.min_bet = v;
                sources.min_bet = ValueSource::File;
            }
            if let Some(v) = file.seed {
                settings.table.seed = Some(v);
                sources.seed = ValueSource::File;
            }
            if let Some(v) = file.log_filter {
                settings.log_filter = v;
                sources.log_filter = ValueSource::File;
            }
        }

        if let Some(v) = env_value(STARTING_STACK_ENV) {
            settings.table.starting_stack = parse_env(STARTING_STACK_ENV, &v)?;
            sources.starting_stack = ValueSource::Env;
        }
        if let Some(v) = env_value(MIN_BET_ENV) {
            settings.table.min_bet = parse_env(MIN_BET_ENV, &v)?;
            sources.min_bet = ValueSource::Env;
        }
        if let Some(v) = env_value(SEED_ENV) {
            settings.table.seed = Some(parse_env(SEED_ENV, &v)?);
            sources.seed = ValueSource::Env;
        }
        if let Some(v) = env_value(LOG_ENV) {
            settings.log_filter = v;
            sources.log_filter = ValueSource::Env;
        }

        settings.validate()?;
        Ok(SettingsResolved { settings, sources })
    }
}

impl SettingsResolved {
    /// Applies command-line overrides on top of everything else.
    pub fn with_overrides(
        mut self,
        seed: Option<u64>,
        log_filter: Option<String>,
    ) -> Result<Self, SettingsError> {
        if let Some(seed) = seed {
            self.settings.table.seed = Some(seed);
            self.sources.seed = ValueSource::Cli;
        }
        if let Some(filter) = log_filter {
            self.settings.log_filter = filter;
            self.sources.log_filter = ValueSource::Cli;
        }
        self.settings.validate()?;
        Ok(self)
    }
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, SettingsError> {
    value
        .trim()
        .parse()
        .map_err(|_| SettingsError::InvalidValue(format!("{} is not a valid number: {}", key, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn clear_env() {
        for key in [CONFIG_PATH_ENV, STARTING_STACK_ENV, MIN_BET_ENV, SEED_ENV, LOG_ENV] {
            std::env::remove_var(key);
        }
    }

    fn toml_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write");
        file
    }

    #[test]
    fn default_settings_are_valid() {
        let settings = LobbySettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.table.starting_stack, 1000);
        assert_eq!(settings.table.min_bet, 20);
        assert_eq!(settings.log_filter, "info");
    }

    #[test]
    fn rejects_empty_log_filter() {
        let settings = LobbySettings {
            log_filter: "  ".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::InvalidValue(_))
        ));
    }

    #[test]
    #[serial]
    fn load_without_file_or_env_uses_defaults() {
        clear_env();
        let resolved = LobbySettings::load(None).expect("load");
        assert_eq!(resolved.settings, LobbySettings::default());
        assert_eq!(resolved.sources, SettingsSources::default());
    }

    #[test]
    #[serial]
    fn file_values_override_defaults() {
        clear_env();
        let file = toml_file("starting_stack = 500\nmin_bet = 10\nseed = 42\n");
        let resolved = LobbySettings::load(Some(file.path())).expect("load");
        assert_eq!(resolved.settings.table.starting_stack, 500);
        assert_eq!(resolved.settings.table.min_bet, 10);
        assert_eq!(resolved.settings.table.seed, Some(42));
        assert_eq!(resolved.sources.starting_stack, ValueSource::File);
        assert_eq!(resolved.sources.log_filter, ValueSource::Default);
    }

    #[test]
    #[serial]
    fn config_path_can_come_from_env() {
        clear_env();
        let file = toml_file("log_filter = \"debug\"\n");
        std::env::set_var(CONFIG_PATH_ENV, file.path());
        let resolved = LobbySettings::load(None).expect("load");
        clear_env();
        assert_eq!(resolved.settings.log_filter, "debug");
        assert_eq!(resolved.sources.log_filter, ValueSource::File);
    }

    #[test]
    #[serial]
    fn env_overrides_file() {
        clear_env();
        let file = toml_file("starting_stack = 500\nseed = 1\n");
        std::env::set_var(STARTING_STACK_ENV, "2000");
        std::env::set_var(SEED_ENV, "99");
        let resolved = LobbySettings::load(Some(file.path())).expect("load");
        clear_env();
        assert_eq!(resolved.settings.table.starting_stack, 2000);
        assert_eq!(resolved.settings.table.seed, Some(99));
        assert_eq!(resolved.sources.starting_stack, ValueSource::Env);
        assert_eq!(resolved.sources.seed, ValueSource::Env);
    }

    #[test]
    #[serial]
    fn invalid_env_number_is_rejected() {
        clear_env();
        std::env::set_var(MIN_BET_ENV, "twenty");
        let result = LobbySettings::load(None);
        clear_env();
        assert!(matches!(result, Err(SettingsError::InvalidValue(_))));
    }

    #[test]
    #[serial]
    fn min_bet_above_stack_fails_validation() {
        clear_env();
        let file = toml_file("starting_stack = 100\nmin_bet = 200\n");
        let result = LobbySettings::load(Some(file.path()));
        assert!(matches!(result, Err(SettingsError::InvalidValue(_))));
    }

    #[test]
    #[serial]
    fn stack_too_large_for_the_pot_fails_validation() {
        clear_env();
        std::env::set_var(STARTING_STACK_ENV, "3000000000");
        let result = LobbySettings::load(None);
        clear_env();
        match result {
            Err(SettingsError::InvalidValue(msg)) => assert!(msg.contains("starting_stack")),
            other => panic!("expected InvalidValue, got {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn unknown_or_malformed_file_is_a_parse_error() {
        clear_env();
        let file = toml_file("blinds = 5\n");
        assert!(matches!(
            LobbySettings::load(Some(file.path())),
            Err(SettingsError::Parse(_))
        ));
        let file = toml_file("starting_stack = \"lots\"\n");
        assert!(matches!(
            LobbySettings::load(Some(file.path())),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    #[serial]
    fn missing_file_is_an_io_error() {
        clear_env();
        let dir = tempfile::tempdir().expect("dir");
        let path = dir.path().join("absent.toml");
        assert!(matches!(
            LobbySettings::load(Some(&path)),
            Err(SettingsError::Io(_))
        ));
    }

    #[test]
    #[serial]
    fn cli_overrides_win() {
        clear_env();
        std::env::set_var(SEED_ENV, "5");
        let resolved = LobbySettings::load(None)
            .and_then(|r| r.with_overrides(Some(6), Some("warn".to_string())))
            .expect("resolve");
        clear_env();
        assert_eq!(resolved.settings.table.seed, Some(6));
        assert_eq!(resolved.settings.log_filter, "warn");
        assert_eq!(resolved.sources.seed, ValueSource::Cli);
    }
}
