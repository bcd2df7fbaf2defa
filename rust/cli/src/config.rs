use serde::{Deserialize, Serialize};
use std::fs;
use thiserror::Error;

use neonmines_engine::engine::{DEFAULT_BET, DEFAULT_MINES};
use neonmines_engine::rules;
use neonmines_engine::wallet::STARTING_BALANCE;

/// Environment variable naming a TOML configuration file.
pub const CONFIG_ENV: &str = "NEONMINES_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub starting_balance: f64,
    pub bet: f64,
    pub mines: u8,
    pub seed: Option<u64>,
    /// Automatic player used by `sim`
    pub strategy: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub starting_balance: ValueSource,
    pub bet: ValueSource,
    pub mines: ValueSource,
    pub seed: ValueSource,
    pub strategy: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            starting_balance: ValueSource::Default,
            bet: ValueSource::Default,
            mines: ValueSource::Default,
            seed: ValueSource::Default,
            strategy: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            starting_balance: STARTING_BALANCE,
            bet: DEFAULT_BET,
            mines: DEFAULT_MINES,
            seed: None,
            strategy: "baseline".into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("{0}")]
    Invalid(String),
}

/// Resolves configuration: defaults, then the file named by `NEONMINES_CONFIG`,
/// then `NEONMINES_*` environment variables. Command-line flags are applied
/// on top by the commands themselves.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_ENV)
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.starting_balance {
            cfg.starting_balance = v;
            sources.starting_balance = ValueSource::File;
        }
        if let Some(v) = f.bet {
            cfg.bet = v;
            sources.bet = ValueSource::File;
        }
        if let Some(v) = f.mines {
            cfg.mines = v;
            sources.mines = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.strategy {
            cfg.strategy = v;
            sources.strategy = ValueSource::File;
        }
    }

    if let Some(v) = env_value("NEONMINES_BALANCE") {
        cfg.starting_balance = v
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid balance: {}", v)))?;
        sources.starting_balance = ValueSource::Env;
    }
    if let Some(v) = env_value("NEONMINES_BET") {
        cfg.bet = v
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid bet: {}", v)))?;
        sources.bet = ValueSource::Env;
    }
    if let Some(v) = env_value("NEONMINES_MINES") {
        cfg.mines = v
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid mine count: {}", v)))?;
        sources.mines = ValueSource::Env;
    }
    if let Some(v) = env_value("NEONMINES_SEED") {
        cfg.seed = Some(
            v.parse()
                .map_err(|_| ConfigError::Invalid(format!("Invalid seed: {}", v)))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Some(v) = env_value("NEONMINES_STRATEGY") {
        cfg.strategy = v;
        sources.strategy = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    starting_balance: Option<f64>,
    #[serde(default)]
    bet: Option<f64>,
    #[serde(default)]
    mines: Option<u8>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    strategy: Option<String>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if !cfg.starting_balance.is_finite() || cfg.starting_balance < 0.0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: starting_balance must be >= 0".into(),
        ));
    }
    rules::validate_bet(cfg.bet)
        .map_err(|e| ConfigError::Invalid(format!("Invalid configuration: {}", e)))?;
    rules::validate_mine_count(cfg.mines)
        .map_err(|e| ConfigError::Invalid(format!("Invalid configuration: {}", e)))?;
    neonmines_ai::create_player(&cfg.strategy)
        .map_err(|e| ConfigError::Invalid(format!("Invalid configuration: {}", e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn validate_rejects_out_of_range_values() {
        let mut cfg = Config::default();
        cfg.mines = 1;
        assert!(validate(&cfg).is_err());

        let mut cfg = Config::default();
        cfg.bet = 0.0;
        assert!(validate(&cfg).is_err());

        let mut cfg = Config::default();
        cfg.starting_balance = -1.0;
        assert!(validate(&cfg).is_err());

        let mut cfg = Config::default();
        cfg.strategy = "nope".into();
        assert!(validate(&cfg).is_err());
    }

    #[test]
    fn file_config_fields_are_optional() {
        let f: FileConfig = toml::from_str("bet = 2.5\nmines = 5\n").unwrap();
        assert_eq!(f.bet, Some(2.5));
        assert_eq!(f.mines, Some(5));
        assert!(f.seed.is_none());
        assert!(f.strategy.is_none());
    }
}
