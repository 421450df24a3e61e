use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub host: String,
    #[serde(default = "default_stats_path")]
    pub stats_path: String,
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    #[serde(default = "default_client_timeout_ms")]
    pub client_timeout_ms: u64,
    #[serde(default = "default_failure_budget")]
    pub failure_budget: u32,
    #[serde(default)]
    pub thresholds: Thresholds,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Thresholds {
    #[serde(default = "default_load_average")]
    pub load_average: f64,
    #[serde(default = "default_memory_usage_ratio")]
    pub memory_usage_ratio: f64,
    #[serde(default = "default_min_free_disk_mib")]
    pub min_free_disk_mib: f64,
    #[serde(default = "default_network_usage_ratio")]
    pub network_usage_ratio: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            load_average: default_load_average(),
            memory_usage_ratio: default_memory_usage_ratio(),
            min_free_disk_mib: default_min_free_disk_mib(),
            network_usage_ratio: default_network_usage_ratio(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("не удалось прочитать файл конфигурации {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("не удалось разобрать YAML в {path}: {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },
    #[error("ошибка валидации конфигурации: {0}")]
    Validation(String),
}

impl Config {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path_ref = path.as_ref();
        let path_display = path_ref.display().to_string();
        let text = fs::read_to_string(path_ref).map_err(|source| ConfigError::Read {
            path: path_display.clone(),
            source,
        })?;

        let cfg: Config = serde_yaml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path_display,
            source,
        })?;

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::Validation("поле host обязательно".to_string()));
        }
        if self.host.contains("://")
            || self.host.contains('/')
            || self.host.contains(char::is_whitespace)
        {
            return Err(ConfigError::Validation(
                "поле host должно быть вида host[:port], без схемы и пути".to_string(),
            ));
        }
        if !self.stats_path.starts_with('/') {
            return Err(ConfigError::Validation(
                "stats_path должен начинаться с '/'".to_string(),
            ));
        }
        if self.interval_secs < 1 {
            return Err(ConfigError::Validation(
                "interval_secs должно быть >= 1".to_string(),
            ));
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "request_timeout_ms должен быть > 0".to_string(),
            ));
        }
        if self.client_timeout_ms < self.request_timeout_ms {
            return Err(ConfigError::Validation(
                "client_timeout_ms должен быть >= request_timeout_ms".to_string(),
            ));
        }
        if self.failure_budget < 1 {
            return Err(ConfigError::Validation(
                "failure_budget должно быть >= 1".to_string(),
            ));
        }

        validate_thresholds(&self.thresholds)?;

        Ok(())
    }

    pub fn stats_url(&self) -> String {
        format!("http://{}{}", self.host, self.stats_path)
    }

    pub fn example_yaml() -> &'static str {
        include_str!("../config.yaml.example")
    }
}

fn validate_thresholds(thresholds: &Thresholds) -> Result<(), ConfigError> {
    if thresholds.load_average <= 0.0 {
        return Err(ConfigError::Validation(
            "thresholds.load_average должно быть > 0".to_string(),
        ));
    }
    if thresholds.memory_usage_ratio <= 0.0 || thresholds.memory_usage_ratio > 1.0 {
        return Err(ConfigError::Validation(
            "thresholds.memory_usage_ratio должно быть в диапазоне 0..1".to_string(),
        ));
    }
    if thresholds.min_free_disk_mib < 0.0 {
        return Err(ConfigError::Validation(
            "thresholds.min_free_disk_mib должно быть >= 0".to_string(),
        ));
    }
    if thresholds.network_usage_ratio <= 0.0 || thresholds.network_usage_ratio > 1.0 {
        return Err(ConfigError::Validation(
            "thresholds.network_usage_ratio должно быть в диапазоне 0..1".to_string(),
        ));
    }
    Ok(())
}

fn default_stats_path() -> String {
    "/_stats".to_string()
}

const fn default_interval_secs() -> u64 {
    60
}

const fn default_request_timeout_ms() -> u64 {
    10_000
}

const fn default_client_timeout_ms() -> u64 {
    15_000
}

const fn default_failure_budget() -> u32 {
    3
}

const fn default_load_average() -> f64 {
    30.0
}

const fn default_memory_usage_ratio() -> f64 {
    0.8
}

const fn default_min_free_disk_mib() -> f64 {
    10.0
}

const fn default_network_usage_ratio() -> f64 {
    0.9
}
