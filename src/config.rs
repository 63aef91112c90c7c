//! 服务配置
//!
//! 加载顺序：默认值 -> `TASKBOARD_CONFIG` 指向的 JSON 文件 -> `TASKBOARD_*` 环境变量。
//! 启动前会先读取 `.env`（不存在则忽略）。

use chrono::TimeDelta;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{AppError, AppResult, ResultExt};

pub const CONFIG_PATH_ENV: &str = "TASKBOARD_CONFIG";

/// 会话有效期上限：10 年
pub const MAX_SESSION_TTL_HOURS: i64 = 24 * 365 * 10;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub session_ttl_hours: i64,
    pub max_connections: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            database_path: default_database_path(),
            session_ttl_hours: 24 * 7,
            max_connections: 5,
        }
    }
}

impl AppConfig {
    /// 按完整顺序加载配置
    pub fn load() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let mut config = match env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_file(Path::new(path.trim()))?,
            _ => Self::default(),
        };
        config.apply_env(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> AppResult<Self> {
        let data = fs::read_to_string(path)
            .config_err(&format!("failed to read {}", path.display()))?;
        serde_json::from_str(&data).config_err(&format!("failed to parse {}", path.display()))
    }

    /// 用环境变量覆盖配置。`lookup` 便于测试时注入
    pub fn apply_env<F>(&mut self, lookup: F) -> AppResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("TASKBOARD_HOST") {
            self.host = host;
        }
        if let Some(port) = parse_var::<_, u16>(&lookup, "TASKBOARD_PORT")? {
            self.port = port;
        }
        if let Some(path) = lookup("TASKBOARD_DATABASE_PATH") {
            self.database_path = PathBuf::from(path);
        }
        if let Some(ttl) = parse_var::<_, i64>(&lookup, "TASKBOARD_SESSION_TTL_HOURS")? {
            self.session_ttl_hours = ttl;
        }
        if let Some(max) = parse_var::<_, u32>(&lookup, "TASKBOARD_MAX_CONNECTIONS")? {
            self.max_connections = max;
        }
        Ok(())
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.host.trim().is_empty() {
            return Err(AppError::Config("host must not be empty".into()));
        }
        if self.session_ttl_hours <= 0 {
            return Err(AppError::Config("session_ttl_hours must be positive".into()));
        }
        if self.session_ttl_hours > MAX_SESSION_TTL_HOURS {
            return Err(AppError::Config(format!(
                "session_ttl_hours must be at most {}",
                MAX_SESSION_TTL_HOURS
            )));
        }
        if self.max_connections == 0 {
            return Err(AppError::Config("max_connections must be at least 1".into()));
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn session_ttl(&self) -> AppResult<TimeDelta> {
        TimeDelta::try_hours(self.session_ttl_hours).ok_or_else(|| {
            AppError::Config(format!(
                "session_ttl_hours out of range: {}",
                self.session_ttl_hours
            ))
        })
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> AppResult<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .config_err(&format!("invalid value for {}", key)),
        None => Ok(None),
    }
}

/// Linux: ~/.local/share/taskboard/taskboard.sqlite3
/// macOS: ~/Library/Application Support/com.taskboard.taskboard/taskboard.sqlite3
fn default_database_path() -> PathBuf {
    ProjectDirs::from("com", "taskboard", "taskboard")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
        .join("taskboard.sqlite3")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn env_overrides_defaults() {
        let mut config = AppConfig::default();
        config
            .apply_env(lookup_from(&[
                ("TASKBOARD_PORT", "8088"),
                ("TASKBOARD_DATABASE_PATH", "/tmp/tb.sqlite3"),
                ("TASKBOARD_SESSION_TTL_HOURS", "2"),
            ]))
            .unwrap();

        assert_eq!(config.port, 8088);
        assert_eq!(config.database_path, PathBuf::from("/tmp/tb.sqlite3"));
        assert_eq!(config.session_ttl().unwrap(), TimeDelta::hours(2));
        assert_eq!(config.host, "127.0.0.1");
    }

    #[test]
    fn invalid_port_is_config_error() {
        let mut config = AppConfig::default();
        let err = config
            .apply_env(lookup_from(&[("TASKBOARD_PORT", "not-a-port")]))
            .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn file_values_fill_missing_fields_with_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "port": 9000, "session_ttl_hours": 1 }"#).unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.session_ttl_hours, 1);
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.bind_address(), "127.0.0.1:9000");
    }

    #[test]
    fn validate_rejects_zero_ttl() {
        let config = AppConfig {
            session_ttl_hours: 0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn oversized_ttl_is_rejected_instead_of_overflowing() {
        let mut config = AppConfig::default();
        config
            .apply_env(lookup_from(&[("TASKBOARD_SESSION_TTL_HOURS", "3000000000")]))
            .unwrap();
        assert!(matches!(config.validate(), Err(AppError::Config(_))));

        config.session_ttl_hours = i64::MAX;
        assert!(matches!(config.session_ttl(), Err(AppError::Config(_))));

        config.session_ttl_hours = MAX_SESSION_TTL_HOURS;
        assert!(config.validate().is_ok());
        assert!(config.session_ttl().is_ok());
    }
}
