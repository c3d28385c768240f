//! 配置基础设施
//!
//! 启动时加载一次：先读取可选的 `.env` 文件，再从环境变量提取。
//! 数据库使用 `DB_` 前缀，服务本身使用 `APP_` 前缀。
//! 字符串字段按原文读取，`Env` 只负责数字和布尔值。

use figment::{
    providers::{Env, Serialized},
    Figment,
};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_PG_PORT: u16 = 5432;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not load .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),

    #[error("could not load configuration: {0}")]
    Load(#[from] figment::Error),
}

/// 数据库配置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub user: String,
    pub password: Secret<String>,
    pub host: String,
    pub name: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

const DATABASE_STRING_KEYS: &[&str] = &["user", "password", "host", "name"];
const SERVER_STRING_KEYS: &[&str] = &["addr", "log_level"];

fn default_max_connections() -> u32 {
    10
}

impl DatabaseConfig {
    /// `DB_HOST` 可以是 `host` 或 `host:port`
    pub fn host_and_port(&self) -> (&str, u16) {
        let (host, port) = split_host_port(&self.host);
        (host, port.unwrap_or(DEFAULT_PG_PORT))
    }

    pub fn password(&self) -> &str {
        self.password.expose_secret()
    }
}

/// 服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub addr: String,
    pub log_level: String,
    pub expose_errors: bool,
    pub strict_validation: bool,
    pub init_schema: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:8080".to_string(),
            log_level: "info".to_string(),
            expose_errors: true,
            strict_validation: false,
            init_schema: false,
        }
    }
}

impl ServerConfig {
    /// `:8080` 形式绑定所有网卡
    pub fn listen_addr(&self) -> String {
        if self.addr.starts_with(':') {
            format!("0.0.0.0{}", self.addr)
        } else {
            self.addr.clone()
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    /// 加载 `.env`（不存在时忽略）后读取环境变量
    pub fn load() -> Result<Self, ConfigError> {
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                return Err(err.into());
            }
        }
        Ok(Self::from_env()?)
    }

    pub fn from_env() -> Result<Self, figment::Error> {
        let database = raw_strings(
            Figment::from(Env::prefixed("DB_").ignore(DATABASE_STRING_KEYS)),
            "DB_",
            DATABASE_STRING_KEYS,
        )
        .extract()?;
        let server = raw_strings(
            Figment::from(Serialized::defaults(ServerConfig::default()))
                .merge(Env::prefixed("APP_").ignore(SERVER_STRING_KEYS)),
            "APP_",
            SERVER_STRING_KEYS,
        )
        .extract()?;

        Ok(Self { database, server })
    }
}

fn split_host_port(host: &str) -> (&str, Option<u16>) {
    if let Some(rest) = host.strip_prefix('[') {
        if let Some((ip, tail)) = rest.split_once(']') {
            return (ip, tail.strip_prefix(':').and_then(|p| p.parse().ok()));
        }
    }

    match host.rsplit_once(':') {
        Some((name, port)) if !name.contains(':') => match port.parse() {
            Ok(port) => (name, Some(port)),
            Err(_) => (host, None),
        },
        _ => (host, None),
    }
}

/// `Env` 会把 `0123` 解析成数字 123，字符串字段直接从环境变量原样读取
fn raw_strings(figment: Figment, prefix: &str, keys: &[&str]) -> Figment {
    keys.iter().fold(figment, |figment, key| {
        match std::env::var(format!("{}{}", prefix, key.to_uppercase())) {
            Ok(value) => figment.merge(Serialized::default(key, value)),
            Err(_) => figment,
        }
    })
}
