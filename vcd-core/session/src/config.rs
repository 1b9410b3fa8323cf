//! 会话配置
//!
//! 支持从多个源加载会话配置:
//! - 环境变量 (优先级最高)
//! - 配置文件 (TOML/JSON)
//! - 默认值 (优先级最低)
//!
//! 配置文件搜索路径 (按优先级):
//! 1. `VCD_CONFIG` 环境变量指定的路径
//! 2. `./vcd.toml` (当前目录)
//! 3. `~/.config/vcd/config.toml` (用户配置目录)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 会话配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// 平台地址，例如 `https://vcd.example.com`
    #[serde(default)]
    pub url: String,

    /// 用户名
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// 组织名称
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,

    /// 密码
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// API 版本
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// 连接超时（秒）
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,

    /// 请求超时（秒）
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// 是否验证 SSL 证书
    #[serde(default = "default_verify_ssl")]
    pub verify_ssl: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            username: None,
            organization: None,
            password: None,
            api_version: default_api_version(),
            connect_timeout: default_connect_timeout(),
            request_timeout: default_request_timeout(),
            verify_ssl: default_verify_ssl(),
        }
    }
}

impl SessionConfig {
    /// 以平台地址创建配置，其余字段取默认值
    pub fn new(url: &str) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
            ..Default::default()
        }
    }

    /// 设置登录凭据
    pub fn with_credentials(mut self, username: &str, organization: &str, password: &str) -> Self {
        self.username = Some(username.to_string());
        self.organization = Some(organization.to_string());
        self.password = Some(password.to_string());
        self
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// 请求头中使用的 Accept 值
    pub fn accept_header(&self) -> String {
        format!("application/*+json;version={}", self.api_version)
    }

    /// 从多个源加载配置 (优先级: 环境变量 > 配置文件 > 默认值)
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = Self::find_config_file() {
            tracing::debug!("Loading session config from: {:?}", path);
            config = Self::load_from_file(&path)?;
        } else {
            tracing::debug!("No session config file found, using defaults");
        }

        config.apply_env_vars();

        Ok(config)
    }

    /// 从指定文件加载配置
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        // 根据文件扩展名选择解析器
        let config = match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {:?}", path))?,
            Some("json") => serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {:?}", path))?,
            _ => anyhow::bail!("Unsupported config file format: {:?}", path),
        };

        Ok(config)
    }

    /// 查找配置文件 (按优先级搜索)
    fn find_config_file() -> Option<PathBuf> {
        if let Ok(path) = env::var("VCD_CONFIG") {
            let p = PathBuf::from(path);
            if p.exists() {
                return Some(p);
            }
        }

        let local = PathBuf::from("./vcd.toml");
        if local.exists() {
            return Some(local);
        }

        if let Some(home) = dirs::home_dir() {
            let user_path = home.join(".config/vcd/config.toml");
            if user_path.exists() {
                return Some(user_path);
            }
        }

        None
    }

    /// 从环境变量覆盖配置
    fn apply_env_vars(&mut self) {
        if let Ok(url) = env::var("VCD_URL") {
            self.url = url.trim_end_matches('/').to_string();
        }
        if let Ok(username) = env::var("VCD_USERNAME") {
            self.username = Some(username);
        }
        if let Ok(org) = env::var("VCD_ORG") {
            self.organization = Some(org);
        }
        if let Ok(password) = env::var("VCD_PASSWORD") {
            self.password = Some(password);
        }
        if let Ok(version) = env::var("VCD_API_VERSION") {
            self.api_version = version;
        }
    }
}

// 默认值函数
fn default_api_version() -> String {
    "5.1".to_string()
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_request_timeout() -> u64 {
    30
}

fn default_verify_ssl() -> bool {
    true
}
