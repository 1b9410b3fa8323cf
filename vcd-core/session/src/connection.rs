//! 平台连接抽象与 REST 实现

use std::sync::Arc;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::{Client, Method};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::SessionConfig;
use crate::error::{Result, SessionError};

/// 登录成功后平台返回令牌的响应头
pub const AUTH_HEADER: &str = "x-vcloud-authorization";

/// 平台连接
///
/// 所有资源文档均以 JSON 形式交换。实现方需自行保证线程安全，
/// 上层不会在其外部加锁。
#[async_trait]
pub trait Connection: Send + Sync {
    /// 读取资源文档
    async fn get(&self, link: &str) -> Result<Value>;

    /// 提交请求文档，返回平台响应文档
    async fn post(&self, link: &str, payload: Value, media_type: &str) -> Result<Value>;

    /// 删除资源
    async fn delete(&self, link: &str) -> Result<()>;
}

/// 基于 reqwest 的 REST 连接
pub struct RestConnection {
    /// API 基础 URL
    base_url: Url,

    /// HTTP 客户端
    http_client: Client,

    /// 认证令牌
    access_token: Arc<RwLock<Option<String>>>,

    /// 配置
    config: SessionConfig,
}

impl RestConnection {
    /// 创建新的连接（尚未登录）
    pub fn new(config: SessionConfig) -> Result<Self> {
        let base_url = Url::parse(&config.url)
            .map_err(|e| SessionError::Config(format!("无效的平台地址 '{}': {}", config.url, e)))?;

        let http_client = Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .danger_accept_invalid_certs(!config.verify_ssl)
            .build()
            .map_err(|e| SessionError::Config(format!("HTTP 客户端初始化失败: {}", e)))?;

        Ok(Self {
            base_url,
            http_client,
            access_token: Arc::new(RwLock::new(None)),
            config,
        })
    }

    /// 使用配置中的凭据登录
    pub async fn login(&self) -> Result<()> {
        let username = self.config.username.as_deref()
            .ok_or_else(|| SessionError::Config("缺少用户名".to_string()))?;
        let organization = self.config.organization.as_deref()
            .ok_or_else(|| SessionError::Config("缺少组织名称".to_string()))?;
        let password = self.config.password.as_deref()
            .ok_or_else(|| SessionError::Config("缺少密码".to_string()))?;

        info!("vCloud 会话登录: {}@{}", username, organization);

        let credentials = STANDARD.encode(format!("{}@{}:{}", username, organization, password));
        let login_url = self.resolve("/api/sessions")?;

        let response = self.http_client
            .post(login_url.clone())
            .header("Authorization", format!("Basic {}", credentials))
            .header("Accept", self.config.accept_header())
            .send()
            .await
            .map_err(|e| SessionError::transport(login_url.as_str(), e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "无法读取错误响应".to_string());
            return Err(SessionError::Auth(format!("平台返回 {}: {}", status.as_u16(), error_text)));
        }

        let token = response.headers()
            .get(AUTH_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| SessionError::Auth("未获取到认证令牌".to_string()))?
            .to_string();

        *self.access_token.write().await = Some(token);

        info!("vCloud 会话登录成功");
        Ok(())
    }

    /// 注销当前会话
    pub async fn logout(&self) -> Result<()> {
        info!("vCloud 会话登出");
        if self.access_token.read().await.is_some() {
            self.delete("/api/session").await?;
        }
        *self.access_token.write().await = None;
        Ok(())
    }

    /// 是否已登录
    pub async fn is_authenticated(&self) -> bool {
        self.access_token.read().await.is_some()
    }

    /// 当前配置
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// 将相对链接拼接到基础 URL，绝对链接原样使用
    fn resolve(&self, link: &str) -> Result<Url> {
        self.base_url.join(link)
            .map_err(|e| SessionError::Config(format!("无效的链接 '{}': {}", link, e)))
    }

    /// 发送 HTTP 请求，返回响应正文（可能为空）
    async fn request(
        &self,
        method: Method,
        link: &str,
        body: Option<(Value, &str)>,
    ) -> Result<String> {
        let url = self.resolve(link)?;
        debug!("vCloud API 请求: {} {}", method, url);

        let token = self.access_token.read().await;
        let token_str = token.as_ref().ok_or(SessionError::NotAuthenticated)?;

        let mut request = self.http_client
            .request(method, url)
            .header(AUTH_HEADER, token_str)
            .header("Accept", self.config.accept_header());

        if let Some((payload, content_type)) = body {
            let body = serde_json::to_vec(&payload)
                .map_err(|e| SessionError::parse(link, e))?;
            request = request.header("Content-Type", content_type).body(body);
        }

        let response = request.send().await
            .map_err(|e| SessionError::transport(link, e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "无法读取错误响应".to_string());
            warn!("API 请求失败: {} {} - {}", status, link, error_text);
            return Err(SessionError::Api {
                status: status.as_u16(),
                link: link.to_string(),
                body: error_text,
            });
        }

        response.text().await
            .map_err(|e| SessionError::transport(link, e))
    }
}

/// 解析响应正文，空正文视为 `Value::Null`
fn parse_document(link: &str, text: &str) -> Result<Value> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| SessionError::parse(link, e))
}

#[async_trait]
impl Connection for RestConnection {
    async fn get(&self, link: &str) -> Result<Value> {
        let text = self.request(Method::GET, link, None).await?;
        parse_document(link, &text)
    }

    async fn post(&self, link: &str, payload: Value, media_type: &str) -> Result<Value> {
        let text = self.request(Method::POST, link, Some((payload, media_type))).await?;
        parse_document(link, &text)
    }

    async fn delete(&self, link: &str) -> Result<()> {
        self.request(Method::DELETE, link, None).await?;
        Ok(())
    }
}

impl std::fmt::Debug for RestConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestConnection")
            .field("base_url", &self.base_url.as_str())
            .field("api_version", &self.config.api_version)
            .finish()
    }
}
