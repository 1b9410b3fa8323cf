//! 会话层错误定义

use thiserror::Error;

/// 会话层错误类型
///
/// 与请求相关的错误都带上请求链接，便于在上层日志中定位是哪一次调用失败。
#[derive(Error, Debug)]
pub enum SessionError {
    /// 请求未能完成（连接失败、超时、读取响应失败）
    #[error("请求 {link} 未完成: {message}")]
    Transport { link: String, message: String },

    /// 平台拒绝登录，或登录响应中没有会话令牌
    #[error("vCloud 登录失败: {0}")]
    Auth(String),

    /// 平台返回非成功状态码
    #[error("vCloud API 返回 {status} ({link}): {body}")]
    Api { status: u16, link: String, body: String },

    #[error("无法解析 {link} 的文档: {message}")]
    Parse { link: String, message: String },

    #[error("会话配置错误: {0}")]
    Config(String),

    #[error("会话未登录或已注销")]
    NotAuthenticated,
}

impl SessionError {
    pub(crate) fn transport(link: &str, e: impl std::fmt::Display) -> Self {
        SessionError::Transport {
            link: link.to_string(),
            message: e.to_string(),
        }
    }

    pub(crate) fn parse(link: &str, e: impl std::fmt::Display) -> Self {
        SessionError::Parse {
            link: link.to_string(),
            message: e.to_string(),
        }
    }

    /// 平台返回的状态码，非 API 错误时为 `None`
    pub fn status(&self) -> Option<u16> {
        match self {
            SessionError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 出错请求的链接
    pub fn link(&self) -> Option<&str> {
        match self {
            SessionError::Transport { link, .. }
            | SessionError::Api { link, .. }
            | SessionError::Parse { link, .. } => Some(link),
            _ => None,
        }
    }
}

/// 会话层结果类型
pub type Result<T> = std::result::Result<T, SessionError>;
