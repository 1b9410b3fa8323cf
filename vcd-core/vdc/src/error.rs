//! 虚拟数据中心错误定义

use thiserror::Error;
use vcd_session::SessionError;

use crate::models::ResourceKind;

/// 错误分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 按名称查找的资源不存在
    NotFound,
    /// 调用参数不合法
    InvalidArgument,
    /// 当前资源状态不允许该操作
    Conflict,
    /// 批量操作中有子操作失败
    BatchFailure,
    /// 会话层错误或其他未分类错误
    Transport,
}

/// 虚拟数据中心错误类型
#[derive(Error, Debug)]
pub enum VdcError {
    #[error("{kind} '{name}' is not found")]
    NotFound { kind: ResourceKind, name: String },

    #[error("Invalid size in MB {0}")]
    InvalidSize(i64),

    #[error("Invalid bus type!")]
    InvalidBusType(String),

    #[error("Invalid bus sub type!")]
    InvalidBusSubType(String),

    #[error("Disk '{name}', link {link} is attached to VM '{vm}'")]
    DiskAttached { name: String, link: String, vm: String },

    /// 同名磁盘不止一个，`links` 为全部匹配磁盘的链接
    #[error("{} disks with name {name} were found", .links.len())]
    AmbiguousDisk { name: String, links: Vec<String> },

    /// `failed` 为删除失败的磁盘链接
    #[error("Failed to delete one or more of the disks with name '{name}'. Check logs for details.")]
    BatchDeleteFailed { name: String, failed: Vec<String> },

    #[error("缺少链接: {0}")]
    MissingLink(String),

    #[error("解析错误: {0}")]
    ParseError(String),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl VdcError {
    pub(crate) fn not_found(kind: ResourceKind, name: &str) -> Self {
        VdcError::NotFound { kind, name: name.to_string() }
    }

    /// 错误所属分类
    pub fn kind(&self) -> ErrorKind {
        match self {
            VdcError::NotFound { .. } => ErrorKind::NotFound,
            VdcError::InvalidSize(_)
            | VdcError::InvalidBusType(_)
            | VdcError::InvalidBusSubType(_) => ErrorKind::InvalidArgument,
            VdcError::DiskAttached { .. } | VdcError::AmbiguousDisk { .. } => ErrorKind::Conflict,
            VdcError::BatchDeleteFailed { .. } => ErrorKind::BatchFailure,
            VdcError::MissingLink(_) | VdcError::ParseError(_) | VdcError::Session(_) => {
                ErrorKind::Transport
            }
        }
    }
}

/// 虚拟数据中心结果类型
pub type Result<T> = std::result::Result<T, VdcError>;
