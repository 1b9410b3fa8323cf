//! 子资源句柄
//!
//! 每种子资源对应一个句柄类型，由 [`ChildResource::resolve`] 从资源描述构造。
//! 句柄是一次读取的结果，不持有连接，也不回指所属 VDC。

mod disk;
mod edge_gateway;
mod network;
mod storage_profile;
mod vapp;

pub use disk::{AttachmentState, Disk};
pub use edge_gateway::EdgeGateway;
pub use network::Network;
pub use storage_profile::StorageProfile;
pub use vapp::VApp;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use vcd_session::Connection;

use crate::error::{Result, VdcError};
use crate::models::{ResourceDescriptor, ResourceKind};

/// 子资源句柄
#[async_trait]
pub trait ChildResource: Sized + Send {
    /// 资源类型
    const KIND: ResourceKind;

    /// 由描述构造完整句柄，需要时读取资源文档
    async fn resolve(connection: &dyn Connection, descriptor: &ResourceDescriptor) -> Result<Self>;

    fn name(&self) -> &str;

    fn link(&self) -> &str;
}

/// 读取资源文档并反序列化
pub(crate) async fn fetch<T: DeserializeOwned>(
    connection: &dyn Connection,
    kind: ResourceKind,
    link: &str,
) -> Result<T> {
    let document = connection.get(link).await?;
    serde_json::from_value(document)
        .map_err(|e| VdcError::ParseError(format!("{} 文档 {}: {}", kind, link, e)))
}
