//! 边缘网关

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use vcd_session::Connection;

use super::{fetch, ChildResource};
use crate::error::Result;
use crate::models::{ResourceDescriptor, ResourceKind};

/// 边缘网关
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeGateway {
    pub name: String,

    #[serde(rename = "href")]
    pub link: String,

    /// 高可用状态，例如 `DISABLED`
    #[serde(default)]
    pub ha_status: Option<String>,
}

#[async_trait]
impl ChildResource for EdgeGateway {
    const KIND: ResourceKind = ResourceKind::EdgeGateway;

    async fn resolve(connection: &dyn Connection, descriptor: &ResourceDescriptor) -> Result<Self> {
        fetch(connection, Self::KIND, &descriptor.link).await
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn link(&self) -> &str {
        &self.link
    }
}
