//! 组织网络

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use vcd_session::Connection;

use super::{fetch, ChildResource};
use crate::error::Result;
use crate::models::{ResourceDescriptor, ResourceKind};

/// 组织网络
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    pub name: String,

    #[serde(rename = "href")]
    pub link: String,

    /// bridged / natRouted / isolated
    #[serde(default)]
    pub fence_mode: Option<String>,
}

#[async_trait]
impl ChildResource for Network {
    const KIND: ResourceKind = ResourceKind::Network;

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
