//! vApp

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use vcd_session::Connection;

use super::{fetch, ChildResource};
use crate::error::Result;
use crate::models::{ResourceDescriptor, ResourceKind};

/// vApp
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VApp {
    pub name: String,

    #[serde(rename = "href")]
    pub link: String,

    /// 平台状态码
    #[serde(default)]
    pub status: i32,
}

#[async_trait]
impl ChildResource for VApp {
    const KIND: ResourceKind = ResourceKind::VApp;

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
