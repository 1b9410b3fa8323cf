//! 独立磁盘

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use vcd_session::Connection;

use super::{fetch, ChildResource};
use crate::error::Result;
use crate::models::{ResourceDescriptor, ResourceKind, VmReference};

/// 磁盘挂载状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentState {
    Attached,
    NotAttached,
}

/// 独立磁盘
///
/// 同一时刻最多挂载到一台虚拟机；挂载状态由虚拟机操作驱动，这里只读取。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Disk {
    pub name: String,

    #[serde(rename = "href")]
    pub link: String,

    #[serde(default)]
    pub size_mb: i64,

    #[serde(default)]
    pub bus_type: String,

    #[serde(default)]
    pub bus_sub_type: String,

    #[serde(default)]
    pub attached_vm: Option<VmReference>,
}

impl Disk {
    pub fn attachment_state(&self) -> AttachmentState {
        match self.attached_vm {
            Some(_) => AttachmentState::Attached,
            None => AttachmentState::NotAttached,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attachment_state() == AttachmentState::Attached
    }

    pub fn attached_vm(&self) -> Option<&VmReference> {
        self.attached_vm.as_ref()
    }
}

#[async_trait]
impl ChildResource for Disk {
    const KIND: ResourceKind = ResourceKind::Disk;

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
