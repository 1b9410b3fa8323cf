//! 存储策略

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use vcd_session::Connection;

use super::ChildResource;
use crate::error::{Result, VdcError};
use crate::models::{QueryRecord, ResourceDescriptor, ResourceKind};

/// 存储策略
///
/// 直接由存储策略查询的记录构造，不再单独读取策略文档。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageProfile {
    pub name: String,
    pub link: String,

    /// 所属 VDC 名称
    pub vdc_name: String,

    pub storage_used_mb: i64,

    /// 容量上限，0 表示不限
    pub storage_limit_mb: i64,
}

impl StorageProfile {
    pub fn from_record(record: &QueryRecord) -> Self {
        Self {
            name: record.name.clone(),
            link: record.href.clone(),
            vdc_name: record.vdc_name.clone().unwrap_or_default(),
            storage_used_mb: record.storage_used_mb,
            storage_limit_mb: record.storage_limit_mb,
        }
    }
}

#[async_trait]
impl ChildResource for StorageProfile {
    const KIND: ResourceKind = ResourceKind::StorageProfile;

    async fn resolve(_connection: &dyn Connection, descriptor: &ResourceDescriptor) -> Result<Self> {
        descriptor
            .record
            .as_ref()
            .map(Self::from_record)
            .ok_or_else(|| VdcError::ParseError(format!("存储策略 {} 缺少查询记录", descriptor.link)))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn link(&self) -> &str {
        &self.link
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_record_defaults_missing_vdc_name() {
        let record = QueryRecord {
            name: "sp-gold".to_string(),
            href: "/api/vdcStorageProfile/sp-gold".to_string(),
            vdc_name: None,
            storage_used_mb: 0,
            storage_limit_mb: 0,
        };

        let profile = StorageProfile::from_record(&record);
        assert_eq!(profile.link, "/api/vdcStorageProfile/sp-gold");
        assert_eq!(profile.vdc_name, "");
    }
}
