//! 虚拟数据中心数据模型
//!
//! 平台返回的 VDC 文档在这里被反序列化为强类型结构，
//! 上层只通过这些结构读取子资源描述与容量信息，不直接处理原始文档。

mod disk;

pub use disk::{BusType, DiskCreateParams, VmReference};

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use vcd_session::media_type;

use crate::error::{Result, VdcError};
use crate::quota::CapacityQuota;

/// 子资源类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    StorageProfile,
    VApp,
    Network,
    Disk,
    EdgeGateway,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ResourceKind::StorageProfile => "Storage profile",
            ResourceKind::VApp => "VApp",
            ResourceKind::Network => "Network",
            ResourceKind::Disk => "Disk",
            ResourceKind::EdgeGateway => "Edge gateway",
        };
        f.write_str(label)
    }
}

/// 子资源描述：名称 + 链接 + 类型
///
/// 同一类型下名称不保证唯一（磁盘尤其如此），链接唯一。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDescriptor {
    pub name: String,
    pub link: String,
    pub kind: ResourceKind,

    /// 来自查询结果时附带的记录
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record: Option<QueryRecord>,
}

impl ResourceDescriptor {
    pub fn new(kind: ResourceKind, name: &str, link: &str) -> Self {
        Self {
            name: name.to_string(),
            link: link.to_string(),
            kind,
            record: None,
        }
    }

    pub fn with_record(mut self, record: QueryRecord) -> Self {
        self.record = Some(record);
        self
    }
}

/// 文档中的资源引用
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reference {
    pub name: String,
    pub href: String,
    #[serde(rename = "type", default)]
    pub media_type: String,
}

/// 文档中的操作链接
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    pub rel: String,
    pub href: String,
    #[serde(rename = "type", default)]
    pub media_type: Option<String>,
}

/// 单个容量维度的上限与用量
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Capacity {
    #[serde(default)]
    pub units: String,
    #[serde(default)]
    pub limit: i64,
    #[serde(default)]
    pub used: i64,
}

/// 计算容量
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComputeCapacity {
    #[serde(default)]
    pub cpu: Capacity,
    #[serde(default)]
    pub memory: Capacity,
}

/// VDC 文档快照
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VdcDocument {
    pub name: String,
    pub href: String,
    #[serde(default)]
    pub compute_capacity: ComputeCapacity,
    #[serde(default)]
    pub resource_entities: Vec<Reference>,
    #[serde(default)]
    pub available_networks: Vec<Reference>,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl VdcDocument {
    /// 从原始文档解析
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| VdcError::ParseError(format!("VDC 文档: {}", e)))
    }

    /// 文档内直接携带的子资源描述，保持平台返回的顺序
    ///
    /// 存储策略与边缘网关不在 VDC 文档内，需要单独查询，这里返回空。
    pub fn descriptors(&self, kind: ResourceKind) -> Vec<ResourceDescriptor> {
        match kind {
            ResourceKind::VApp => self.entities_of(kind, media_type::VAPP),
            ResourceKind::Disk => self.entities_of(kind, media_type::DISK),
            ResourceKind::Network => self
                .available_networks
                .iter()
                .map(|r| ResourceDescriptor::new(kind, &r.name, &r.href))
                .collect(),
            ResourceKind::StorageProfile | ResourceKind::EdgeGateway => Vec::new(),
        }
    }

    fn entities_of(&self, kind: ResourceKind, media_type: &str) -> Vec<ResourceDescriptor> {
        self.resource_entities
            .iter()
            .filter(|r| r.media_type == media_type)
            .map(|r| ResourceDescriptor::new(kind, &r.name, &r.href))
            .collect()
    }

    pub fn cpu_quota(&self) -> CapacityQuota {
        let cpu = &self.compute_capacity.cpu;
        CapacityQuota::new(cpu.limit, cpu.used)
    }

    pub fn memory_quota(&self) -> CapacityQuota {
        let memory = &self.compute_capacity.memory;
        CapacityQuota::new(memory.limit, memory.used)
    }

    /// 创建独立磁盘的链接
    pub fn add_disk_link(&self) -> Option<&str> {
        self.links
            .iter()
            .find(|l| l.rel == "add" && l.media_type.as_deref() == Some(media_type::DISK_CREATE_PARAMS))
            .map(|l| l.href.as_str())
    }

    /// 边缘网关查询链接
    pub fn edge_gateways_link(&self) -> Option<&str> {
        self.links
            .iter()
            .find(|l| l.rel == "edgeGateways")
            .map(|l| l.href.as_str())
    }
}

/// 查询结果中的一条记录
///
/// 存储策略查询额外返回所属 VDC 与容量字段，其他查询中这些字段缺省。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRecord {
    pub name: String,
    pub href: String,

    #[serde(rename = "vdcName", default, skip_serializing_if = "Option::is_none")]
    pub vdc_name: Option<String>,

    #[serde(rename = "storageUsedMB", default)]
    pub storage_used_mb: i64,

    #[serde(rename = "storageLimitMB", default)]
    pub storage_limit_mb: i64,
}

/// 查询结果
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryResultRecords {
    #[serde(default)]
    pub record: Vec<QueryRecord>,
}

impl QueryResultRecords {
    pub fn from_value(value: Value) -> Result<Self> {
        // 无记录时平台可能返回空正文
        if value.is_null() {
            return Ok(Self::default());
        }
        serde_json::from_value(value).map_err(|e| VdcError::ParseError(format!("查询结果: {}", e)))
    }

    pub fn descriptors(&self, kind: ResourceKind) -> Vec<ResourceDescriptor> {
        self.record
            .iter()
            .map(|r| ResourceDescriptor::new(kind, &r.name, &r.href).with_record(r.clone()))
            .collect()
    }
}

/// 存储策略查询链接
///
/// VDC 名称可能包含空格，这里统一做 URL 编码。
pub fn storage_profile_query(vdc_name: &str) -> String {
    format!(
        "/api/query?type=orgVdcStorageProfile&filter=vdcName=={}",
        urlencoding::encode(vdc_name)
    )
}
