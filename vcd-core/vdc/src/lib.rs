//! vCloud 虚拟数据中心 (VDC)
//!
//! 租户在虚拟化平台上的一份计算、内存、存储与网络容量分配，
//! 以强类型对象形式提供给调用方。
//!
//! # 功能
//!
//! - **子资源访问**: 存储策略、vApp、网络、独立磁盘、边缘网关的列举、按名称查找与存在性判断
//! - **名称解析** (`resolver`): 精确匹配，区分唯一 / 无匹配 / 多个同名三种结果
//! - **配额计算** (`quota`): 按平台上限与用量计算可用量，上限为 0 表示不限（可用量 `-1`）
//! - **独立磁盘管理**: 创建（总线类型校验、就近放置）、按名称删除、批量删除同名磁盘
//!
//! # 示例
//!
//! ```ignore
//! use vcd_session::{RestConnection, SessionConfig};
//! use vcd_vdc::Vdc;
//!
//! let connection = RestConnection::new(SessionConfig::load()?)?;
//! connection.login().await?;
//!
//! let vdc = Vdc::new(&connection, "/api/vdc/0a1b2c").await?;
//!
//! // 查询可用 CPU 核数，-1 表示不限
//! let cores = vdc.resources().await?.cpu.available_cores();
//!
//! // 创建并删除独立磁盘
//! let disk = vdc.create_disk("data-1", 1024, None, Some("scsi"), Some("lsilogic")).await?;
//! vdc.delete_disk_by_name(&disk.name).await?;
//! ```

pub mod error;
pub mod models;
pub mod quota;
pub mod resolver;
pub mod resources;

mod disk;
mod vdc;

pub use error::{ErrorKind, Result, VdcError};
pub use models::{
    BusType, DiskCreateParams, QueryRecord, QueryResultRecords, ResourceDescriptor, ResourceKind,
    VdcDocument, VmReference,
};
pub use quota::{CapacityQuota, Cpu, Memory, Resources, UNLIMITED};
pub use resolver::NameMatch;
pub use resources::{
    AttachmentState, ChildResource, Disk, EdgeGateway, Network, StorageProfile, VApp,
};
pub use vdc::Vdc;
