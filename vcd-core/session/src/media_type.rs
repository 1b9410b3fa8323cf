//! 平台文档媒体类型

/// 创建独立磁盘请求
pub const DISK_CREATE_PARAMS: &str = "application/vnd.vmware.vcloud.diskCreateParams+json";

/// 独立磁盘
pub const DISK: &str = "application/vnd.vmware.vcloud.disk+json";

/// vApp
pub const VAPP: &str = "application/vnd.vmware.vcloud.vApp+json";
