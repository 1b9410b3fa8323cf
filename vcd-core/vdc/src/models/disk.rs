//! 独立磁盘相关模型

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{Result, VdcError};

/// 虚拟机引用
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VmReference {
    pub name: String,
    pub href: String,
}

impl VmReference {
    pub fn new(name: &str, href: &str) -> Self {
        Self {
            name: name.to_string(),
            href: href.to_string(),
        }
    }
}

/// 磁盘总线类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BusType {
    Ide,
    #[default]
    Scsi,
    Sata,
}

impl BusType {
    /// 按名称解析（不区分大小写）
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "ide" => Ok(BusType::Ide),
            "scsi" => Ok(BusType::Scsi),
            "sata" => Ok(BusType::Sata),
            _ => Err(VdcError::InvalidBusType(name.to_string())),
        }
    }

    /// 平台使用的类型代码
    pub fn code(&self) -> &'static str {
        match self {
            BusType::Ide => "5",
            BusType::Scsi => "6",
            BusType::Sata => "20",
        }
    }

    pub fn default_sub_type(&self) -> &'static str {
        match self {
            BusType::Ide => "ide",
            BusType::Scsi => "lsilogic",
            BusType::Sata => "vmware.sata.ahci",
        }
    }

    /// 解析该总线下的子类型（不区分大小写），返回平台使用的取值
    pub fn sub_type(&self, name: &str) -> Result<&'static str> {
        let sub_type = match (self, name.to_ascii_lowercase().as_str()) {
            (BusType::Scsi, "buslogic") => "buslogic",
            (BusType::Scsi, "lsilogic") => "lsilogic",
            (BusType::Scsi, "lsilogicsas") => "lsilogicsas",
            (BusType::Scsi, "virtualscsi") => "VirtualSCSI",
            (BusType::Ide, "ide") => "ide",
            (BusType::Sata, "sata" | "ahci" | "vmware.sata.ahci") => "vmware.sata.ahci",
            _ => return Err(VdcError::InvalidBusSubType(name.to_string())),
        };
        Ok(sub_type)
    }
}

/// 创建独立磁盘请求
///
/// 只能通过 [`DiskCreateParams::new`] 构造，构造成功即表示参数已校验。
#[derive(Debug, Clone)]
pub struct DiskCreateParams {
    name: String,
    size_mb: i64,
    bus_type: BusType,
    bus_sub_type: &'static str,
    locality: Option<VmReference>,
}

impl DiskCreateParams {
    /// 校验并构造请求
    ///
    /// 校验顺序：容量 > 总线类型 > 总线子类型。
    /// 未指定总线类型时使用 SCSI，未指定子类型时使用该总线的默认子类型。
    pub fn new(
        name: &str,
        size_mb: i64,
        locality: Option<&VmReference>,
        bus_type: Option<&str>,
        bus_sub_type: Option<&str>,
    ) -> Result<Self> {
        if size_mb <= 0 {
            return Err(VdcError::InvalidSize(size_mb));
        }

        let bus_type = match bus_type {
            Some(name) => BusType::from_name(name)?,
            None => BusType::default(),
        };

        let bus_sub_type = match bus_sub_type {
            Some(name) => bus_type.sub_type(name)?,
            None => bus_type.default_sub_type(),
        };

        Ok(Self {
            name: name.to_string(),
            size_mb,
            bus_type,
            bus_sub_type,
            locality: locality.cloned(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size_mb(&self) -> i64 {
        self.size_mb
    }

    pub fn bus_type(&self) -> BusType {
        self.bus_type
    }

    pub fn bus_sub_type(&self) -> &'static str {
        self.bus_sub_type
    }

    pub fn locality(&self) -> Option<&VmReference> {
        self.locality.as_ref()
    }

    /// 生成提交给平台的请求文档
    pub fn to_payload(&self) -> Value {
        let mut payload = json!({
            "disk": {
                "name": self.name,
                "sizeMb": self.size_mb,
                "busType": self.bus_type.code(),
                "busSubType": self.bus_sub_type,
            }
        });

        if let Some(vm) = &self.locality {
            payload["locality"] = json!({ "name": vm.name, "href": vm.href });
        }

        payload
    }
}
