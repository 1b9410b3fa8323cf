//! 独立磁盘生命周期管理
//!
//! - 创建：参数校验在任何网络请求之前完成
//! - 删除单个：名称必须唯一匹配，且磁盘未挂载
//! - 删除全部同名：逐个尝试，失败只记录日志，全部结束后汇总

use futures_util::future::join_all;
use serde::Deserialize;
use tracing::{debug, error, info};
use vcd_session::media_type;

use crate::error::{Result, VdcError};
use crate::models::{DiskCreateParams, ResourceDescriptor, ResourceKind, VmReference};
use crate::resolver::{self, NameMatch};
use crate::resources::{ChildResource, Disk};
use crate::vdc::Vdc;

/// 创建请求的响应，只关心新资源的链接
#[derive(Debug, Deserialize)]
struct CreatedEntity {
    href: String,
}

pub(crate) struct DiskLifecycle<'v, 'a> {
    vdc: &'v Vdc<'a>,
}

impl<'v, 'a> DiskLifecycle<'v, 'a> {
    pub(crate) fn new(vdc: &'v Vdc<'a>) -> Self {
        Self { vdc }
    }

    pub(crate) async fn create(
        &self,
        name: &str,
        size_mb: i64,
        locality: Option<&VmReference>,
        bus_type: Option<&str>,
        bus_sub_type: Option<&str>,
    ) -> Result<Disk> {
        let params = DiskCreateParams::new(name, size_mb, locality, bus_type, bus_sub_type)?;
        info!(
            "创建独立磁盘: {} ({} MB, bus={}/{})",
            params.name(),
            params.size_mb(),
            params.bus_type().code(),
            params.bus_sub_type()
        );
        if let Some(vm) = params.locality() {
            debug!("磁盘 {} 就近放置于虚拟机 {} ({})", name, vm.name, vm.href);
        }

        let snapshot = self.vdc.snapshot().await?;
        let add_link = snapshot
            .add_disk_link()
            .ok_or_else(|| VdcError::MissingLink(format!("VDC {} 不支持创建磁盘", self.vdc.name())))?;

        let response = self
            .vdc
            .connection()
            .post(add_link, params.to_payload(), media_type::DISK_CREATE_PARAMS)
            .await?;

        let created: CreatedEntity = serde_json::from_value(response)
            .map_err(|e| VdcError::ParseError(format!("创建磁盘响应: {}", e)))?;
        debug!("独立磁盘已创建: {}", created.href);

        let descriptor = ResourceDescriptor::new(ResourceKind::Disk, name, &created.href);
        Disk::resolve(self.vdc.connection(), &descriptor).await
    }

    pub(crate) async fn delete_by_name(&self, name: &str) -> Result<()> {
        info!("按名称删除独立磁盘: {}", name);
        let descriptors = self.vdc.snapshot().await?.descriptors(ResourceKind::Disk);

        match resolver::classify(&descriptors, name) {
            NameMatch::Empty => Err(VdcError::not_found(ResourceKind::Disk, name)),
            NameMatch::Multiple(matches) => Err(VdcError::AmbiguousDisk {
                name: name.to_string(),
                links: matches.iter().map(|d| d.link.clone()).collect(),
            }),
            NameMatch::Unique(descriptor) => self.delete_descriptor(descriptor).await,
        }
    }

    pub(crate) async fn delete_all_by_name(&self, name: &str) -> Result<()> {
        info!("删除全部同名独立磁盘: {}", name);
        let descriptors = self.vdc.snapshot().await?.descriptors(ResourceKind::Disk);
        let matches = resolver::resolve_all_by_name(&descriptors, name);

        if matches.is_empty() {
            info!("没有名称为 {} 的独立磁盘", name);
            return Ok(());
        }

        let outcomes = join_all(
            matches
                .iter()
                .map(|descriptor| async move { (*descriptor, self.delete_descriptor(descriptor).await) }),
        )
        .await;

        let mut failed = Vec::new();
        for (descriptor, outcome) in outcomes {
            if let Err(e) = outcome {
                error!("删除独立磁盘失败: {} ({}): {}", descriptor.name, descriptor.link, e);
                failed.push(descriptor.link.clone());
            }
        }

        if failed.is_empty() {
            info!("已删除 {} 个名称为 {} 的独立磁盘", matches.len(), name);
            Ok(())
        } else {
            Err(VdcError::BatchDeleteFailed {
                name: name.to_string(),
                failed,
            })
        }
    }

    /// 读取磁盘当前状态，未挂载时删除
    async fn delete_descriptor(&self, descriptor: &ResourceDescriptor) -> Result<()> {
        let disk = Disk::resolve(self.vdc.connection(), descriptor).await?;
        self.delete_single(&disk).await
    }

    async fn delete_single(&self, disk: &Disk) -> Result<()> {
        if let Some(vm) = disk.attached_vm() {
            return Err(VdcError::DiskAttached {
                name: disk.name.clone(),
                link: disk.link.clone(),
                vm: vm.name.clone(),
            });
        }

        debug!("删除独立磁盘: {} ({})", disk.name, disk.link);
        self.vdc.connection().delete(&disk.link).await?;
        Ok(())
    }
}
