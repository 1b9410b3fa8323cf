//! 虚拟数据中心

use futures_util::future::try_join_all;
use tracing::{debug, info};
use vcd_session::Connection;

use crate::disk::DiskLifecycle;
use crate::error::{Result, VdcError};
use crate::models::{
    storage_profile_query, QueryResultRecords, ResourceDescriptor, ResourceKind, VdcDocument,
    VmReference,
};
use crate::quota::Resources;
use crate::resolver;
use crate::resources::{ChildResource, Disk, EdgeGateway, Network, StorageProfile, VApp};

/// 虚拟数据中心
///
/// 连接由调用方持有，这里只借用。每次读取子资源都会重新获取一次 VDC 文档，
/// 同一次操作内的所有推导都基于这一份快照。
pub struct Vdc<'a> {
    connection: &'a dyn Connection,
    link: String,
    name: String,
}

impl<'a> Vdc<'a> {
    /// 读取 VDC 文档并创建实例
    pub async fn new(connection: &'a dyn Connection, link: &str) -> Result<Self> {
        info!("加载虚拟数据中心: {}", link);
        let document = VdcDocument::from_value(connection.get(link).await?)?;
        Ok(Self::from_document(connection, link, &document))
    }

    /// 使用已获取的文档创建实例
    pub fn from_document(connection: &'a dyn Connection, link: &str, document: &VdcDocument) -> Self {
        Self {
            connection,
            link: link.to_string(),
            name: document.name.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    /// 修改显示名称
    ///
    /// 只影响显示和日志。读取子资源时使用快照中的名称，VDC 身份仍以链接为准。
    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub(crate) fn connection(&self) -> &'a dyn Connection {
        self.connection
    }

    /// 获取最新的 VDC 文档快照
    pub async fn snapshot(&self) -> Result<VdcDocument> {
        debug!("刷新 VDC 文档: {}", self.link);
        VdcDocument::from_value(self.connection.get(&self.link).await?)
    }

    /// 计算资源配额
    pub async fn resources(&self) -> Result<Resources> {
        info!("查询 VDC 计算资源: {}", self.name);
        let snapshot = self.snapshot().await?;
        Ok(Resources::new(snapshot.cpu_quota(), snapshot.memory_quota()))
    }

    // ============================================
    // 通用子资源访问
    // ============================================

    /// 指定类型的全部子资源描述
    pub async fn descriptors(&self, kind: ResourceKind) -> Result<Vec<ResourceDescriptor>> {
        match kind {
            ResourceKind::StorageProfile => {
                let snapshot = self.snapshot().await?;
                self.query(kind, &storage_profile_query(&snapshot.name)).await
            }
            ResourceKind::EdgeGateway => {
                let snapshot = self.snapshot().await?;
                match snapshot.edge_gateways_link() {
                    Some(link) => self.query(kind, link).await,
                    None => {
                        debug!("VDC {} 没有边缘网关查询链接", self.name);
                        Ok(Vec::new())
                    }
                }
            }
            ResourceKind::VApp | ResourceKind::Network | ResourceKind::Disk => {
                Ok(self.snapshot().await?.descriptors(kind))
            }
        }
    }

    async fn query(&self, kind: ResourceKind, link: &str) -> Result<Vec<ResourceDescriptor>> {
        let records = QueryResultRecords::from_value(self.connection.get(link).await?)?;
        Ok(records.descriptors(kind))
    }

    /// 读取指定类型的全部子资源，保持平台返回的顺序
    pub async fn list<R: ChildResource>(&self) -> Result<Vec<R>> {
        let descriptors = self.descriptors(R::KIND).await?;
        self.resolve_all(descriptors.iter()).await
    }

    /// 指定类型的全部子资源名称，保持平台返回的顺序
    pub async fn list_names<R: ChildResource>(&self) -> Result<Vec<String>> {
        let descriptors = self.descriptors(R::KIND).await?;
        Ok(descriptors.into_iter().map(|d| d.name).collect())
    }

    /// 按名称查找子资源
    pub async fn find_by_name<R: ChildResource>(&self, name: &str) -> Result<R> {
        let descriptors = self.descriptors(R::KIND).await?;
        let descriptor = resolver::resolve_by_name(&descriptors, R::KIND, name)?;
        R::resolve(self.connection, descriptor).await
    }

    /// 按名称查找全部同名子资源，无匹配时返回 `NotFound`
    pub async fn find_all_by_name<R: ChildResource>(&self, name: &str) -> Result<Vec<R>> {
        let descriptors = self.descriptors(R::KIND).await?;
        let matches = resolver::resolve_all_by_name(&descriptors, name);
        if matches.is_empty() {
            return Err(VdcError::not_found(R::KIND, name));
        }
        self.resolve_all(matches.into_iter()).await
    }

    /// 是否存在指定名称的子资源
    pub async fn exists<R: ChildResource>(&self, name: &str) -> Result<bool> {
        let descriptors = self.descriptors(R::KIND).await?;
        Ok(resolver::exists_by_name(&descriptors, name))
    }

    async fn resolve_all<'d, R: ChildResource>(
        &self,
        descriptors: impl Iterator<Item = &'d ResourceDescriptor>,
    ) -> Result<Vec<R>> {
        try_join_all(descriptors.map(|d| R::resolve(self.connection, d))).await
    }

    // ============================================
    // 存储策略
    // ============================================

    pub async fn storage_profiles(&self) -> Result<Vec<StorageProfile>> {
        info!("查询存储策略: {}", self.name);
        self.list().await
    }

    pub async fn list_storage_profiles(&self) -> Result<Vec<String>> {
        self.list_names::<StorageProfile>().await
    }

    pub async fn find_storage_profile_by_name(&self, name: &str) -> Result<StorageProfile> {
        info!("按名称查找存储策略: {}", name);
        self.find_by_name(name).await
    }

    pub async fn storage_profile_exists(&self, name: &str) -> Result<bool> {
        self.exists::<StorageProfile>(name).await
    }

    // ============================================
    // vApp
    // ============================================

    pub async fn vapps(&self) -> Result<Vec<VApp>> {
        info!("查询 vApp: {}", self.name);
        self.list().await
    }

    pub async fn list_vapps(&self) -> Result<Vec<String>> {
        self.list_names::<VApp>().await
    }

    pub async fn find_vapp_by_name(&self, name: &str) -> Result<VApp> {
        info!("按名称查找 vApp: {}", name);
        self.find_by_name(name).await
    }

    pub async fn vapp_exists(&self, name: &str) -> Result<bool> {
        self.exists::<VApp>(name).await
    }

    // ============================================
    // 网络
    // ============================================

    pub async fn networks(&self) -> Result<Vec<Network>> {
        info!("查询网络: {}", self.name);
        self.list().await
    }

    pub async fn list_networks(&self) -> Result<Vec<String>> {
        self.list_names::<Network>().await
    }

    pub async fn find_network_by_name(&self, name: &str) -> Result<Network> {
        info!("按名称查找网络: {}", name);
        self.find_by_name(name).await
    }

    pub async fn network_exists(&self, name: &str) -> Result<bool> {
        self.exists::<Network>(name).await
    }

    // ============================================
    // 边缘网关
    // ============================================

    pub async fn edge_gateways(&self) -> Result<Vec<EdgeGateway>> {
        info!("查询边缘网关: {}", self.name);
        self.list().await
    }

    pub async fn list_edge_gateways(&self) -> Result<Vec<String>> {
        self.list_names::<EdgeGateway>().await
    }

    pub async fn find_edge_gateway_by_name(&self, name: &str) -> Result<EdgeGateway> {
        info!("按名称查找边缘网关: {}", name);
        self.find_by_name(name).await
    }

    pub async fn edge_gateway_exists(&self, name: &str) -> Result<bool> {
        self.exists::<EdgeGateway>(name).await
    }

    // ============================================
    // 独立磁盘
    // ============================================

    pub async fn disks(&self) -> Result<Vec<Disk>> {
        info!("查询独立磁盘: {}", self.name);
        self.list().await
    }

    pub async fn list_disks(&self) -> Result<Vec<String>> {
        self.list_names::<Disk>().await
    }

    /// 按名称查找磁盘，磁盘名称不唯一，返回全部匹配项
    pub async fn find_disks_by_name(&self, name: &str) -> Result<Vec<Disk>> {
        info!("按名称查找独立磁盘: {}", name);
        self.find_all_by_name(name).await
    }

    pub async fn disk_exists(&self, name: &str) -> Result<bool> {
        self.exists::<Disk>(name).await
    }

    /// 创建独立磁盘
    ///
    /// # Arguments
    /// * `name` - 磁盘名称
    /// * `size_mb` - 容量（MB），必须大于 0
    /// * `locality` - 就近放置参考的虚拟机（可选）
    /// * `bus_type` - 总线类型 ide / scsi / sata，默认 scsi
    /// * `bus_sub_type` - 总线子类型，默认取总线类型的默认值
    pub async fn create_disk(
        &self,
        name: &str,
        size_mb: i64,
        locality: Option<&VmReference>,
        bus_type: Option<&str>,
        bus_sub_type: Option<&str>,
    ) -> Result<Disk> {
        DiskLifecycle::new(self)
            .create(name, size_mb, locality, bus_type, bus_sub_type)
            .await
    }

    /// 按名称删除唯一的独立磁盘
    ///
    /// 无匹配返回 `NotFound`；多个同名磁盘或磁盘已挂载时拒绝删除。
    pub async fn delete_disk_by_name(&self, name: &str) -> Result<&Self> {
        DiskLifecycle::new(self).delete_by_name(name).await?;
        Ok(self)
    }

    /// 删除全部同名独立磁盘
    ///
    /// 逐个尝试删除，单个失败不影响其他磁盘；全部尝试结束后如有失败，
    /// 返回一个汇总错误。已成功的删除不会回滚。
    pub async fn delete_all_disks_by_name(&self, name: &str) -> Result<&Self> {
        DiskLifecycle::new(self).delete_all_by_name(name).await?;
        Ok(self)
    }
}

impl std::fmt::Debug for Vdc<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vdc")
            .field("name", &self.name)
            .field("link", &self.link)
            .finish()
    }
}
