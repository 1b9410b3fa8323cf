//! 按名称解析子资源描述
//!
//! 所有函数都只针对调用方传入的描述快照做线性匹配（精确、区分大小写），
//! 不访问平台。

use tracing::debug;

use crate::error::{Result, VdcError};
use crate::models::{ResourceDescriptor, ResourceKind};

/// 名称匹配结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameMatch<'a> {
    Empty,
    Unique(&'a ResourceDescriptor),
    Multiple(Vec<&'a ResourceDescriptor>),
}

impl<'a> NameMatch<'a> {
    pub fn len(&self) -> usize {
        match self {
            NameMatch::Empty => 0,
            NameMatch::Unique(_) => 1,
            NameMatch::Multiple(matches) => matches.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, NameMatch::Empty)
    }

    /// 全部匹配项，保持原有顺序
    pub fn into_vec(self) -> Vec<&'a ResourceDescriptor> {
        match self {
            NameMatch::Empty => Vec::new(),
            NameMatch::Unique(descriptor) => vec![descriptor],
            NameMatch::Multiple(matches) => matches,
        }
    }
}

/// 对集合按名称分类
pub fn classify<'a>(collection: &'a [ResourceDescriptor], name: &str) -> NameMatch<'a> {
    let mut matches = resolve_all_by_name(collection, name);
    match matches.len() {
        0 => NameMatch::Empty,
        1 => NameMatch::Unique(matches.remove(0)),
        _ => NameMatch::Multiple(matches),
    }
}

/// 返回名称匹配的描述
///
/// 无匹配时返回 `NotFound`。存在多个同名项时返回第一个；
/// 需要区分多个同名项的调用方（磁盘）应使用 [`resolve_all_by_name`]。
pub fn resolve_by_name<'a>(
    collection: &'a [ResourceDescriptor],
    kind: ResourceKind,
    name: &str,
) -> Result<&'a ResourceDescriptor> {
    match classify(collection, name) {
        NameMatch::Empty => Err(VdcError::not_found(kind, name)),
        NameMatch::Unique(descriptor) => Ok(descriptor),
        NameMatch::Multiple(matches) => {
            debug!("{} '{}' 存在 {} 个同名项，使用第一个", kind, name, matches.len());
            Ok(matches[0])
        }
    }
}

/// 返回全部名称匹配的描述，无匹配时为空
pub fn resolve_all_by_name<'a>(
    collection: &'a [ResourceDescriptor],
    name: &str,
) -> Vec<&'a ResourceDescriptor> {
    collection.iter().filter(|d| d.name == name).collect()
}

/// 是否存在名称匹配的描述
pub fn exists_by_name(collection: &[ResourceDescriptor], name: &str) -> bool {
    collection.iter().any(|d| d.name == name)
}
