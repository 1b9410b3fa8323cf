//! 容量配额计算
//!
//! 平台用上限 `0` 表示未配置上限，此时可用量固定返回 [`UNLIMITED`]（`-1`）。
//! 上限大于 0 时可用量为 `limit - used`，超配时允许为负数，不做截断。

use serde::{Deserialize, Serialize};

/// 无上限
pub const UNLIMITED: i64 = -1;

/// 可用量
pub fn available(limit: i64, used: i64) -> i64 {
    if limit > 0 {
        limit.saturating_sub(used)
    } else {
        UNLIMITED
    }
}

/// 可用 CPU 核数
pub fn available_cores(limit: i64, used: i64) -> i64 {
    available(limit, used)
}

/// 可用内存（MB）
pub fn available_memory_mb(limit: i64, used: i64) -> i64 {
    available(limit, used)
}

/// 单个容量维度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityQuota {
    pub limit: i64,
    pub used: i64,
}

impl CapacityQuota {
    pub fn new(limit: i64, used: i64) -> Self {
        Self { limit, used }
    }

    pub fn available(&self) -> i64 {
        available(self.limit, self.used)
    }

    pub fn is_unlimited(&self) -> bool {
        self.limit <= 0
    }
}

/// CPU 容量
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cpu {
    pub quota: CapacityQuota,
}

impl Cpu {
    pub fn available_cores(&self) -> i64 {
        available_cores(self.quota.limit, self.quota.used)
    }

    pub fn is_unlimited(&self) -> bool {
        self.quota.is_unlimited()
    }
}

/// 内存容量
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memory {
    pub quota: CapacityQuota,
}

impl Memory {
    pub fn available_mb(&self) -> i64 {
        available_memory_mb(self.quota.limit, self.quota.used)
    }

    pub fn is_unlimited(&self) -> bool {
        self.quota.is_unlimited()
    }
}

/// VDC 计算资源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resources {
    pub cpu: Cpu,
    pub memory: Memory,
}

impl Resources {
    pub fn new(cpu: CapacityQuota, memory: CapacityQuota) -> Self {
        Self {
            cpu: Cpu { quota: cpu },
            memory: Memory { quota: memory },
        }
    }
}
