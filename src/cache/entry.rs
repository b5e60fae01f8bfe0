//! 缓存条目结构

use bitflags::bitflags;

use crate::types::{zeroed_block, Block};

bitflags! {
    /// 缓存条目标志
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct EntryFlags: u8 {
        /// 条目有效
        const VALID = 0x01;
    }
}

/// 缓存条目
///
/// 条目只属于 [`BlockCache`](super::BlockCache)，数据以值拷贝的方式进出，
/// 不会把内部引用交给外部。
///
/// # 字段说明
///
/// - `disk_id` / `block_id`: 条目对应的阵列位置
/// - `data`: 块数据
/// - `access_time`: 最近访问的逻辑时钟值（越小越旧）
/// - `flags`: 条目状态标志
#[derive(Clone)]
pub struct CacheEntry {
    /// 条目状态标志
    pub flags: EntryFlags,

    /// 磁盘编号
    pub disk_id: u8,

    /// 块编号
    pub block_id: u8,

    /// 块数据
    pub data: Block,

    /// 最近访问时间
    pub access_time: u64,
}

impl CacheEntry {
    /// 创建空条目（无效，访问时间为 0）
    pub const fn empty() -> Self {
        Self {
            flags: EntryFlags::empty(),
            disk_id: 0,
            block_id: 0,
            data: zeroed_block(),
            access_time: 0,
        }
    }

    /// 检查条目是否有效
    pub fn is_valid(&self) -> bool {
        self.flags.contains(EntryFlags::VALID)
    }

    /// 标记条目有效
    pub fn mark_valid(&mut self) {
        self.flags.insert(EntryFlags::VALID);
    }

    /// 检查条目是否对应给定位置
    pub fn matches(&self, disk_id: u8, block_id: u8) -> bool {
        self.is_valid() && self.disk_id == disk_id && self.block_id == block_id
    }
}

impl Default for CacheEntry {
    fn default() -> Self {
        Self::empty()
    }
}

impl core::fmt::Debug for CacheEntry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CacheEntry")
            .field("flags", &self.flags)
            .field("disk_id", &self.disk_id)
            .field("block_id", &self.block_id)
            .field("access_time", &self.access_time)
            .finish()
    }
}
