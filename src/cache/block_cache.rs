//! 块缓存实现
//!
//! 固定容量的 (disk, block) → 数据 表，按逻辑访问时间做 LRU 驱逐。
//!
//! # 访问时间
//!
//! 缓存内部维护一个单调递增的逻辑时钟，三个操作对条目打时间戳的方式不同：
//!
//! | 操作       | 时间戳                         |
//! |------------|--------------------------------|
//! | `lookup`   | 时钟先加一，再写入条目          |
//! | `update`   | 先写入当前时钟，时钟再加一      |
//! | `insert`   | 固定写入基线值 1               |
//!
//! 新插入的块因此比通过 `lookup` 访问过的块更早被驱逐。这一行为是
//! 既定约定，驱逐顺序依赖它。
//!
//! # 驱逐策略
//!
//! `insert` 线性扫描全部条目，选择访问时间最小的条目作为牺牲者，
//! 时间相同时取下标最小者。从未使用过的槽位时间为 0，总是最先被选中。

use super::entry::CacheEntry;
use crate::consts::*;
use crate::error::{Error, ErrorKind, Result};
use crate::types::Block;

/// 缓存统计信息
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// 未命中的查询次数（不含命中与参数被拒绝的调用）
    pub queries: u64,
    /// 命中次数
    pub hits: u64,
}

impl CacheStats {
    /// 计算命中率 hits / queries
    ///
    /// 命中不计入 queries，结果可能大于 1.0。尚无查询时返回 0.0
    pub fn hit_rate(&self) -> f64 {
        if self.queries == 0 {
            0.0
        } else {
            self.hits as f64 / self.queries as f64
        }
    }
}

impl core::fmt::Display for CacheStats {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Hit rate: {:5.1}%", self.hit_rate() * 100.0)
    }
}

/// 块缓存
///
/// `BlockCache::default()` 处于未创建状态，所有查询与插入都会失败；
/// 调用 [`create`](Self::create) 后才分配条目表，[`destroy`](Self::destroy)
/// 释放条目表并清零所有计数，之后可以再次创建。
#[derive(Default)]
pub struct BlockCache {
    /// 条目表，`None` 表示缓存未创建
    entries: Option<Box<[CacheEntry]>>,

    /// 逻辑时钟
    clock: u64,

    /// 统计信息
    stats: CacheStats,
}

impl BlockCache {
    /// 创建一个未启用的缓存
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建并启用指定容量的缓存
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let mut cache = Self::new();
        cache.create(capacity)?;
        Ok(cache)
    }

    /// 分配条目表
    ///
    /// # 参数
    ///
    /// * `capacity` - 条目数，范围 [2, 4096]
    ///
    /// # 错误
    ///
    /// - 容量越界：`InvalidInput`
    /// - 缓存已创建：`InvalidState`
    pub fn create(&mut self, capacity: usize) -> Result<()> {
        if !(CACHE_MIN_ENTRIES..=CACHE_MAX_ENTRIES).contains(&capacity) {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "cache capacity out of range",
            ));
        }
        if self.entries.is_some() {
            return Err(Error::new(ErrorKind::InvalidState, "cache already created"));
        }

        self.entries = Some(vec![CacheEntry::empty(); capacity].into_boxed_slice());
        log::debug!("[CACHE] created with {} entries", capacity);
        Ok(())
    }

    /// 释放条目表并重置时钟与统计信息
    ///
    /// # 错误
    ///
    /// 缓存未创建时返回 `InvalidState`
    pub fn destroy(&mut self) -> Result<()> {
        if self.entries.take().is_none() {
            return Err(Error::new(ErrorKind::InvalidState, "cache not created"));
        }

        self.clock = 0;
        self.stats = CacheStats::default();
        log::debug!("[CACHE] destroyed");
        Ok(())
    }

    /// 检查缓存是否已启用
    pub fn is_enabled(&self) -> bool {
        self.capacity() > 0
    }

    /// 查找块
    ///
    /// 命中时把数据拷贝到 `out`，推进逻辑时钟并刷新条目访问时间。
    ///
    /// # 错误
    ///
    /// - 缓存未创建：`InvalidState`（不计入查询次数）
    /// - 磁盘编号越界：`InvalidInput`（不计入查询次数）
    /// - 未命中：`NotFound`，计入一次查询
    pub fn lookup(&mut self, disk_id: u8, block_id: u8, out: &mut Block) -> Result<()> {
        let entries = Self::checked(&mut self.entries, disk_id)?;

        if let Some(entry) = entries.iter_mut().find(|e| e.matches(disk_id, block_id)) {
            *out = entry.data;
            self.clock += 1;
            entry.access_time = self.clock;
            self.stats.hits += 1;
            log::trace!("[CACHE] lookup disk={} block={} HIT", disk_id, block_id);
            return Ok(());
        }

        self.stats.queries += 1;
        log::debug!("[CACHE] lookup disk={} block={} MISS", disk_id, block_id);
        Err(Error::new(ErrorKind::NotFound, "block not in cache"))
    }

    /// 更新已缓存块的数据
    ///
    /// 只在有效条目匹配时生效，否则静默忽略。不做参数检查。
    pub fn update(&mut self, disk_id: u8, block_id: u8, data: &Block) {
        let Some(entries) = self.entries.as_deref_mut() else {
            return;
        };

        if let Some(entry) = entries.iter_mut().find(|e| e.matches(disk_id, block_id)) {
            entry.data = *data;
            entry.access_time = self.clock;
            self.clock += 1;
            log::trace!("[CACHE] update disk={} block={}", disk_id, block_id);
        }
    }

    /// 插入块
    ///
    /// 覆盖访问时间最小的条目（时间相同时取下标最小者），
    /// 新条目的访问时间为基线值 1。
    ///
    /// # 错误
    ///
    /// - 缓存未创建：`InvalidState`
    /// - 磁盘编号越界：`InvalidInput`
    /// - 块已在缓存中：`AlreadyExists`，缓存状态不变
    pub fn insert(&mut self, disk_id: u8, block_id: u8, data: &Block) -> Result<()> {
        let entries = Self::checked(&mut self.entries, disk_id)?;

        let mut lru = 0;
        for (i, entry) in entries.iter().enumerate() {
            if entry.matches(disk_id, block_id) {
                log::debug!(
                    "[CACHE] insert disk={} block={} rejected: duplicate",
                    disk_id,
                    block_id
                );
                return Err(Error::new(ErrorKind::AlreadyExists, "block already cached"));
            }
            if entry.access_time < entries[lru].access_time {
                lru = i;
            }
        }

        let victim = &mut entries[lru];
        if victim.is_valid() {
            log::debug!(
                "[CACHE] evict slot={} disk={} block={} (access_time={})",
                lru,
                victim.disk_id,
                victim.block_id,
                victim.access_time
            );
        }

        victim.mark_valid();
        victim.disk_id = disk_id;
        victim.block_id = block_id;
        victim.data = *data;
        victim.access_time = CACHE_INSERT_BASELINE;
        log::debug!("[CACHE] insert disk={} block={} slot={}", disk_id, block_id, lru);
        Ok(())
    }

    /// 检查块是否在缓存中（不计入统计，不改变访问时间）
    pub fn contains(&self, disk_id: u8, block_id: u8) -> bool {
        self.entries
            .as_deref()
            .map(|entries| entries.iter().any(|e| e.matches(disk_id, block_id)))
            .unwrap_or(false)
    }

    /// 获取缓存统计信息
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// 输出命中率
    ///
    /// 以百分比返回命中率并写入 info 日志；尚无查询时为 0.0
    pub fn report_hit_rate(&self) -> f64 {
        log::info!("[CACHE] {}", self.stats);
        self.stats.hit_rate() * 100.0
    }

    /// 获取缓存容量，未创建时为 0
    pub fn capacity(&self) -> usize {
        self.entries.as_deref().map_or(0, <[CacheEntry]>::len)
    }

    /// 获取有效条目数
    pub fn len(&self) -> usize {
        self.entries
            .as_deref()
            .map_or(0, |entries| entries.iter().filter(|e| e.is_valid()).count())
    }

    /// 检查是否没有有效条目
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 公共参数检查：缓存已创建且磁盘编号合法
    ///
    /// 块编号为 u8，取值范围天然合法
    fn checked(
        entries: &mut Option<Box<[CacheEntry]>>,
        disk_id: u8,
    ) -> Result<&mut [CacheEntry]> {
        let entries = entries
            .as_deref_mut()
            .ok_or(Error::new(ErrorKind::InvalidState, "cache not created"))?;
        if disk_id > JBOD_MAX_DISK_ID {
            return Err(Error::new(ErrorKind::InvalidInput, "disk id out of range"));
        }
        Ok(entries)
    }
}

impl core::fmt::Debug for BlockCache {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BlockCache")
            .field("capacity", &self.capacity())
            .field("len", &self.len())
            .field("clock", &self.clock)
            .field("stats", &self.stats)
            .finish()
    }
}
