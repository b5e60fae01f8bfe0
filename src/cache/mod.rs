//! 块缓存模块
//!
//! 固定容量的块缓存（写操作透写到设备后同步缓存），按逻辑访问时间做 LRU 驱逐。
//!
//! # 主要组件
//!
//! - [`CacheEntry`] - 单个缓存条目，包含位置、数据与访问时间
//! - [`BlockCache`] - 缓存表，提供创建、销毁、查找、更新与插入
//! - [`EntryFlags`] - 条目状态标志
//! - [`CacheStats`] - 命中统计
//!
//! # 使用示例
//!
//! ```rust,ignore
//! use jbod_core::cache::BlockCache;
//!
//! let mut cache = BlockCache::new();
//! cache.create(16)?;
//!
//! cache.insert(0, 3, &block)?;
//!
//! let mut out = [0u8; 256];
//! if cache.lookup(0, 3, &mut out).is_ok() {
//!     // 命中
//! }
//!
//! cache.report_hit_rate();
//! cache.destroy()?;
//! ```
//!
//! 缓存没有内部锁，需要跨线程共享时由调用方在外层加锁。

mod block_cache;
mod entry;

pub use block_cache::{BlockCache, CacheStats};
pub use entry::{CacheEntry, EntryFlags};
