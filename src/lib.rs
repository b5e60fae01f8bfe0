//! jbod_core: 基于 JBOD 网络阵列的线性卷
//!
//! 这个库把一个只能通过二进制报文协议访问的远程多磁盘阵列，
//! 呈现为一个可按字节寻址的线性卷：
//! - **线路协议**：命令码位打包、网络字节序报文编解码
//! - **块缓存**：固定容量、按逻辑访问时间 LRU 驱逐
//! - **地址转换**：任意字节区间拆分为跨块、跨盘的 seek/read/write 序列
//!
//! # 示例
//!
//! ```rust,ignore
//! use jbod_core::{Volume, VolumeConfig, Result};
//!
//! fn main() -> Result<()> {
//!     let config = VolumeConfig {
//!         cache_entries: Some(64),
//!         ..VolumeConfig::default()
//!     };
//!     let mut volume = Volume::connect(&config)?;
//!     volume.mount()?;
//!
//!     volume.write(1000, b"hello")?;
//!     let mut buf = [0u8; 5];
//!     volume.read(1000, &mut buf)?;
//!
//!     volume.unmount()?;
//!     volume.disconnect();
//!     Ok(())
//! }
//! ```
//!
//! # 模块结构
//!
//! - [`error`] - 错误类型定义
//! - [`consts`] - 阵列几何与协议常量
//! - [`types`] - 块缓冲区与地址分解
//! - [`protocol`] - 命令码与报文编解码
//! - [`net`] - TCP 客户端
//! - [`cache`] - 块缓存
//! - [`volume`] - 线性卷与地址转换

#![warn(missing_docs)]

// ===== 核心模块 =====

/// 错误处理
pub mod error;

/// 常量定义
pub mod consts;

/// 基础数据类型
pub mod types;

/// 线路协议
pub mod protocol;

/// 网络传输
pub mod net;

/// 块缓存
pub mod cache;

/// 线性卷
pub mod volume;

// ===== 公共导出 =====

// 错误处理
pub use error::{Error, ErrorKind, Result};

// 基础类型
pub use types::{Block, BlockAddr};

// 协议
pub use protocol::{Command, CommandKind, Packet, PacketHeader};

// 网络
pub use net::{JbodClient, TransportStats};

// Cache
pub use cache::{BlockCache, CacheEntry, CacheStats, EntryFlags};

// Volume
pub use volume::{JbodDevice, Volume, VolumeConfig, VolumeStats};
