//! JBOD 阵列常量定义
//!
//! 这个模块包含了阵列几何参数和线路协议的所有常量定义，包括：
//! - 块、磁盘与卷的大小
//! - 报文头布局
//! - 块缓存容量范围

//=============================================================================
// 阵列几何
//=============================================================================

/// 块大小（256 字节），也是线路协议的最小读写单位
pub const JBOD_BLOCK_SIZE: usize = 256;

/// 每块磁盘的块数
pub const JBOD_NUM_BLOCKS_PER_DISK: usize = 256;

/// 单块磁盘的字节数（65536 字节）
pub const JBOD_DISK_SIZE: usize = JBOD_BLOCK_SIZE * JBOD_NUM_BLOCKS_PER_DISK;

/// 阵列中的磁盘数
pub const JBOD_NUM_DISKS: usize = 16;

/// 卷总大小（16 × 65536 字节）
pub const JBOD_VOLUME_SIZE: usize = JBOD_DISK_SIZE * JBOD_NUM_DISKS;

/// 单次 read/write 调用允许的最大字节数
pub const JBOD_MAX_IO_SIZE: usize = 1024;

/// 最大磁盘编号
pub const JBOD_MAX_DISK_ID: u8 = (JBOD_NUM_DISKS - 1) as u8;

/// 最大块编号
pub const JBOD_MAX_BLOCK_ID: u8 = (JBOD_NUM_BLOCKS_PER_DISK - 1) as u8;

//=============================================================================
// 线路协议
//=============================================================================

/// 报文头长度：2 字节长度 + 4 字节命令码 + 2 字节返回码
pub const JBOD_HEADER_LEN: usize = 8;

/// 带数据块的报文长度
pub const JBOD_PACKET_WITH_BLOCK_LEN: usize = JBOD_HEADER_LEN + JBOD_BLOCK_SIZE;

/// 默认服务器地址
pub const JBOD_DEFAULT_SERVER: &str = "127.0.0.1";

/// 默认服务器端口
pub const JBOD_DEFAULT_PORT: u16 = 3333;

//=============================================================================
// 块缓存
//=============================================================================

/// 最小缓存条目数
pub const CACHE_MIN_ENTRIES: usize = 2;

/// 最大缓存条目数
pub const CACHE_MAX_ENTRIES: usize = 4096;

/// 新插入条目的访问时间基线
pub const CACHE_INSERT_BASELINE: u64 = 1;
