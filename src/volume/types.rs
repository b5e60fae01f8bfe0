//! 卷配置与统计类型

use crate::consts::*;

/// 卷配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeConfig {
    /// JBOD 服务器地址（点分十进制 IPv4）
    pub server: String,
    /// JBOD 服务器端口
    pub port: u16,
    /// 块缓存条目数，`None` 表示不启用缓存
    pub cache_entries: Option<usize>,
}

impl Default for VolumeConfig {
    fn default() -> Self {
        Self {
            server: JBOD_DEFAULT_SERVER.to_string(),
            port: JBOD_DEFAULT_PORT,
            cache_entries: None,
        }
    }
}

/// 卷访问统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VolumeStats {
    /// 逻辑读取次数（卷级 read 调用）
    pub reads: u64,
    /// 逻辑写入次数（卷级 write 调用）
    pub writes: u64,
    /// 物理读块次数（实际发往设备的 READ_BLOCK）
    pub physical_reads: u64,
    /// 物理写块次数（实际发往设备的 WRITE_BLOCK）
    pub physical_writes: u64,
}
