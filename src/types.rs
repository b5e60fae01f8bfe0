//! 基础数据类型
//!
//! 块缓冲区与卷地址分解。

use crate::consts::*;

/// 单个块的数据缓冲区
pub type Block = [u8; JBOD_BLOCK_SIZE];

/// 创建全零块
#[inline]
pub const fn zeroed_block() -> Block {
    [0u8; JBOD_BLOCK_SIZE]
}

/// 卷地址在阵列几何上的分解结果
///
/// 由卷的字节偏移推导，不保存，每次访问重新计算。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockAddr {
    /// 磁盘编号
    pub disk_id: u8,
    /// 磁盘内块编号
    pub block_id: u8,
    /// 块内偏移
    pub offset: usize,
}

impl BlockAddr {
    /// 从卷字节偏移计算磁盘、块和块内偏移
    ///
    /// 调用方需保证 `addr < JBOD_VOLUME_SIZE`
    pub fn from_volume_offset(addr: u32) -> Self {
        let addr = addr as usize;
        Self {
            disk_id: (addr / JBOD_DISK_SIZE) as u8,
            block_id: ((addr % JBOD_DISK_SIZE) / JBOD_BLOCK_SIZE) as u8,
            offset: addr % JBOD_BLOCK_SIZE,
        }
    }

    /// 当前块剩余可访问的字节数
    pub fn remaining_in_block(&self) -> usize {
        JBOD_BLOCK_SIZE - self.offset
    }
}
