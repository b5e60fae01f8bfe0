//! 内存 JBOD 阵列（仅测试使用）
//!
//! 按真实阵列的语义执行命令，并记录收到的每一条命令，
//! 便于断言卷层发出的命令序列。

use super::device::JbodDevice;
use crate::consts::*;
use crate::error::Result;
use crate::protocol::{Command, CommandKind};
use crate::types::{zeroed_block, Block};

pub(crate) struct MockJbod {
    blocks: Vec<Block>,
    disk: usize,
    block: usize,
    mounted: bool,
    /// 收到的全部命令
    pub log: Vec<Command>,
    /// 对该类命令返回非零返回码
    pub fail_on: Option<CommandKind>,
}

impl MockJbod {
    pub fn new() -> Self {
        Self {
            blocks: vec![zeroed_block(); JBOD_NUM_DISKS * JBOD_NUM_BLOCKS_PER_DISK],
            disk: 0,
            block: 0,
            mounted: false,
            log: Vec::new(),
            fail_on: None,
        }
    }

    /// 以卷字节偏移填充阵列内容，绕过命令接口
    pub fn fill(&mut self, addr: usize, data: &[u8]) {
        for (i, byte) in data.iter().enumerate() {
            let pos = addr + i;
            self.blocks[pos / JBOD_BLOCK_SIZE][pos % JBOD_BLOCK_SIZE] = *byte;
        }
    }

    /// 以卷字节偏移读取阵列内容，绕过命令接口
    pub fn peek(&self, addr: usize, len: usize) -> Vec<u8> {
        (addr..addr + len)
            .map(|pos| self.blocks[pos / JBOD_BLOCK_SIZE][pos % JBOD_BLOCK_SIZE])
            .collect()
    }

    /// 某类命令的收到次数
    pub fn count(&self, kind: CommandKind) -> usize {
        self.log.iter().filter(|c| c.kind == kind).count()
    }

    pub fn clear_log(&mut self) {
        self.log.clear();
    }

    fn current(&self) -> usize {
        self.disk * JBOD_NUM_BLOCKS_PER_DISK + self.block
    }
}

impl JbodDevice for MockJbod {
    fn operate(&mut self, cmd: Command, block: Option<&mut Block>) -> Result<u16> {
        self.log.push(cmd);
        if self.fail_on == Some(cmd.kind) {
            return Ok(1);
        }

        match cmd.kind {
            CommandKind::Mount => self.mounted = true,
            CommandKind::Unmount => self.mounted = false,
            CommandKind::SeekToDisk => {
                self.disk = cmd.disk_id as usize;
                self.block = 0;
            }
            CommandKind::SeekToBlock => self.block = cmd.block_id as usize,
            CommandKind::ReadBlock | CommandKind::WriteBlock if !self.mounted => return Ok(1),
            CommandKind::ReadBlock => {
                if let Some(out) = block {
                    *out = self.blocks[self.current()];
                }
            }
            CommandKind::WriteBlock => {
                if let Some(data) = block {
                    let current = self.current();
                    self.blocks[current] = *data;
                }
            }
        }
        Ok(0)
    }
}
