//! JBOD 命令码
//!
//! 命令码是一个 32 位整数，从高位到低位依次打包四个字段：
//!
//! ```text
//!  31        26 25    22 21                8 7          0
//! +------------+--------+-------------------+------------+
//! |  kind (6)  | disk(4)|   reserved (14)   |  block (8) |
//! +------------+--------+-------------------+------------+
//! ```
//!
//! 库内部只使用 [`Command`] 结构体，原始整数只在传输边界通过
//! [`Command::pack`] / [`Command::unpack`] 出现。

use crate::error::{Error, ErrorKind, Result};

const KIND_SHIFT: u32 = 26;
const DISK_SHIFT: u32 = 22;
const RESERVED_SHIFT: u32 = 8;

const KIND_MASK: u32 = 0x3f;
const DISK_MASK: u32 = 0x0f;
const RESERVED_MASK: u32 = 0x3fff;
const BLOCK_MASK: u32 = 0xff;

/// 操作类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CommandKind {
    /// 挂载阵列
    Mount = 0,
    /// 卸载阵列
    Unmount = 1,
    /// 定位到磁盘
    SeekToDisk = 2,
    /// 定位到块
    SeekToBlock = 3,
    /// 读取当前块
    ReadBlock = 4,
    /// 写入当前块
    WriteBlock = 5,
}

impl CommandKind {
    /// 所有操作类型
    pub const ALL: [CommandKind; 6] = [
        CommandKind::Mount,
        CommandKind::Unmount,
        CommandKind::SeekToDisk,
        CommandKind::SeekToBlock,
        CommandKind::ReadBlock,
        CommandKind::WriteBlock,
    ];

    /// 请求报文是否携带数据块
    pub fn has_request_payload(self) -> bool {
        self == CommandKind::WriteBlock
    }

    /// 响应报文是否携带数据块
    pub fn has_response_payload(self) -> bool {
        self == CommandKind::ReadBlock
    }
}

impl TryFrom<u8> for CommandKind {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        CommandKind::ALL
            .into_iter()
            .find(|kind| *kind as u8 == value)
            .ok_or(Error::new(ErrorKind::Protocol, "unknown command kind"))
    }
}

/// JBOD 命令
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Command {
    /// 操作类型
    pub kind: CommandKind,
    /// 目标磁盘（0–15）
    pub disk_id: u8,
    /// 保留字段，始终为 0
    pub reserved: u16,
    /// 目标块（0–255）
    pub block_id: u8,
}

impl Command {
    /// 创建命令
    pub const fn new(kind: CommandKind, disk_id: u8, reserved: u16, block_id: u8) -> Self {
        Self {
            kind,
            disk_id,
            reserved,
            block_id,
        }
    }

    /// 挂载命令
    pub const fn mount() -> Self {
        Self::new(CommandKind::Mount, 0, 0, 0)
    }

    /// 卸载命令
    pub const fn unmount() -> Self {
        Self::new(CommandKind::Unmount, 0, 0, 0)
    }

    /// 定位磁盘命令
    pub const fn seek_to_disk(disk_id: u8) -> Self {
        Self::new(CommandKind::SeekToDisk, disk_id, 0, 0)
    }

    /// 定位块命令
    pub const fn seek_to_block(block_id: u8) -> Self {
        Self::new(CommandKind::SeekToBlock, 0, 0, block_id)
    }

    /// 读块命令
    pub const fn read_block() -> Self {
        Self::new(CommandKind::ReadBlock, 0, 0, 0)
    }

    /// 写块命令
    pub const fn write_block() -> Self {
        Self::new(CommandKind::WriteBlock, 0, 0, 0)
    }

    /// 打包为 32 位命令码
    ///
    /// 超出字段宽度的高位会被截掉，调用方负责保证取值范围
    pub fn pack(&self) -> u32 {
        ((self.kind as u32 & KIND_MASK) << KIND_SHIFT)
            | ((self.disk_id as u32 & DISK_MASK) << DISK_SHIFT)
            | ((self.reserved as u32 & RESERVED_MASK) << RESERVED_SHIFT)
            | (self.block_id as u32 & BLOCK_MASK)
    }

    /// 从 32 位命令码解包
    ///
    /// # 错误
    ///
    /// 操作类型字段不是已知值时返回 `Protocol` 错误
    pub fn unpack(code: u32) -> Result<Self> {
        let kind = CommandKind::try_from(((code >> KIND_SHIFT) & KIND_MASK) as u8)?;
        Ok(Self {
            kind,
            disk_id: ((code >> DISK_SHIFT) & DISK_MASK) as u8,
            reserved: ((code >> RESERVED_SHIFT) & RESERVED_MASK) as u16,
            block_id: (code & BLOCK_MASK) as u8,
        })
    }
}

impl From<Command> for u32 {
    fn from(cmd: Command) -> u32 {
        cmd.pack()
    }
}
