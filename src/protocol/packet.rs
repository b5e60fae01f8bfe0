//! 报文编解码
//!
//! 报文布局（所有多字节字段均为网络字节序）：
//!
//! ```text
//! offset 0: u16 length       (8 或 8 + 256)
//! offset 2: u32 command      (见 command.rs)
//! offset 6: u16 return code  (请求为 0)
//! offset 8: [u8; 256] block  (仅当 length == 264 时存在)
//! ```

use byteorder::{ByteOrder, NetworkEndian};

use super::command::Command;
use crate::consts::*;
use crate::error::{Error, ErrorKind, Result};
use crate::types::Block;

/// 报文头
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacketHeader {
    /// 报文总长度（含报文头）
    pub length: u16,
    /// 打包后的命令码
    pub code: u32,
    /// 返回码
    pub return_code: u16,
}

impl PacketHeader {
    /// 从 8 字节缓冲区解析报文头
    pub fn parse(buf: &[u8; JBOD_HEADER_LEN]) -> Self {
        Self {
            length: NetworkEndian::read_u16(&buf[0..2]),
            code: NetworkEndian::read_u32(&buf[2..6]),
            return_code: NetworkEndian::read_u16(&buf[6..8]),
        }
    }

    /// 编码为 8 字节缓冲区
    pub fn to_bytes(&self) -> [u8; JBOD_HEADER_LEN] {
        let mut buf = [0u8; JBOD_HEADER_LEN];
        NetworkEndian::write_u16(&mut buf[0..2], self.length);
        NetworkEndian::write_u32(&mut buf[2..6], self.code);
        NetworkEndian::write_u16(&mut buf[6..8], self.return_code);
        buf
    }

    /// 根据长度字段判断报文头后是否跟随数据块
    ///
    /// # 错误
    ///
    /// 长度既不是 8 也不是 264 时返回 `Protocol` 错误
    pub fn has_payload(&self) -> Result<bool> {
        match self.length as usize {
            JBOD_HEADER_LEN => Ok(false),
            JBOD_PACKET_WITH_BLOCK_LEN => Ok(true),
            _ => Err(Error::new(ErrorKind::Protocol, "invalid packet length")),
        }
    }
}

/// 完整报文
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    /// 报文头
    pub header: PacketHeader,
    /// 可选数据块
    pub payload: Option<Block>,
}

impl Packet {
    /// 由原始字段构造报文，长度字段根据是否有数据块自动计算
    pub fn new(code: u32, return_code: u16, payload: Option<Block>) -> Self {
        let length = if payload.is_some() {
            JBOD_PACKET_WITH_BLOCK_LEN
        } else {
            JBOD_HEADER_LEN
        };
        Self {
            header: PacketHeader {
                length: length as u16,
                code,
                return_code,
            },
            payload,
        }
    }

    /// 构造请求报文
    ///
    /// 只有写块命令携带数据块，其余命令忽略 `block`
    ///
    /// # 错误
    ///
    /// 写块命令未提供数据块时返回 `InvalidInput`
    pub fn request(cmd: &Command, block: Option<&Block>) -> Result<Self> {
        let payload = if cmd.kind.has_request_payload() {
            let block = block.ok_or(Error::new(
                ErrorKind::InvalidInput,
                "write command requires a block payload",
            ))?;
            Some(*block)
        } else {
            None
        };
        Ok(Self::new(cmd.pack(), 0, payload))
    }

    /// 编码为字节序列
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.header.length as usize);
        buf.extend_from_slice(&self.header.to_bytes());
        if let Some(block) = &self.payload {
            buf.extend_from_slice(block);
        }
        buf
    }

    /// 从完整的字节序列解析报文
    ///
    /// # 错误
    ///
    /// - 长度字段非法：`Protocol`
    /// - 字节数与长度字段不符：`Protocol`
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let header_bytes: &[u8; JBOD_HEADER_LEN] = bytes
            .get(..JBOD_HEADER_LEN)
            .and_then(|slice| slice.try_into().ok())
            .ok_or(Error::new(ErrorKind::Protocol, "short packet header"))?;
        let header = PacketHeader::parse(header_bytes);

        if bytes.len() != header.length as usize {
            return Err(Error::new(
                ErrorKind::Protocol,
                "packet length does not match header",
            ));
        }

        let payload = if header.has_payload()? {
            let mut block = [0u8; JBOD_BLOCK_SIZE];
            block.copy_from_slice(&bytes[JBOD_HEADER_LEN..]);
            Some(block)
        } else {
            None
        };

        Ok(Self { header, payload })
    }

    /// 解包命令码
    pub fn command(&self) -> Result<Command> {
        Command::unpack(self.header.code)
    }
}
