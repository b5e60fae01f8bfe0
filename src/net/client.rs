//! JBOD 客户端
//!
//! 持有一条到 JBOD 服务器的流连接，每次调用发送一个请求报文，
//! 阻塞直到收到完整的响应报文。同一时刻只有一个请求在途。

use std::io::{Read, Write};
use std::net::{Ipv4Addr, Shutdown, SocketAddrV4, TcpStream};

use super::io::{read_exact_bytes, write_exact_bytes};
use crate::consts::*;
use crate::error::{Error, ErrorKind, Result};
use crate::protocol::{Command, Packet, PacketHeader};
use crate::types::Block;
use crate::volume::JbodDevice;

/// 传输统计信息
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransportStats {
    /// 完成的请求/响应往返次数
    pub requests: u64,
    /// 已发送字节数
    pub bytes_sent: u64,
    /// 已接收字节数
    pub bytes_received: u64,
}

/// JBOD 客户端
///
/// 默认使用 `TcpStream`，测试或已有连接时可以通过
/// [`JbodClient::from_stream`] 包装任意 `Read + Write` 流。
///
/// 连接随值存在：`connect` 创建，`disconnect` 消费，
/// 因此不会出现重复关闭。
pub struct JbodClient<S = TcpStream> {
    stream: S,
    stats: TransportStats,
}

impl JbodClient<TcpStream> {
    /// 连接到 JBOD 服务器
    ///
    /// # 参数
    ///
    /// * `ip` - 点分十进制 IPv4 地址
    /// * `port` - 端口
    ///
    /// # 错误
    ///
    /// - 地址格式错误：`InvalidInput`
    /// - 连接失败：`Io`
    ///
    /// 失败时不重试。
    pub fn connect(ip: &str, port: u16) -> Result<Self> {
        let ip: Ipv4Addr = ip
            .parse()
            .map_err(|e| Error::with_cause(ErrorKind::InvalidInput, "malformed IPv4 address", e))?;
        let addr = SocketAddrV4::new(ip, port);

        let stream = TcpStream::connect(addr)
            .map_err(|e| Error::with_cause(ErrorKind::Io, "failed to connect to JBOD server", e))?;
        log::info!("[NET] connected to {}", addr);

        Ok(Self::from_stream(stream))
    }

    /// 断开连接
    pub fn disconnect(self) {
        if let Err(e) = self.stream.shutdown(Shutdown::Both) {
            log::warn!("[NET] shutdown failed: {}", e);
        }
        log::info!("[NET] disconnected after {} requests", self.stats.requests);
    }
}

impl<S: Read + Write> JbodClient<S> {
    /// 包装已建立的流
    pub fn from_stream(stream: S) -> Self {
        Self {
            stream,
            stats: TransportStats::default(),
        }
    }

    /// 获取底层流的引用
    pub fn get_ref(&self) -> &S {
        &self.stream
    }

    /// 获取底层流的可变引用
    pub fn get_mut(&mut self) -> &mut S {
        &mut self.stream
    }

    /// 取回底层流
    pub fn into_inner(self) -> S {
        self.stream
    }

    /// 获取传输统计信息
    pub fn stats(&self) -> TransportStats {
        self.stats
    }

    /// 发送一个命令并等待响应
    ///
    /// # 参数
    ///
    /// * `cmd` - 要执行的命令
    /// * `block` - 写块命令的数据来源；响应带数据块时被覆盖
    ///
    /// # 返回
    ///
    /// 成功返回响应中的返回码
    ///
    /// # 错误
    ///
    /// 任一方向传输不完整都会使整个往返失败，不做重试
    pub fn send_receive(&mut self, cmd: Command, block: Option<&mut Block>) -> Result<u16> {
        self.send_packet(&cmd, block.as_deref())?;
        let return_code = self.recv_packet(block)?;
        self.stats.requests += 1;

        log::debug!("[NET] {:?} -> ret={}", cmd.kind, return_code);
        Ok(return_code)
    }

    fn send_packet(&mut self, cmd: &Command, block: Option<&Block>) -> Result<()> {
        let packet = Packet::request(cmd, block)?;
        let bytes = packet.to_bytes();

        write_exact_bytes(&mut self.stream, &bytes)?;
        self.stats.bytes_sent += bytes.len() as u64;
        Ok(())
    }

    fn recv_packet(&mut self, block: Option<&mut Block>) -> Result<u16> {
        let mut header_buf = [0u8; JBOD_HEADER_LEN];
        read_exact_bytes(&mut self.stream, &mut header_buf)?;
        self.stats.bytes_received += JBOD_HEADER_LEN as u64;

        let header = PacketHeader::parse(&header_buf);
        if header.has_payload()? {
            match block {
                Some(block) => read_exact_bytes(&mut self.stream, block)?,
                None => {
                    // 调用方没有提供缓冲区，仍需读走数据块以保持帧同步
                    let mut discard = [0u8; JBOD_BLOCK_SIZE];
                    read_exact_bytes(&mut self.stream, &mut discard)?;
                    log::warn!("[NET] discarded unexpected response payload");
                }
            }
            self.stats.bytes_received += JBOD_BLOCK_SIZE as u64;
        }

        Ok(header.return_code)
    }
}

impl<S: Read + Write> JbodDevice for JbodClient<S> {
    fn operate(&mut self, cmd: Command, block: Option<&mut Block>) -> Result<u16> {
        self.send_receive(cmd, block)
    }
}

impl<S> core::fmt::Debug for JbodClient<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("JbodClient")
            .field("stats", &self.stats)
            .finish()
    }
}
