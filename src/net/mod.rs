//! 网络传输
//!
//! 提供到 JBOD 服务器的阻塞式客户端。每次调用发送一个请求报文并
//! 等待完整的响应报文，报文格式见 [`crate::protocol`]。

mod client;
mod io;

pub use client::{JbodClient, TransportStats};
pub use io::{read_exact_bytes, write_exact_bytes};
