//! 线路协议
//!
//! - command.rs 负责命令码的打包与解包
//! - packet.rs 负责报文头与数据块的帧编解码

mod command;
mod packet;

pub use command::{Command, CommandKind};
pub use packet::{Packet, PacketHeader};
