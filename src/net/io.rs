//! 定长传输原语
//!
//! 底层 `read`/`write` 一次可能只传输部分字节，这里循环直到恰好传完
//! `buf.len()` 字节或遇到不可恢复的错误。`Interrupted` 在调用内重试，
//! 其余错误与流结束（传输 0 字节）都会使整个传输失败。

use std::io::{ErrorKind as IoErrorKind, Read, Write};

use crate::error::{Error, ErrorKind, Result};

/// 从流中读取恰好 `buf.len()` 字节
pub fn read_exact_bytes<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> Result<()> {
    let mut done = 0;
    while done < buf.len() {
        match reader.read(&mut buf[done..]) {
            Ok(0) => {
                log::error!("[NET] stream closed after {}/{} bytes", done, buf.len());
                return Err(Error::new(ErrorKind::Io, "connection closed during read"));
            }
            Ok(n) => done += n,
            Err(e) if e.kind() == IoErrorKind::Interrupted => continue,
            Err(e) => {
                log::error!("[NET] read failed after {}/{} bytes: {}", done, buf.len(), e);
                return Err(e.into());
            }
        }
    }
    Ok(())
}

/// 向流中写入恰好 `buf.len()` 字节
pub fn write_exact_bytes<W: Write + ?Sized>(writer: &mut W, buf: &[u8]) -> Result<()> {
    let mut done = 0;
    while done < buf.len() {
        match writer.write(&buf[done..]) {
            Ok(0) => {
                log::error!("[NET] stream refused data after {}/{} bytes", done, buf.len());
                return Err(Error::new(ErrorKind::Io, "connection closed during write"));
            }
            Ok(n) => done += n,
            Err(e) if e.kind() == IoErrorKind::Interrupted => continue,
            Err(e) => {
                log::error!("[NET] write failed after {}/{} bytes: {}", done, buf.len(), e);
                return Err(e.into());
            }
        }
    }
    writer.flush()?;
    Ok(())
}
