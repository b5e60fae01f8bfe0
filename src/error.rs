//! 错误类型定义
//!
//! 提供 JBOD 卷操作的错误类型。所有可失败的操作都返回 [`Result`]，
//! 调用方通过 [`Error::kind`] 区分参数错误、状态错误与传输错误。

use core::fmt;

/// JBOD 操作错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    message: &'static str,
}

/// 错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// I/O 错误（连接断开、传输不完整）
    Io,
    /// 无效参数（地址越界、传输过长、缓存容量非法）
    InvalidInput,
    /// 无效状态（未挂载、缓存已存在或不存在）
    InvalidState,
    /// 报文格式错误
    Protocol,
    /// 设备返回了非零结果码
    Device,
    /// 未找到（缓存未命中）
    NotFound,
    /// 已存在（重复插入缓存）
    AlreadyExists,
}

impl Error {
    /// 创建新错误
    pub const fn new(kind: ErrorKind, message: &'static str) -> Self {
        Self { kind, message }
    }

    /// 创建带原因的错误
    ///
    /// 原因只写入日志，不保存在错误值中
    pub fn with_cause(kind: ErrorKind, message: &'static str, cause: impl fmt::Debug) -> Self {
        log::debug!("{:?}: {} ({:?})", kind, message, cause);
        Self { kind, message }
    }

    /// 获取错误类型
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// 获取错误消息
    pub const fn message(&self) -> &'static str {
        self.message
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::with_cause(ErrorKind::Io, "stream transfer failed", err)
    }
}

/// Result 类型别名
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_accessors() {
        let err = Error::new(ErrorKind::InvalidState, "volume not mounted");
        assert_eq!(err.kind(), ErrorKind::InvalidState);
        assert_eq!(err.message(), "volume not mounted");
        assert_eq!(err.to_string(), "InvalidState: volume not mounted");
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof");
        let err: Error = io.into();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
