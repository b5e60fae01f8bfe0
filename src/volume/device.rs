//! 卷核心类型

use std::net::TcpStream;

use super::types::{VolumeConfig, VolumeStats};
use crate::cache::BlockCache;
use crate::error::{Error, ErrorKind, Result};
use crate::net::JbodClient;
use crate::protocol::Command;
use crate::types::Block;

/// JBOD 命令执行接口
///
/// 实现此 trait 以提供对阵列的命令级访问。网络客户端
/// [`JbodClient`] 是默认实现，测试中可以替换为内存阵列。
///
/// # 示例
///
/// ```rust,ignore
/// use jbod_core::{JbodDevice, Command, Block, Result};
///
/// struct MyArray {
///     // ...
/// }
///
/// impl JbodDevice for MyArray {
///     fn operate(&mut self, cmd: Command, block: Option<&mut Block>) -> Result<u16> {
///         // 执行命令，读块时填充 block
///         Ok(0)
///     }
/// }
/// ```
pub trait JbodDevice {
    /// 执行一个命令
    ///
    /// # 参数
    ///
    /// * `cmd` - 命令
    /// * `block` - 写块命令的数据来源，读块命令的数据去向
    ///
    /// # 返回
    ///
    /// 成功返回设备的返回码（0 表示操作成功）
    fn operate(&mut self, cmd: Command, block: Option<&mut Block>) -> Result<u16>;
}

impl<T: JbodDevice + ?Sized> JbodDevice for &mut T {
    fn operate(&mut self, cmd: Command, block: Option<&mut Block>) -> Result<u16> {
        (**self).operate(cmd, block)
    }
}

/// 线性卷
///
/// 把 16 块磁盘拼接成一个 1 MiB 的线性字节地址空间，
/// 把任意字节区间的读写拆分为逐块的 seek/read/write 命令序列。
///
/// # 并发使用
///
/// Volume 本身不包含内部锁，同一时刻只允许一个调用在途。
/// 多线程环境下由调用方包装：
///
/// ```rust,ignore
/// let volume = Arc::new(Mutex::new(Volume::new(client)));
/// ```
pub struct Volume<D> {
    /// 底层设备
    device: D,
    /// 是否已挂载
    mounted: bool,
    /// 块缓存（默认未启用）
    pub(super) bcache: BlockCache,
    /// 访问统计
    pub(super) stats: VolumeStats,
}

impl<D: JbodDevice> Volume<D> {
    /// 创建卷（未挂载，无缓存）
    pub fn new(device: D) -> Self {
        Self {
            device,
            mounted: false,
            bcache: BlockCache::new(),
            stats: VolumeStats::default(),
        }
    }

    /// 创建带缓存的卷
    ///
    /// # 参数
    ///
    /// * `device` - 底层设备
    /// * `cache_entries` - 缓存条目数
    pub fn new_with_cache(device: D, cache_entries: usize) -> Result<Self> {
        let mut volume = Self::new(device);
        volume.create_cache(cache_entries)?;
        Ok(volume)
    }

    /// 按配置创建卷
    ///
    /// 配置中的服务器地址不在这里使用，见 [`Volume::connect`]
    pub fn with_config(device: D, config: &VolumeConfig) -> Result<Self> {
        match config.cache_entries {
            Some(entries) => Self::new_with_cache(device, entries),
            None => Ok(Self::new(device)),
        }
    }

    /// 获取底层设备的引用
    pub fn device(&self) -> &D {
        &self.device
    }

    /// 获取底层设备的可变引用
    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /// 取回底层设备
    pub fn into_inner(self) -> D {
        self.device
    }

    /// 是否已挂载
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// 获取访问统计
    pub fn stats(&self) -> VolumeStats {
        self.stats
    }

    /// 挂载阵列
    ///
    /// 设备返回 0 时进入已挂载状态
    ///
    /// # 错误
    ///
    /// - 设备返回非零：`Device`
    /// - 传输失败：`Io` / `Protocol`
    pub fn mount(&mut self) -> Result<()> {
        self.issue(Command::mount(), None)?;
        self.mounted = true;
        log::info!("[VOLUME] mounted");
        Ok(())
    }

    /// 卸载阵列
    ///
    /// 设备返回 0 时进入未挂载状态
    pub fn unmount(&mut self) -> Result<()> {
        self.issue(Command::unmount(), None)?;
        self.mounted = false;
        log::info!("[VOLUME] unmounted");
        Ok(())
    }

    // ===== 缓存管理接口 =====

    /// 创建块缓存
    ///
    /// # 错误
    ///
    /// - 容量越界：`InvalidInput`
    /// - 缓存已存在：`InvalidState`
    pub fn create_cache(&mut self, entries: usize) -> Result<()> {
        self.bcache.create(entries)
    }

    /// 销毁块缓存
    ///
    /// # 错误
    ///
    /// 缓存不存在时返回 `InvalidState`
    pub fn destroy_cache(&mut self) -> Result<()> {
        self.bcache.destroy()
    }

    /// 检查是否启用了缓存
    pub fn has_cache(&self) -> bool {
        self.bcache.is_enabled()
    }

    /// 获取块缓存的引用
    pub fn cache(&self) -> &BlockCache {
        &self.bcache
    }

    /// 获取块缓存的可变引用
    pub fn cache_mut(&mut self) -> &mut BlockCache {
        &mut self.bcache
    }

    // 内部辅助方法

    /// 执行命令，非零返回码视为失败
    pub(super) fn issue(&mut self, cmd: Command, block: Option<&mut Block>) -> Result<()> {
        let ret = self.device.operate(cmd, block)?;
        if ret != 0 {
            log::error!("[VOLUME] {:?} failed with return code {}", cmd.kind, ret);
            return Err(Error::new(ErrorKind::Device, "JBOD operation failed"));
        }
        Ok(())
    }
}

impl Volume<JbodClient<TcpStream>> {
    /// 连接 JBOD 服务器并按配置创建卷
    ///
    /// # 示例
    ///
    /// ```rust,ignore
    /// let mut volume = Volume::connect(&VolumeConfig::default())?;
    /// volume.mount()?;
    /// volume.write(0, b"hello")?;
    /// ```
    pub fn connect(config: &VolumeConfig) -> Result<Self> {
        let client = JbodClient::connect(&config.server, config.port)?;
        Self::with_config(client, config)
    }

    /// 断开连接
    ///
    /// 启用了缓存时先输出命中率
    pub fn disconnect(self) {
        if self.bcache.is_enabled() {
            self.bcache.report_hit_rate();
        }
        self.device.disconnect();
    }
}

impl<D> core::fmt::Debug for Volume<D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Volume")
            .field("mounted", &self.mounted)
            .field("bcache", &self.bcache)
            .field("stats", &self.stats)
            .finish()
    }
}
