//! 线性卷
//!
//! 把 JBOD 阵列的 (disk, block) 几何映射为线性字节地址空间。
//! volume/device.rs 提供命令执行接口 [`JbodDevice`] 和卷类型 [`Volume`]，
//! 以及挂载与缓存管理接口。
//!
//! volume/io.rs 提供字节级 read/write，把访问拆成逐块的片段，
//! 读写都先查缓存，未命中时通过设备接口读取整块并填充缓存

mod device;
mod io;
mod types;

#[cfg(test)]
pub(crate) mod mock;

pub use device::{JbodDevice, Volume};
pub use types::{VolumeConfig, VolumeStats};
