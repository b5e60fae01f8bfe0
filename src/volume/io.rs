//! 卷 I/O 操作实现
//!
//! 把卷上的 (偏移, 长度) 访问拆分成逐块的片段，每个片段限定在
//! 一个 (disk, block) 内：
//!
//! ```text
//! 片段长度 = min(剩余长度, 块大小 - 块内偏移)
//! ```
//!
//! 每个片段都先取得整块内容（缓存命中，或 seek-to-disk / seek-to-block /
//! read-block），读操作从中拷出所需字节；写操作把新字节拼入整块，再以
//! seek-to-disk / seek-to-block / write-block 写回，保留块内未覆盖的字节。

use super::{JbodDevice, Volume};
use crate::consts::*;
use crate::error::{Error, ErrorKind, Result};
use crate::protocol::Command;
use crate::types::{zeroed_block, Block, BlockAddr};

impl<D: JbodDevice> Volume<D> {
    /// 从卷读取字节
    ///
    /// # 参数
    ///
    /// * `addr` - 卷字节偏移
    /// * `buf` - 目标缓冲区，长度即读取长度（可为 0）
    ///
    /// # 返回
    ///
    /// 成功返回读取的字节数
    ///
    /// # 错误
    ///
    /// - 未挂载：`InvalidState`
    /// - 长度超过 1024 或越过卷末尾：`InvalidInput`
    /// - 设备或传输失败：`Device` / `Io` / `Protocol`，不报告已完成的片段
    ///
    /// 参数检查失败时不会发出任何命令。
    pub fn read(&mut self, addr: u32, buf: &mut [u8]) -> Result<usize> {
        self.check_access(addr, buf.len())?;
        self.stats.reads += 1;

        let mut addr = addr;
        let mut done = 0;
        let mut scratch = zeroed_block();

        while done < buf.len() {
            let loc = BlockAddr::from_volume_offset(addr);
            let len = (buf.len() - done).min(loc.remaining_in_block());
            log::debug!(
                "[VOLUME] read disk={} block={} offset={} len={}",
                loc.disk_id,
                loc.block_id,
                loc.offset,
                len
            );

            self.fetch_block(loc.disk_id, loc.block_id, &mut scratch)?;
            buf[done..done + len].copy_from_slice(&scratch[loc.offset..loc.offset + len]);

            done += len;
            addr += len as u32;
        }

        Ok(done)
    }

    /// 向卷写入字节
    ///
    /// 部分覆盖的块先读出整块再写回（读-改-写）。
    ///
    /// # 参数
    ///
    /// * `addr` - 卷字节偏移
    /// * `buf` - 源数据，长度即写入长度（可为 0）
    ///
    /// # 返回
    ///
    /// 成功返回写入的字节数
    ///
    /// # 错误
    ///
    /// 同 [`read`](Self::read)
    pub fn write(&mut self, addr: u32, buf: &[u8]) -> Result<usize> {
        self.check_access(addr, buf.len())?;
        self.stats.writes += 1;

        let mut addr = addr;
        let mut done = 0;
        let mut scratch = zeroed_block();

        while done < buf.len() {
            let loc = BlockAddr::from_volume_offset(addr);
            let len = (buf.len() - done).min(loc.remaining_in_block());
            log::debug!(
                "[VOLUME] write disk={} block={} offset={} len={}",
                loc.disk_id,
                loc.block_id,
                loc.offset,
                len
            );

            self.fetch_block(loc.disk_id, loc.block_id, &mut scratch)?;
            scratch[loc.offset..loc.offset + len].copy_from_slice(&buf[done..done + len]);
            self.store_block(loc.disk_id, loc.block_id, &mut scratch)?;

            done += len;
            addr += len as u32;
        }

        Ok(done)
    }

    /// 访问前的参数检查，失败时没有任何副作用
    fn check_access(&self, addr: u32, len: usize) -> Result<()> {
        if !self.is_mounted() {
            log::warn!("[VOLUME] access rejected: not mounted");
            return Err(Error::new(ErrorKind::InvalidState, "volume not mounted"));
        }
        if len > JBOD_MAX_IO_SIZE {
            log::warn!("[VOLUME] access rejected: len={} exceeds {}", len, JBOD_MAX_IO_SIZE);
            return Err(Error::new(ErrorKind::InvalidInput, "transfer too large"));
        }
        let end = (addr as usize).checked_add(len);
        if end.map_or(true, |end| end > JBOD_VOLUME_SIZE) {
            log::warn!("[VOLUME] access rejected: addr={:#x} len={} out of range", addr, len);
            return Err(Error::new(ErrorKind::InvalidInput, "access beyond end of volume"));
        }
        Ok(())
    }

    /// 定位到 (disk, block)
    fn seek(&mut self, disk_id: u8, block_id: u8) -> Result<()> {
        self.issue(Command::seek_to_disk(disk_id), None)?;
        self.issue(Command::seek_to_block(block_id), None)
    }

    /// 取得整块内容
    ///
    /// 启用了缓存时优先从缓存读取；未命中则从设备读取并填充缓存
    fn fetch_block(&mut self, disk_id: u8, block_id: u8, out: &mut Block) -> Result<()> {
        if self.bcache.is_enabled() && self.bcache.lookup(disk_id, block_id, out).is_ok() {
            return Ok(());
        }

        self.seek(disk_id, block_id)?;
        self.issue(Command::read_block(), Some(&mut *out))?;
        self.stats.physical_reads += 1;

        if self.bcache.is_enabled() {
            if let Err(e) = self.bcache.insert(disk_id, block_id, out) {
                log::warn!("[VOLUME] cache insert failed: {}", e);
            }
        }
        Ok(())
    }

    /// 写回整块内容，成功后同步缓存中的副本
    fn store_block(&mut self, disk_id: u8, block_id: u8, data: &mut Block) -> Result<()> {
        self.seek(disk_id, block_id)?;
        self.issue(Command::write_block(), Some(&mut *data))?;
        self.stats.physical_writes += 1;

        self.bcache.update(disk_id, block_id, data);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::CommandKind;
    use crate::volume::mock::MockJbod;

    fn mounted_volume() -> Volume<MockJbod> {
        let mut volume = Volume::new(MockJbod::new());
        volume.mount().unwrap();
        volume.device_mut().clear_log();
        volume
    }

    fn pattern(len: usize, seed: u8) -> Vec<u8> {
        (0..len).map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed)).collect()
    }

    #[test]
    fn test_read_single_block() {
        let mut volume = mounted_volume();
        let data = pattern(256, 1);
        volume.device_mut().fill(512, &data);

        let mut buf = [0u8; 100];
        assert_eq!(volume.read(512 + 20, &mut buf).unwrap(), 100);
        assert_eq!(&buf[..], &data[20..120]);

        let kinds: Vec<_> = volume.device().log.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                CommandKind::SeekToDisk,
                CommandKind::SeekToBlock,
                CommandKind::ReadBlock
            ]
        );
        assert_eq!(volume.device().log[1].block_id, 2);
    }

    #[test]
    fn test_write_splits_at_block_boundary() {
        let mut volume = mounted_volume();
        let before = pattern(1024, 7);
        volume.device_mut().fill(0, &before);
        volume.device_mut().clear_log();

        // 从块边界前 50 字节开始写 300 字节，跨越块 0 和块 1
        let data = vec![0xEEu8; 300];
        assert_eq!(volume.write(206, &data).unwrap(), 300);

        let device = volume.device();
        assert_eq!(device.count(CommandKind::ReadBlock), 2);
        assert_eq!(device.count(CommandKind::WriteBlock), 2);
        assert_eq!(device.count(CommandKind::SeekToDisk), 4);
        assert_eq!(device.count(CommandKind::SeekToBlock), 4);

        let mut back = vec![0u8; 300];
        volume.read(206, &mut back).unwrap();
        assert_eq!(back, data);

        // 两个块中未覆盖的字节保持不变
        let device = volume.device();
        assert_eq!(device.peek(0, 206), before[..206].to_vec());
        assert_eq!(device.peek(506, 6), before[506..512].to_vec());
        assert_eq!(device.peek(512, 512), before[512..].to_vec());
    }

    #[test]
    fn test_read_across_disk_boundary() {
        let mut volume = mounted_volume();
        let data = pattern(64, 3);
        volume.device_mut().fill(JBOD_DISK_SIZE - 32, &data);

        let mut buf = [0u8; 64];
        volume.read((JBOD_DISK_SIZE - 32) as u32, &mut buf).unwrap();
        assert_eq!(&buf[..], &data[..]);

        let disks: Vec<_> = volume
            .device()
            .log
            .iter()
            .filter(|c| c.kind == CommandKind::SeekToDisk)
            .map(|c| c.disk_id)
            .collect();
        assert_eq!(disks, vec![0, 1]);
    }

    #[test]
    fn test_max_transfer_spans_five_blocks() {
        let mut volume = mounted_volume();
        let data = pattern(1024, 9);

        volume.write(100, &data).unwrap();
        assert_eq!(volume.device().count(CommandKind::WriteBlock), 5);

        let mut back = vec![0u8; 1024];
        volume.read(100, &mut back).unwrap();
        assert_eq!(back, data);
    }

    #[test]
    fn test_write_at_end_of_volume() {
        let mut volume = mounted_volume();
        let end = JBOD_VOLUME_SIZE as u32;

        volume.write(end - 10, &[1u8; 10]).unwrap();
        assert_eq!(volume.device().peek(JBOD_VOLUME_SIZE - 10, 10), vec![1u8; 10]);

        let err = volume.write(end - 10, &[1u8; 11]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_unmounted_rejected_without_commands() {
        let mut volume = Volume::new(MockJbod::new());
        let mut buf = [0u8; 16];

        assert_eq!(volume.read(0, &mut buf).unwrap_err().kind(), ErrorKind::InvalidState);
        assert_eq!(volume.write(0, &buf).unwrap_err().kind(), ErrorKind::InvalidState);
        assert!(volume.device().log.is_empty());

        volume.mount().unwrap();
        volume.unmount().unwrap();
        volume.device_mut().clear_log();

        assert_eq!(volume.read(0, &mut buf).unwrap_err().kind(), ErrorKind::InvalidState);
        assert_eq!(volume.write(0, &buf).unwrap_err().kind(), ErrorKind::InvalidState);
        assert!(volume.device().log.is_empty());
    }

    #[test]
    fn test_oversized_and_out_of_range_rejected() {
        let mut volume = mounted_volume();

        let mut big = vec![0u8; 1025];
        assert_eq!(volume.read(0, &mut big).unwrap_err().kind(), ErrorKind::InvalidInput);
        assert_eq!(volume.write(0, &big).unwrap_err().kind(), ErrorKind::InvalidInput);

        let mut buf = [0u8; 8];
        let addr = (JBOD_VOLUME_SIZE - 4) as u32;
        assert_eq!(volume.read(addr, &mut buf).unwrap_err().kind(), ErrorKind::InvalidInput);
        assert_eq!(volume.write(u32::MAX, &buf).unwrap_err().kind(), ErrorKind::InvalidInput);

        assert!(volume.device().log.is_empty());
        assert_eq!(volume.stats(), crate::volume::VolumeStats::default());
    }

    #[test]
    fn test_zero_length_access() {
        let mut volume = mounted_volume();
        assert_eq!(volume.read(0, &mut []).unwrap(), 0);
        assert_eq!(volume.write(JBOD_VOLUME_SIZE as u32, &[]).unwrap(), 0);
        assert!(volume.device().log.is_empty());
    }

    #[test]
    fn test_device_failure_aborts() {
        let mut volume = mounted_volume();
        volume.device_mut().fail_on = Some(CommandKind::WriteBlock);

        let err = volume.write(0, &[1u8; 600]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Device);
        // 第一个片段失败后不再继续
        assert_eq!(volume.device().count(CommandKind::WriteBlock), 1);
    }

    #[test]
    fn test_cached_read_skips_device() {
        let mut volume = mounted_volume();
        volume.create_cache(4).unwrap();
        volume.device_mut().fill(0, &pattern(256, 5));

        let mut first = [0u8; 32];
        volume.read(0, &mut first).unwrap();
        assert_eq!(volume.device().count(CommandKind::ReadBlock), 1);

        let mut second = [0u8; 32];
        volume.read(0, &mut second).unwrap();
        assert_eq!(first, second);
        // 第二次读命中缓存，没有新的命令
        assert_eq!(volume.device().log.len(), 3);
        assert_eq!(volume.cache().stats().hits, 1);
        assert_eq!(volume.stats().physical_reads, 1);
    }

    #[test]
    fn test_cached_write_updates_cache() {
        let mut volume = mounted_volume();
        volume.create_cache(4).unwrap();

        volume.write(10, b"hello").unwrap();
        assert!(volume.cache().contains(0, 0));

        // 写后读命中缓存并看到新数据
        volume.device_mut().clear_log();
        let mut buf = [0u8; 5];
        volume.read(10, &mut buf).unwrap();
        assert_eq!(&buf, b"hello");
        assert_eq!(volume.device().count(CommandKind::ReadBlock), 0);

        // 命中时写操作仍然下发到设备
        volume.write(12, b"LL").unwrap();
        assert_eq!(volume.device().count(CommandKind::WriteBlock), 1);
        assert_eq!(volume.device().peek(10, 5), b"heLLo".to_vec());
    }

    #[test]
    fn test_stats_counters() {
        let mut volume = mounted_volume();
        volume.write(0, &[1u8; 300]).unwrap();
        let mut buf = [0u8; 10];
        volume.read(0, &mut buf).unwrap();

        let stats = volume.stats();
        assert_eq!(stats.writes, 1);
        assert_eq!(stats.reads, 1);
        assert_eq!(stats.physical_writes, 2);
        assert_eq!(stats.physical_reads, 3);
    }
}
