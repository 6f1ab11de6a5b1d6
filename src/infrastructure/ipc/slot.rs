//! Slot Channel - 槽文件通道
//!
//! 一个通道由一对可整体覆盖写的文本槽组成：请求槽与响应槽，
//! 空内容（或文件缺失）表示"没有待处理的值"。这是客户端与 worker
//! 进程之间唯一的共享资源——没有锁、没有序号，正确性完全依赖
//! 单请求在途（single-outstanding-request）的使用纪律：
//!
//! - 客户端在上一次交换完成（或超时）之前不得发起新请求
//! - worker 在清空已消费的请求槽之前不得写响应
//!
//! 这不是队列，绝不能用于多客户端并发请求。

use std::io;
use std::path::{Path, PathBuf};

use crate::infrastructure::fsio;

/// 槽文件通道
#[derive(Debug, Clone)]
pub struct SlotChannel {
    request_path: PathBuf,
    response_path: PathBuf,
}

impl SlotChannel {
    pub fn new(request_path: PathBuf, response_path: PathBuf) -> Self {
        Self {
            request_path,
            response_path,
        }
    }

    /// 按 helper 名称在指定目录下构造通道
    ///
    /// 文件名约定：`<helper>_request.txt` / `<helper>_response.txt`
    pub fn for_helper(dir: impl AsRef<Path>, helper: &str) -> Self {
        let dir = dir.as_ref();
        Self {
            request_path: dir.join(format!("{}_request.txt", helper)),
            response_path: dir.join(format!("{}_response.txt", helper)),
        }
    }

    pub fn request_path(&self) -> &Path {
        &self.request_path
    }

    pub fn response_path(&self) -> &Path {
        &self.response_path
    }

    /// worker 启动时初始化槽文件
    ///
    /// 请求槽缺失时创建为空（已有内容保留——可能是 worker 重启前
    /// 留下的待处理请求）；响应槽无条件清空。
    pub async fn init(&self) -> io::Result<()> {
        if fsio::read_nonempty(&self.request_path).await?.is_none() {
            fsio::write_atomic(&self.request_path, "").await?;
        }
        self.clear_response().await
    }

    pub async fn read_request(&self) -> io::Result<Option<String>> {
        fsio::read_nonempty(&self.request_path).await
    }

    pub async fn read_response(&self) -> io::Result<Option<String>> {
        fsio::read_nonempty(&self.response_path).await
    }

    /// 整体覆盖写请求槽
    pub async fn write_request(&self, payload: &str) -> io::Result<()> {
        fsio::write_atomic(&self.request_path, payload).await
    }

    /// 整体覆盖写响应槽
    pub async fn write_response(&self, payload: &str) -> io::Result<()> {
        fsio::write_atomic(&self.response_path, payload).await
    }

    pub async fn clear_request(&self) -> io::Result<()> {
        fsio::write_atomic(&self.request_path, "").await
    }

    pub async fn clear_response(&self) -> io::Result<()> {
        fsio::write_atomic(&self.response_path, "").await
    }
}
