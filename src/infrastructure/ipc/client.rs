//! Slot Client - 客户端侧的一次交换
//!
//! 交换流程（顺序即协议）：
//! 1. 清空响应槽——丢弃上一次交换迟到的响应，避免错配
//! 2. 整体覆盖写请求槽
//! 3. 按固定间隔轮询响应槽，直到非空或超时
//!
//! 轮询用 `tokio::time::sleep` 挂起当前任务，不阻塞运行时里
//! 其他任务。客户端必须有超时；无限等待是缺陷。

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

use super::slot::SlotChannel;

/// 通道层错误
///
/// `Timeout` 是可恢复的独立条件（worker 可能没在运行），
/// 不得与解码失败混为一谈。
#[derive(Debug, Error)]
pub enum IpcError {
    #[error("failed to encode request: {0}")]
    Encode(String),

    #[error("response present but not decodable: {0}")]
    Decode(String),

    #[error("no response within {0} ms")]
    Timeout(u64),

    #[error("slot io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 槽通道客户端
///
/// 单请求在途：一次 `exchange` 完成（或超时）之前不得再次调用。
pub struct SlotClient {
    channel: SlotChannel,
    poll_interval: Duration,
    timeout: Duration,
}

impl SlotClient {
    pub fn new(channel: SlotChannel, poll_interval: Duration, timeout: Duration) -> Self {
        Self {
            channel,
            poll_interval,
            timeout,
        }
    }

    /// 发起一次请求/响应交换
    pub async fn exchange<Req, Resp>(&self, request: &Req) -> Result<Resp, IpcError>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        let payload =
            serde_json::to_string(request).map_err(|e| IpcError::Encode(e.to_string()))?;

        // 先清响应槽再写请求：迟到的旧响应绝不能被当成本次的应答
        self.channel.clear_response().await?;
        self.channel.write_request(&payload).await?;

        let poll = async {
            loop {
                if let Some(content) = self.channel.read_response().await? {
                    // 非空但不可解析是解码失败，不是"还没就绪"
                    return serde_json::from_str::<Resp>(&content)
                        .map_err(|e| IpcError::Decode(e.to_string()));
                }
                tokio::time::sleep(self.poll_interval).await;
            }
        };

        match tokio::time::timeout(self.timeout, poll).await {
            Ok(result) => result,
            Err(_) => Err(IpcError::Timeout(self.timeout.as_millis() as u64)),
        }
    }
}
