//! Slot Worker - worker 侧的轮询循环
//!
//! 状态机只有两个状态：Idle（轮询请求槽）与 Processing（解码、
//! 计算、写响应），处理完立即回到 Idle。请求轮询按设计没有超时，
//! worker 常驻运行，直到外部信号（二进制入口用 `tokio::select!`
//! 搭配 `ctrl_c`）终止；在途请求直接放弃，没有关停握手。

use std::time::Duration;

use super::slot::SlotChannel;

/// Helper 服务契约
///
/// 每个 helper 实现一个封闭的操作集：`respond` 拿到原始请求文本，
/// 返回序列化好的响应文本。解码失败或语义错误必须转成
/// `success: false` 的失败响应——绝不 panic，绝不挂起。
pub trait SlotService: Send + Sync + 'static {
    /// helper 名称，同时用作通道文件名前缀
    fn name(&self) -> &'static str;

    /// 处理一条请求
    fn respond(&self, raw: &str) -> String;
}

/// 序列化响应，失败时退化为手写的失败信封
///
/// 这里的类型都是纯数据结构，序列化实际不会失败；兜底只是为了
/// 不在 worker 循环里引入 panic 路径。
pub fn encode_response<T: serde::Serialize>(response: &T) -> String {
    serde_json::to_string(response).unwrap_or_else(|e| {
        format!(
            r#"{{"success":false,"error":"response encoding failed: {}"}}"#,
            e
        )
    })
}

/// 槽通道 worker 循环
pub struct SlotWorker {
    channel: SlotChannel,
    poll_interval: Duration,
}

impl SlotWorker {
    pub fn new(channel: SlotChannel, poll_interval: Duration) -> Self {
        Self {
            channel,
            poll_interval,
        }
    }

    /// 启动循环（永不返回，调用方负责用信号终止）
    pub async fn run<S: SlotService>(self, service: S) {
        if let Err(e) = self.channel.init().await {
            tracing::error!(helper = service.name(), error = %e, "failed to initialize slots");
            return;
        }

        tracing::info!(
            helper = service.name(),
            request_slot = %self.channel.request_path().display(),
            response_slot = %self.channel.response_path().display(),
            "worker started, waiting for requests"
        );

        loop {
            match self.channel.read_request().await {
                Ok(Some(raw)) => {
                    // 先清请求槽再处理：若处理中途崩溃，
                    // 重启后不会重复消费同一条请求
                    if let Err(e) = self.channel.clear_request().await {
                        tracing::error!(helper = service.name(), error = %e, "failed to clear request slot");
                        tokio::time::sleep(self.poll_interval).await;
                        continue;
                    }

                    tracing::debug!(helper = service.name(), request = %raw, "request received");
                    let response = service.respond(&raw);
                    tracing::debug!(helper = service.name(), response = %response, "response ready");

                    if let Err(e) = self.channel.write_response(&response).await {
                        tracing::error!(helper = service.name(), error = %e, "failed to write response");
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::error!(helper = service.name(), error = %e, "failed to read request slot");
                }
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ipc::client::SlotClient;
    use serde::{Deserialize, Serialize};
    use tempfile::tempdir;

    #[derive(Serialize, Deserialize)]
    struct EchoRequest {
        text: String,
    }

    #[derive(Serialize, Deserialize)]
    struct EchoResponse {
        success: bool,
        result: String,
        error: String,
    }

    struct EchoService;

    impl SlotService for EchoService {
        fn name(&self) -> &'static str {
            "echo"
        }

        fn respond(&self, raw: &str) -> String {
            let response = match serde_json::from_str::<EchoRequest>(raw) {
                Ok(req) => EchoResponse {
                    success: true,
                    result: req.text,
                    error: String::new(),
                },
                Err(e) => EchoResponse {
                    success: false,
                    result: String::new(),
                    error: format!("invalid request: {}", e),
                },
            };
            encode_response(&response)
        }
    }

    fn interval() -> Duration {
        Duration::from_millis(10)
    }

    #[tokio::test]
    async fn test_round_trip_through_live_worker() {
        let dir = tempdir().unwrap();
        let channel = SlotChannel::for_helper(dir.path(), "echo");

        let worker = SlotWorker::new(channel.clone(), interval());
        let handle = tokio::spawn(worker.run(EchoService));

        let client = SlotClient::new(channel.clone(), interval(), Duration::from_secs(2));
        let response: EchoResponse = client
            .exchange(&EchoRequest {
                text: "hello".to_string(),
            })
            .await
            .unwrap();

        assert!(response.success);
        assert_eq!(response.result, "hello");

        // 请求槽已被 worker 清空
        assert_eq!(channel.read_request().await.unwrap(), None);

        handle.abort();
    }

    #[tokio::test]
    async fn test_malformed_request_yields_failure_response() {
        let dir = tempdir().unwrap();
        let channel = SlotChannel::for_helper(dir.path(), "echo");

        let worker = SlotWorker::new(channel.clone(), interval());
        let handle = tokio::spawn(worker.run(EchoService));

        // 绕过客户端直接写坏请求
        channel.clear_response().await.unwrap();
        channel.write_request("{ not json").await.unwrap();

        let client = SlotClient::new(channel.clone(), interval(), Duration::from_secs(2));
        let response: EchoResponse = {
            // 轮询等待 worker 写回
            let poll = async {
                loop {
                    if let Some(content) = channel.read_response().await.unwrap() {
                        return serde_json::from_str::<EchoResponse>(&content).unwrap();
                    }
                    tokio::time::sleep(interval()).await;
                }
            };
            tokio::time::timeout(Duration::from_secs(2), poll).await.unwrap()
        };

        assert!(!response.success);
        assert!(response.error.contains("invalid request"));

        // worker 仍然存活，可以继续服务正常请求
        let response: EchoResponse = client
            .exchange(&EchoRequest {
                text: "still alive".to_string(),
            })
            .await
            .unwrap();
        assert!(response.success);
        assert_eq!(response.result, "still alive");

        handle.abort();
    }

    #[tokio::test]
    async fn test_sequential_exchanges_do_not_mix() {
        let dir = tempdir().unwrap();
        let channel = SlotChannel::for_helper(dir.path(), "echo");

        let worker = SlotWorker::new(channel.clone(), interval());
        let handle = tokio::spawn(worker.run(EchoService));

        let client = SlotClient::new(channel, interval(), Duration::from_secs(2));
        for i in 0..3 {
            let text = format!("message {}", i);
            let response: EchoResponse = client
                .exchange(&EchoRequest { text: text.clone() })
                .await
                .unwrap();
            assert_eq!(response.result, text);
        }

        handle.abort();
    }
}
