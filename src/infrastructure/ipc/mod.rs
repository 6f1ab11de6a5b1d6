//! IPC - 槽文件请求/响应协议
//!
//! 客户端与各 helper worker 进程之间唯一的通信手段：
//! 每个 helper 一对可覆盖写的文本槽（请求/响应），JSON 编码，
//! 轮询驱动，单请求在途。
//!
//! - slot: 槽文件通道（原子覆盖写）
//! - client: 客户端交换（清响应 → 写请求 → 限时轮询）
//! - worker: worker 轮询循环（常驻，先清请求再处理）
//! - messages: 各 helper 的 wire 结构
//! - clients: 应用层端口的通道实现

pub mod client;
pub mod clients;
pub mod messages;
pub mod slot;
pub mod worker;

pub use client::{IpcError, SlotClient};
pub use clients::{
    IpcClientConfig, IpcCounterClient, IpcRandomClient, IpcTextFormatClient, IpcTitleWordsClient,
};
pub use slot::SlotChannel;
pub use worker::{encode_response, SlotService, SlotWorker};
