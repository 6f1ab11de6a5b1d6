//! Infrastructure Layer - 基础设施层
//!
//! 提供所有端口的具体实现

pub mod fsio;
pub mod ipc;
pub mod persistence;
pub mod workers;

pub use ipc::{IpcClientConfig, SlotChannel, SlotWorker};
pub use persistence::JsonBookRepository;
