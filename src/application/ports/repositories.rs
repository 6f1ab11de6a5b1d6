//! Repository Ports - 出站端口
//!
//! 定义图书列表持久化的抽象接口，具体实现在 infrastructure 层（JSON 文件）。
//!
//! 持久化契约刻意简单：加载整个集合、整体保存，last-write-wins，
//! 不提供事务或并发保证。

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::Book;

/// Repository 错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Book Repository Port
///
/// 两个集合分别持久化：TBR（未读）与阅读历史（已读）。
/// 标记已读/未读即把书在两个集合之间移动。
#[async_trait]
pub trait BookRepositoryPort: Send + Sync {
    /// 加载 TBR 列表（文件缺失或内容无效时返回空列表）
    async fn load_tbr(&self) -> Result<Vec<Book>, RepositoryError>;

    /// 整体保存 TBR 列表
    async fn save_tbr(&self, books: &[Book]) -> Result<(), RepositoryError>;

    /// 加载阅读历史
    async fn load_history(&self) -> Result<Vec<Book>, RepositoryError>;

    /// 整体保存阅读历史
    async fn save_history(&self, books: &[Book]) -> Result<(), RepositoryError>;
}
