//! Commands - 写操作
//!
//! 每条命令对应一次对持久化集合的修改，处理器见 handlers 模块。

pub mod handlers;

use crate::domain::BookKey;

/// 添加一本书到 TBR
#[derive(Debug, Clone)]
pub struct AddBook {
    pub title: String,
    pub author: String,
    pub genre: Option<String>,
    pub series_name: Option<String>,
    pub series_number: Option<u32>,
}

/// 编辑已有的书（None 字段保持不变，空字符串清除可选字段）
#[derive(Debug, Clone)]
pub struct EditBook {
    pub key: BookKey,
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub series_name: Option<String>,
    pub series_number: Option<u32>,
}

/// 标记为已读（从 TBR 移入阅读历史）
#[derive(Debug, Clone)]
pub struct MarkRead {
    pub key: BookKey,
}

/// 标记为未读（从阅读历史移回 TBR）
#[derive(Debug, Clone)]
pub struct MarkUnread {
    pub key: BookKey,
}

/// 从 TBR 中删除
#[derive(Debug, Clone)]
pub struct RemoveBook {
    pub key: BookKey,
}

pub use handlers::{
    AddBookHandler, EditBookHandler, MarkReadHandler, MarkUnreadHandler, RemoveBookHandler,
};
