//! Queries - 读操作
//!
//! 推荐、列表与统计查询，处理器见 handlers 模块。

pub mod handlers;

pub use handlers::{
    ListHistoryHandler, ListTbrHandler, StatisticsHandler, StatisticsView, SuggestHandler,
    SuggestionOutcome, TbrView,
};

/// 统计查询参数
#[derive(Debug, Clone)]
pub struct Statistics {
    /// 标题常用词返回条数
    pub word_limit: usize,
}

impl Default for Statistics {
    fn default() -> Self {
        Self { word_limit: 10 }
    }
}
