//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（Repository 与四个 helper 服务端口）
//! - commands: 写操作及处理器
//! - queries: 读操作及处理器（推荐、列表、统计）
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

pub use commands::{
    AddBook, AddBookHandler, EditBook, EditBookHandler, MarkRead, MarkReadHandler, MarkUnread,
    MarkUnreadHandler, RemoveBook, RemoveBookHandler,
};
pub use error::ApplicationError;
pub use ports::{
    BookRepositoryPort, CounterPort, HelperError, ItemBreakdown, RandomChoicePort,
    RepositoryError, TextFormat, TextFormatPort, TextStats, TitleWord, TitleWordsPort,
};
pub use queries::{
    ListHistoryHandler, ListTbrHandler, Statistics, StatisticsHandler, StatisticsView,
    SuggestHandler, SuggestionOutcome, TbrView,
};
