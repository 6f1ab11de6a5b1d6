//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod helpers;
mod repositories;

pub use helpers::{
    CounterPort, HelperError, ItemBreakdown, RandomChoicePort, TextFormat, TextFormatPort,
    TextStats, TitleWord, TitleWordsPort,
};
pub use repositories::{BookRepositoryPort, RepositoryError};
