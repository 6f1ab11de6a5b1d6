//! Domain Layer - 领域层
//!
//! 包含:
//! - Book Context: 图书实体与自然键
//! - series: 系列分组与排序
//! - suggestion: 剧透安全的推荐候选筛选（纯函数）

pub mod book;
pub mod series;
pub mod suggestion;

pub use book::{Book, BookKey};
pub use suggestion::{eligible_books, EligibleSet, SeriesWarning};
