//! Book Context - 图书管理上下文

mod entity;

pub use entity::{Book, BookKey};
