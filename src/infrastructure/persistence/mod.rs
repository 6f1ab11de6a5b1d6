//! Persistence - 持久化实现

pub mod json;

pub use json::JsonBookRepository;
