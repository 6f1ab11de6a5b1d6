//! JSON 文件持久化

pub mod book_repo;

pub use book_repo::JsonBookRepository;
