//! JSON Book Repository
//!
//! 图书列表持久化为两个 JSON 文件：TBR 与阅读历史。
//! 加载时容错：文件缺失、内容为空或 JSON 无效都视为空列表
//! （记录 warn，不让一次坏写入阻塞整个程序）；保存时整体序列化
//! 为带缩进的 JSON 并原子写入。

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::warn;

use crate::application::ports::{BookRepositoryPort, RepositoryError};
use crate::domain::Book;
use crate::infrastructure::fsio;

/// JSON 文件实现的 Book Repository
pub struct JsonBookRepository {
    tbr_path: PathBuf,
    history_path: PathBuf,
}

impl JsonBookRepository {
    pub fn new(tbr_path: PathBuf, history_path: PathBuf) -> Self {
        Self {
            tbr_path,
            history_path,
        }
    }

    async fn load(&self, path: &Path) -> Result<Vec<Book>, RepositoryError> {
        let raw = match fsio::read_nonempty(path).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Ok(Vec::new()),
            Err(e) => return Err(RepositoryError::Io(e.to_string())),
        };

        let books: Vec<Book> = match serde_json::from_str(&raw) {
            Ok(books) => books,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Invalid book file, treating as empty");
                return Ok(Vec::new());
            }
        };

        // 旧文件里可能混有标题为空之类的坏记录，跳过而非整体失败
        let mut loaded = Vec::with_capacity(books.len());
        for mut book in books {
            book.normalize();
            if book.is_wellformed() {
                loaded.push(book);
            } else {
                warn!(path = %path.display(), title = %book.title, "Skipping malformed book record");
            }
        }
        Ok(loaded)
    }

    async fn save(&self, path: &Path, books: &[Book]) -> Result<(), RepositoryError> {
        let json = serde_json::to_string_pretty(books)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        fsio::write_atomic(path, &json)
            .await
            .map_err(|e| RepositoryError::Io(e.to_string()))
    }
}

#[async_trait]
impl BookRepositoryPort for JsonBookRepository {
    async fn load_tbr(&self) -> Result<Vec<Book>, RepositoryError> {
        self.load(&self.tbr_path).await
    }

    async fn save_tbr(&self, books: &[Book]) -> Result<(), RepositoryError> {
        self.save(&self.tbr_path, books).await
    }

    async fn load_history(&self) -> Result<Vec<Book>, RepositoryError> {
        self.load(&self.history_path).await
    }

    async fn save_history(&self, books: &[Book]) -> Result<(), RepositoryError> {
        self.save(&self.history_path, books).await
    }
}
