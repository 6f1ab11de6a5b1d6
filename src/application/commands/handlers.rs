//! Command Handlers
//!
//! 所有写操作：加载集合 → 修改 → 整体保存（last-write-wins）。
//! 标题在入库前通过 text formatter worker 转为 Title Case；
//! worker 不可用时回退为原始标题，不阻断操作。

use std::sync::Arc;

use crate::application::commands::{AddBook, EditBook, MarkRead, MarkUnread, RemoveBook};
use crate::application::error::ApplicationError;
use crate::application::ports::{BookRepositoryPort, TextFormat, TextFormatPort};
use crate::domain::{Book, BookKey};

/// 按自然键在集合中定位唯一一本书
///
/// 多本命中报 `Ambiguous`（需要补充作者），零本命中报 `NotFound`。
fn find_one(books: &[Book], key: &BookKey, resource: &'static str) -> Result<usize, ApplicationError> {
    let matches: Vec<usize> = books
        .iter()
        .enumerate()
        .filter(|(_, b)| key.matches(b))
        .map(|(i, _)| i)
        .collect();

    match matches.len() {
        0 => Err(ApplicationError::not_found(resource, key.to_string())),
        1 => Ok(matches[0]),
        count => Err(ApplicationError::Ambiguous {
            key: key.to_string(),
            count,
        }),
    }
}

/// 标题格式化，worker 不可用时回退原始标题
async fn title_case_or_fallback(formatter: &dyn TextFormatPort, title: &str) -> String {
    match formatter.format(title, TextFormat::Title).await {
        Ok(formatted) => formatted,
        Err(e) => {
            tracing::warn!(error = %e, "text formatter unavailable, keeping raw title");
            title.to_string()
        }
    }
}

// ============================================================================
// AddBook
// ============================================================================

pub struct AddBookHandler {
    repo: Arc<dyn BookRepositoryPort>,
    formatter: Arc<dyn TextFormatPort>,
}

impl AddBookHandler {
    pub fn new(repo: Arc<dyn BookRepositoryPort>, formatter: Arc<dyn TextFormatPort>) -> Self {
        Self { repo, formatter }
    }

    pub async fn handle(&self, command: AddBook) -> Result<Book, ApplicationError> {
        if command.title.trim().is_empty() {
            return Err(ApplicationError::validation("title must not be empty"));
        }
        if command.author.trim().is_empty() {
            return Err(ApplicationError::validation("author must not be empty"));
        }

        let title = title_case_or_fallback(self.formatter.as_ref(), command.title.trim()).await;

        let book = Book::new(
            title,
            command.author,
            command.genre,
            command.series_name,
            command.series_number,
        );

        let mut tbr = self.repo.load_tbr().await?;
        if tbr.iter().any(|b| book.key().matches(b)) {
            return Err(ApplicationError::validation(format!(
                "{} is already on the TBR list",
                book.key()
            )));
        }

        tbr.push(book.clone());
        self.repo.save_tbr(&tbr).await?;

        tracing::info!(title = %book.title, author = %book.author, "Book added to TBR");
        Ok(book)
    }
}

// ============================================================================
// EditBook
// ============================================================================

pub struct EditBookHandler {
    repo: Arc<dyn BookRepositoryPort>,
    formatter: Arc<dyn TextFormatPort>,
}

impl EditBookHandler {
    pub fn new(repo: Arc<dyn BookRepositoryPort>, formatter: Arc<dyn TextFormatPort>) -> Self {
        Self { repo, formatter }
    }

    pub async fn handle(&self, command: EditBook) -> Result<Book, ApplicationError> {
        let mut tbr = self.repo.load_tbr().await?;
        let index = find_one(&tbr, &command.key, "Book")?;

        let book = &mut tbr[index];

        if let Some(title) = command.title {
            if title.trim().is_empty() {
                return Err(ApplicationError::validation("title must not be empty"));
            }
            book.title = title_case_or_fallback(self.formatter.as_ref(), title.trim()).await;
        }
        if let Some(author) = command.author {
            if author.trim().is_empty() {
                return Err(ApplicationError::validation("author must not be empty"));
            }
            book.author = author;
        }
        if let Some(genre) = command.genre {
            book.genre = Some(genre);
        }
        if let Some(series_name) = command.series_name {
            book.series_name = Some(series_name);
        }
        if let Some(series_number) = command.series_number {
            book.series_number = Some(series_number);
        }
        book.normalize();

        let updated = book.clone();
        self.repo.save_tbr(&tbr).await?;

        tracing::info!(title = %updated.title, "Book updated");
        Ok(updated)
    }
}

// ============================================================================
// MarkRead / MarkUnread
// ============================================================================

pub struct MarkReadHandler {
    repo: Arc<dyn BookRepositoryPort>,
}

impl MarkReadHandler {
    pub fn new(repo: Arc<dyn BookRepositoryPort>) -> Self {
        Self { repo }
    }

    pub async fn handle(&self, command: MarkRead) -> Result<Book, ApplicationError> {
        let mut tbr = self.repo.load_tbr().await?;
        let index = find_one(&tbr, &command.key, "Book")?;

        let book = tbr.remove(index);
        let mut history = self.repo.load_history().await?;
        history.push(book.clone());

        // 先保存目标集合：两次保存之间失败时书重复出现在两个集合，
        // 而不是从两个集合中丢失
        self.repo.save_history(&history).await?;
        self.repo.save_tbr(&tbr).await?;

        tracing::info!(title = %book.title, "Book marked as read");
        Ok(book)
    }
}

pub struct MarkUnreadHandler {
    repo: Arc<dyn BookRepositoryPort>,
}

impl MarkUnreadHandler {
    pub fn new(repo: Arc<dyn BookRepositoryPort>) -> Self {
        Self { repo }
    }

    pub async fn handle(&self, command: MarkUnread) -> Result<Book, ApplicationError> {
        let mut history = self.repo.load_history().await?;
        let index = find_one(&history, &command.key, "Read book")?;

        let book = history.remove(index);
        let mut tbr = self.repo.load_tbr().await?;
        tbr.push(book.clone());

        // 同 MarkRead：先保存目标集合
        self.repo.save_tbr(&tbr).await?;
        self.repo.save_history(&history).await?;

        tracing::info!(title = %book.title, "Book moved back to TBR");
        Ok(book)
    }
}

// ============================================================================
// RemoveBook
// ============================================================================

pub struct RemoveBookHandler {
    repo: Arc<dyn BookRepositoryPort>,
}

impl RemoveBookHandler {
    pub fn new(repo: Arc<dyn BookRepositoryPort>) -> Self {
        Self { repo }
    }

    pub async fn handle(&self, command: RemoveBook) -> Result<Book, ApplicationError> {
        let mut tbr = self.repo.load_tbr().await?;
        let index = find_one(&tbr, &command.key, "Book")?;

        let book = tbr.remove(index);
        self.repo.save_tbr(&tbr).await?;

        tracing::info!(title = %book.title, "Book removed from TBR");
        Ok(book)
    }
}
