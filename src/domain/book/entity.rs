//! Book Context - 图书实体

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// TBR 列表中的一本书
///
/// 没有显式 ID：同一本书在 TBR 与阅读历史之间移动时，
/// 以 (title, author) 自然键（忽略大小写）区分。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub author: String,

    #[serde(default)]
    pub genre: Option<String>,

    /// 所属系列名（None 表示独立作品）
    #[serde(default)]
    pub series_name: Option<String>,

    /// 系列内阅读顺序（从 1 开始；None 表示系列内未编号）
    #[serde(default)]
    pub series_number: Option<u32>,

    /// 加入 TBR 的时间（旧版数据文件没有此字段，反序列化时补当前时间）
    #[serde(default = "Utc::now")]
    pub added_at: DateTime<Utc>,
}

impl Book {
    /// 创建一本新书，字段经过归一化
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        genre: Option<String>,
        series_name: Option<String>,
        series_number: Option<u32>,
    ) -> Self {
        let mut book = Self {
            title: title.into(),
            author: author.into(),
            genre,
            series_name,
            series_number,
            added_at: Utc::now(),
        };
        book.normalize();
        book
    }

    /// 字段归一化
    ///
    /// 规则（与持久化文件的宽容加载策略一致）：
    /// - 标题、作者、类型、系列名去首尾空白
    /// - 空白的可选字段视为缺失（None）
    /// - 系列序号 0 视为未编号
    /// - 没有系列名时序号无意义，一并清除
    pub fn normalize(&mut self) {
        self.title = self.title.trim().to_string();
        self.author = self.author.trim().to_string();

        self.genre = take_nonblank(self.genre.take());
        self.series_name = take_nonblank(self.series_name.take());

        if self.series_number == Some(0) {
            self.series_number = None;
        }
        if self.series_name.is_none() {
            self.series_number = None;
        }
    }

    /// 标题与作者均非空才算可用记录
    pub fn is_wellformed(&self) -> bool {
        !self.title.is_empty() && !self.author.is_empty()
    }

    /// 是否属于某个系列
    pub fn is_series_member(&self) -> bool {
        self.series_name.is_some()
    }

    /// 系列键（去空白后的系列名），非系列作品返回 None
    pub fn series_key(&self) -> Option<&str> {
        self.series_name.as_deref().map(str::trim)
    }

    /// 自然键
    pub fn key(&self) -> BookKey {
        BookKey::new(&self.title, Some(&self.author))
    }
}

fn take_nonblank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// 图书自然键 - 按 (title, author) 定位一本书
///
/// author 可以缺省，此时仅按标题匹配（命令行场景下多数标题唯一）。
/// 匹配忽略大小写与首尾空白。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookKey {
    title: String,
    author: Option<String>,
}

impl BookKey {
    pub fn new(title: impl Into<String>, author: Option<&str>) -> Self {
        Self {
            title: title.into().trim().to_lowercase(),
            author: author
                .map(|a| a.trim().to_lowercase())
                .filter(|a| !a.is_empty()),
        }
    }

    pub fn matches(&self, book: &Book) -> bool {
        if book.title.trim().to_lowercase() != self.title {
            return false;
        }
        match &self.author {
            Some(author) => book.author.trim().to_lowercase() == *author,
            None => true,
        }
    }
}

impl std::fmt::Display for BookKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.author {
            Some(author) => write!(f, "'{}' by {}", self.title, author),
            None => write!(f, "'{}'", self.title),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_blank_optionals() {
        let book = Book::new(
            "  Dune  ",
            "Frank Herbert",
            Some("   ".to_string()),
            Some("".to_string()),
            Some(3),
        );

        assert_eq!(book.title, "Dune");
        assert_eq!(book.genre, None);
        assert_eq!(book.series_name, None);
        // 系列名被清除后序号也应清除
        assert_eq!(book.series_number, None);
    }

    #[test]
    fn test_normalize_zero_position() {
        let book = Book::new(
            "Dune",
            "Frank Herbert",
            None,
            Some("Dune Chronicles".to_string()),
            Some(0),
        );
        assert_eq!(book.series_name.as_deref(), Some("Dune Chronicles"));
        assert_eq!(book.series_number, None);
    }

    #[test]
    fn test_key_matching_case_insensitive() {
        let book = Book::new("The Hobbit", "J.R.R. Tolkien", None, None, None);

        assert!(BookKey::new("the hobbit", None).matches(&book));
        assert!(BookKey::new("THE HOBBIT", Some("j.r.r. tolkien")).matches(&book));
        assert!(!BookKey::new("The Hobbit", Some("Other Author")).matches(&book));
        assert!(!BookKey::new("Another Title", None).matches(&book));
    }

    #[test]
    fn test_deserialize_legacy_record() {
        // 原始数据文件没有 added_at，可选字段可能为 null
        let json = r#"{
            "title": "The Fellowship of the Ring",
            "author": "J.R.R. Tolkien",
            "genre": null,
            "series_name": "The Lord of the Rings",
            "series_number": 1
        }"#;

        let book: Book = serde_json::from_str(json).unwrap();
        assert_eq!(book.series_number, Some(1));
        assert!(book.is_series_member());
    }
}
