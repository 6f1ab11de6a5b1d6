//! 推荐候选筛选
//!
//! 从两个显式传入的集合（TBR 与阅读历史）计算可推荐的书，
//! 保证不剧透系列阅读顺序。纯函数，不依赖任何全局状态。
//!
//! 资格规则：
//! 1. 独立作品（无系列名）总是可推荐。
//! 2. 系列内编号为 p 的书：同系列所有编号严格小于 p 的书都已读完才可推荐。
//! 3. 系列内未编号的书：该系列所有编号的书都已读完才可推荐，
//!    未编号的书之间互不约束。
//! 4. 同系列同编号的两本书互不阻塞，但会产生数据质量警告。

use crate::domain::book::Book;
use crate::domain::series;

/// 数据质量警告
///
/// 警告不影响资格判定，调用方负责记录或提示。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeriesWarning {
    /// 同一系列中出现重复编号
    DuplicatePosition { series: String, position: u32 },
}

impl std::fmt::Display for SeriesWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeriesWarning::DuplicatePosition { series, position } => {
                write!(f, "series '{}' has more than one book #{}", series, position)
            }
        }
    }
}

/// 资格筛选结果
#[derive(Debug, Clone)]
pub struct EligibleSet {
    /// 可推荐的书（TBR 的子集）
    pub books: Vec<Book>,
    pub warnings: Vec<SeriesWarning>,
}

impl EligibleSet {
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

/// 计算可推荐集合
///
/// `tbr` 为未读集合，`history` 为已读集合。
/// 返回的 books 保持 `tbr` 的原有顺序。
pub fn eligible_books(tbr: &[Book], history: &[Book]) -> EligibleSet {
    let mut books = Vec::new();

    for book in tbr {
        if is_eligible(book, tbr) {
            books.push(book.clone());
        }
    }

    let all: Vec<&Book> = tbr.iter().chain(history.iter()).collect();
    let warnings = series::duplicate_positions(&all)
        .into_iter()
        .map(|(series, position)| SeriesWarning::DuplicatePosition { series, position })
        .collect();

    EligibleSet { books, warnings }
}

/// 单本书的资格判定
///
/// 只需检查未读集合：已读的前作不阻塞，未知的前作（两个集合都没有）
/// 系统无从得知，同样不阻塞。
fn is_eligible(book: &Book, tbr: &[Book]) -> bool {
    let series = match book.series_key() {
        Some(s) => s,
        // 独立作品总是可推荐
        None => return true,
    };

    let mut unread_in_series = tbr
        .iter()
        .filter(|other| !std::ptr::eq(*other, book))
        .filter(|other| other.series_key() == Some(series));

    match book.series_number {
        Some(position) => {
            // 严格小于本书编号的未读前作会阻塞；同编号不阻塞
            !unread_in_series
                .filter_map(|other| other.series_number)
                .any(|other_position| other_position < position)
        }
        None => {
            // 未编号：任何未读的编号成员都阻塞
            !unread_in_series.any(|other| other.series_number.is_some())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(title: &str, series: Option<&str>, number: Option<u32>) -> Book {
        Book::new(
            title,
            "Author",
            None,
            series.map(|s| s.to_string()),
            number,
        )
    }

    fn titles(set: &EligibleSet) -> Vec<&str> {
        set.books.iter().map(|b| b.title.as_str()).collect()
    }

    #[test]
    fn test_standalone_always_eligible() {
        let tbr = vec![book("Solo", None, None)];
        let set = eligible_books(&tbr, &[]);
        assert_eq!(titles(&set), vec!["Solo"]);
    }

    #[test]
    fn test_only_next_in_series_is_eligible() {
        // 系列 [A#1, B#2, C#3]，仅 A 已读 → 只有 B 可推荐
        let tbr = vec![
            book("B", Some("Saga"), Some(2)),
            book("C", Some("Saga"), Some(3)),
        ];
        let history = vec![book("A", Some("Saga"), Some(1))];

        let set = eligible_books(&tbr, &history);
        assert_eq!(titles(&set), vec!["B"]);
    }

    #[test]
    fn test_first_book_eligible_with_empty_history() {
        let tbr = vec![
            book("A", Some("Saga"), Some(1)),
            book("B", Some("Saga"), Some(2)),
        ];
        let set = eligible_books(&tbr, &[]);
        assert_eq!(titles(&set), vec!["A"]);
    }

    #[test]
    fn test_gap_does_not_unlock_later_books() {
        // 只读过 #1，#3 缺少前作 #2，不可推荐
        let tbr = vec![book("C", Some("Saga"), Some(3)), book("B", Some("Saga"), Some(2))];
        let history = vec![book("A", Some("Saga"), Some(1))];

        let set = eligible_books(&tbr, &history);
        assert_eq!(titles(&set), vec!["B"]);
    }

    #[test]
    fn test_unknown_predecessor_does_not_block() {
        // #2 不在任何集合中：系统无从得知，#3 不被阻塞
        let tbr = vec![book("C", Some("Saga"), Some(3))];
        let history = vec![book("A", Some("Saga"), Some(1))];

        let set = eligible_books(&tbr, &history);
        assert_eq!(titles(&set), vec!["C"]);
    }

    #[test]
    fn test_unnumbered_blocked_by_unread_numbered() {
        let tbr = vec![
            book("Extra", Some("Saga"), None),
            book("One", Some("Saga"), Some(1)),
        ];
        let set = eligible_books(&tbr, &[]);
        assert_eq!(titles(&set), vec!["One"]);
    }

    #[test]
    fn test_unnumbered_eligible_after_all_numbered_read() {
        let tbr = vec![
            book("Extra", Some("Saga"), None),
            book("Bonus", Some("Saga"), None),
        ];
        let history = vec![book("One", Some("Saga"), Some(1))];

        // 编号成员都已读：未编号成员互不约束，全部可推荐
        let set = eligible_books(&tbr, &history);
        assert_eq!(titles(&set), vec!["Extra", "Bonus"]);
    }

    #[test]
    fn test_single_unnumbered_member_vacuously_eligible() {
        let tbr = vec![book("Lone", Some("Saga"), None)];
        let set = eligible_books(&tbr, &[]);
        assert_eq!(titles(&set), vec!["Lone"]);
    }

    #[test]
    fn test_duplicate_positions_do_not_block_each_other() {
        let tbr = vec![
            book("A1", Some("Saga"), Some(1)),
            book("A2", Some("Saga"), Some(1)),
        ];
        let set = eligible_books(&tbr, &[]);

        assert_eq!(titles(&set), vec!["A1", "A2"]);
        assert_eq!(
            set.warnings,
            vec![SeriesWarning::DuplicatePosition {
                series: "Saga".to_string(),
                position: 1,
            }]
        );
    }

    #[test]
    fn test_empty_tbr_yields_empty_set() {
        let set = eligible_books(&[], &[]);
        assert!(set.is_empty());
        assert!(set.warnings.is_empty());
    }

    #[test]
    fn test_independent_series_do_not_interfere() {
        let tbr = vec![
            book("S1-2", Some("First"), Some(2)),
            book("S2-1", Some("Second"), Some(1)),
        ];
        let set = eligible_books(&tbr, &[]);

        // First #2 被自己系列的 #1 缺读阻塞？#1 不在任何集合 → 不阻塞。
        // 这里补上 First #1 未读的情况：
        let tbr = vec![
            book("S1-1", Some("First"), Some(1)),
            book("S1-2", Some("First"), Some(2)),
            book("S2-1", Some("Second"), Some(1)),
        ];
        let set2 = eligible_books(&tbr, &[]);
        assert_eq!(titles(&set2), vec!["S1-1", "S2-1"]);
        assert_eq!(titles(&set).len(), 2);
    }

    #[test]
    fn test_everything_blocked_is_a_legal_outcome() {
        let tbr = vec![book("B", Some("Saga"), Some(2))];
        let history = vec![];
        let blocked = vec![book("A", Some("Saga"), Some(1))];

        // A 未读但也在 TBR 中时 B 被阻塞
        let mut full_tbr = tbr.clone();
        full_tbr.extend(blocked);
        let set = eligible_books(&full_tbr, &history);
        assert_eq!(titles(&set), vec!["A"]);
    }
}
