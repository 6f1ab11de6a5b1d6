//! 系列分组与排序
//!
//! 系列不是持久化实体，而是按系列名派生的分组键。
//! 有编号的成员构成严格顺序；未编号的成员作为整体排在编号成员之后，
//! 彼此之间顺序不作约束。

use std::collections::BTreeMap;

use crate::domain::book::Book;

/// 按系列分组后的视图
#[derive(Debug, Clone)]
pub struct SeriesGroup {
    pub name: String,
    /// 成员，编号升序，未编号的排在最后
    pub books: Vec<Book>,
}

/// 将一组书拆分为系列分组与独立作品
///
/// 系列按名称排序（BTreeMap），组内按 [`sort_members`] 排序。
pub fn partition(books: &[Book]) -> (Vec<SeriesGroup>, Vec<Book>) {
    let mut series: BTreeMap<String, Vec<Book>> = BTreeMap::new();
    let mut standalone = Vec::new();

    for book in books {
        match book.series_key() {
            Some(key) => {
                series
                    .entry(key.to_string())
                    .or_default()
                    .push(book.clone());
            }
            None => standalone.push(book.clone()),
        }
    }

    let groups = series
        .into_iter()
        .map(|(name, mut books)| {
            sort_members(&mut books);
            SeriesGroup { name, books }
        })
        .collect();

    (groups, standalone)
}

/// 系列内排序：编号升序，未编号的作为一个整体排在最后（稳定排序）
pub fn sort_members(books: &mut [Book]) {
    books.sort_by_key(|b| match b.series_number {
        Some(n) => (0, n),
        None => (1, 0),
    });
}

/// 找出同一系列内编号重复的 (系列, 序号) 组合
///
/// 重复编号是数据质量问题而非错误：两本同号书互不阻塞（见 suggestion 模块），
/// 但应当提示用户修正。
pub fn duplicate_positions(books: &[&Book]) -> Vec<(String, u32)> {
    let mut seen: BTreeMap<(String, u32), usize> = BTreeMap::new();

    for book in books {
        if let (Some(series), Some(number)) = (book.series_key(), book.series_number) {
            *seen.entry((series.to_string(), number)).or_insert(0) += 1;
        }
    }

    seen.into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(key, _)| key)
        .collect()
}
