//! Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{
    BookRepositoryPort, CounterPort, ItemBreakdown, RandomChoicePort, TextStats, TitleWord,
    TitleWordsPort,
};
use crate::application::queries::Statistics;
use crate::domain::series::SeriesGroup;
use crate::domain::{eligible_books, series, Book};

// ============================================================================
// ListTbr / ListHistory
// ============================================================================

/// TBR 列表视图：系列分组在前，独立作品在后
#[derive(Debug, Clone)]
pub struct TbrView {
    pub series: Vec<SeriesGroup>,
    pub standalone: Vec<Book>,
    pub total: usize,
}

pub struct ListTbrHandler {
    repo: Arc<dyn BookRepositoryPort>,
}

impl ListTbrHandler {
    pub fn new(repo: Arc<dyn BookRepositoryPort>) -> Self {
        Self { repo }
    }

    pub async fn handle(&self) -> Result<TbrView, ApplicationError> {
        let tbr = self.repo.load_tbr().await?;
        let total = tbr.len();
        let (series, standalone) = series::partition(&tbr);

        Ok(TbrView {
            series,
            standalone,
            total,
        })
    }
}

pub struct ListHistoryHandler {
    repo: Arc<dyn BookRepositoryPort>,
}

impl ListHistoryHandler {
    pub fn new(repo: Arc<dyn BookRepositoryPort>) -> Self {
        Self { repo }
    }

    pub async fn handle(&self) -> Result<Vec<Book>, ApplicationError> {
        Ok(self.repo.load_history().await?)
    }
}

// ============================================================================
// Suggest
// ============================================================================

/// 推荐结果
///
/// `NothingEligible` 是合法的终态而非错误：TBR 为空，
/// 或所有未读书都被系列前作阻塞。
#[derive(Debug, Clone)]
pub enum SuggestionOutcome {
    Suggested {
        book: Book,
        /// 当前可推荐的书数
        eligible_count: usize,
        /// TBR 总数
        total_unread: usize,
    },
    NothingEligible {
        total_unread: usize,
    },
}

pub struct SuggestHandler {
    repo: Arc<dyn BookRepositoryPort>,
    chooser: Arc<dyn RandomChoicePort>,
}

impl SuggestHandler {
    pub fn new(repo: Arc<dyn BookRepositoryPort>, chooser: Arc<dyn RandomChoicePort>) -> Self {
        Self { repo, chooser }
    }

    pub async fn handle(&self) -> Result<SuggestionOutcome, ApplicationError> {
        let tbr = self.repo.load_tbr().await?;
        let history = self.repo.load_history().await?;
        let total_unread = tbr.len();

        let eligible = eligible_books(&tbr, &history);
        for warning in &eligible.warnings {
            tracing::warn!(warning = %warning, "series data quality issue");
        }

        if eligible.is_empty() {
            return Ok(SuggestionOutcome::NothingEligible { total_unread });
        }

        let eligible_count = eligible.books.len();
        let book = self.chooser.choose(&eligible.books).await?;

        tracing::info!(
            title = %book.title,
            eligible_count = eligible_count,
            total_unread = total_unread,
            "Suggestion picked"
        );

        Ok(SuggestionOutcome::Suggested {
            book,
            eligible_count,
            total_unread,
        })
    }
}

// ============================================================================
// Statistics
// ============================================================================

/// 统计视图
///
/// 每个区块独立降级：对应的 worker 不可用时该区块为 None，
/// 其余区块照常返回。
#[derive(Debug, Clone, Default)]
pub struct StatisticsView {
    pub genres: Option<ItemBreakdown>,
    pub authors: Option<ItemBreakdown>,
    pub title_stats: Option<TextStats>,
    pub common_words: Option<Vec<TitleWord>>,
}

pub struct StatisticsHandler {
    repo: Arc<dyn BookRepositoryPort>,
    counter: Arc<dyn CounterPort>,
    words: Arc<dyn TitleWordsPort>,
}

impl StatisticsHandler {
    pub fn new(
        repo: Arc<dyn BookRepositoryPort>,
        counter: Arc<dyn CounterPort>,
        words: Arc<dyn TitleWordsPort>,
    ) -> Self {
        Self {
            repo,
            counter,
            words,
        }
    }

    pub async fn handle(&self, query: Statistics) -> Result<StatisticsView, ApplicationError> {
        let mut all = self.repo.load_tbr().await?;
        all.extend(self.repo.load_history().await?);

        let mut view = StatisticsView::default();
        if all.is_empty() {
            return Ok(view);
        }

        // 没有任何书带类型时照常请求计数：得到空的统计结果，
        // 与 worker 不可用（None）可区分
        let genres: Vec<String> = all.iter().filter_map(|b| b.genre.clone()).collect();
        view.genres = self.section(self.counter.count_items(&genres).await, "genres");

        let authors: Vec<String> = all.iter().map(|b| b.author.clone()).collect();
        view.authors = self.section(self.counter.count_items(&authors).await, "authors");

        let titles: Vec<String> = all.iter().map(|b| b.title.clone()).collect();
        let joined = titles.join(" ");
        view.title_stats = self.section(self.counter.text_stats(&joined).await, "title stats");
        view.common_words = self.section(
            self.words.common_words(&titles, query.word_limit).await,
            "common words",
        );

        Ok(view)
    }

    /// 单个统计区块的降级处理
    fn section<T>(
        &self,
        result: Result<T, crate::application::ports::HelperError>,
        name: &str,
    ) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(section = name, error = %e, "statistics section unavailable");
                None
            }
        }
    }
}
