//! BookBase - TBR 图书清单管理 CLI
//!
//! 架构:
//! - Domain: book/, series, suggestion
//! - Application: commands, queries, ports
//! - Infrastructure: ipc, workers, persistence, fsio

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use bookbase::application::commands::{
    AddBook, AddBookHandler, EditBook, EditBookHandler, MarkRead, MarkReadHandler, MarkUnread,
    MarkUnreadHandler, RemoveBook, RemoveBookHandler,
};
use bookbase::application::ports::RandomChoicePort;
use bookbase::application::queries::{
    ListHistoryHandler, ListTbrHandler, Statistics, StatisticsHandler, StatisticsView,
    SuggestHandler, SuggestionOutcome, TbrView,
};
use bookbase::config::{load_config, load_config_from_path, print_config};
use bookbase::domain::{Book, BookKey};
use bookbase::infrastructure::ipc::{
    IpcClientConfig, IpcCounterClient, IpcRandomClient, IpcTextFormatClient, IpcTitleWordsClient,
};
use bookbase::infrastructure::workers::LocalRandomChooser;
use bookbase::infrastructure::JsonBookRepository;

#[derive(Parser)]
#[command(name = "bookbase", about = "A spoiler-free TBR book list manager")]
struct Cli {
    /// Config file path (default: config.toml / config.local.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add a book to the TBR list.
    Add {
        title: String,

        #[arg(long)]
        author: String,

        #[arg(long)]
        genre: Option<String>,

        /// Series the book belongs to.
        #[arg(long)]
        series: Option<String>,

        /// Position within the series (0 means unnumbered).
        #[arg(long)]
        number: Option<u32>,
    },

    /// Show the TBR list, grouped by series.
    List,

    /// Show the reading history.
    History,

    /// Suggest the next book to read.
    Suggest,

    /// Move a book from the TBR list into the reading history.
    Read {
        title: String,

        /// Disambiguate when several books share a title.
        #[arg(long)]
        author: Option<String>,
    },

    /// Move a book from the reading history back onto the TBR list.
    Unread {
        title: String,

        #[arg(long)]
        author: Option<String>,
    },

    /// Remove a book from the TBR list.
    Remove {
        title: String,

        #[arg(long)]
        author: Option<String>,
    },

    /// Edit a book on the TBR list. Omitted fields are kept;
    /// pass an empty string (or 0 for --set-number) to clear one.
    Edit {
        title: String,

        #[arg(long)]
        author: Option<String>,

        #[arg(long)]
        set_title: Option<String>,

        #[arg(long)]
        set_author: Option<String>,

        #[arg(long)]
        set_genre: Option<String>,

        #[arg(long)]
        set_series: Option<String>,

        #[arg(long)]
        set_number: Option<u32>,
    },

    /// Show statistics over the TBR list and reading history.
    Stats {
        /// How many common title words to show.
        #[arg(long, default_value_t = 10)]
        words: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = match &cli.config {
        Some(path) => load_config_from_path(Some(path)),
        None => load_config(),
    }
    .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!("{},bookbase={}", config.log.level, config.log.level);
    let subscriber = tracing_subscriber::fmt().with_env_filter(
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
    );
    if config.log.json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    tracing::debug!("BookBase - TBR book list manager");
    print_config(&config);

    // 确保数据目录存在
    tokio::fs::create_dir_all(&config.storage.data_dir).await?;
    tokio::fs::create_dir_all(&config.ipc.dir).await?;

    // 创建 Repository 适配器
    let repo = Arc::new(JsonBookRepository::new(
        config.storage.books_path(),
        config.storage.history_path(),
    ));

    // 创建 helper 通道客户端
    let ipc = IpcClientConfig {
        dir: config.ipc.dir.clone(),
        poll_interval: config.ipc.poll_interval(),
        timeout: config.ipc.timeout(),
    };
    let formatter = Arc::new(IpcTextFormatClient::new(&ipc));
    let counter = Arc::new(IpcCounterClient::new(&ipc));
    let words = Arc::new(IpcTitleWordsClient::new(&ipc));
    let chooser: Arc<dyn RandomChoicePort> = if config.suggestion.delegate_random {
        Arc::new(IpcRandomClient::new(&ipc))
    } else {
        Arc::new(LocalRandomChooser)
    };

    match cli.command {
        Command::Add {
            title,
            author,
            genre,
            series,
            number,
        } => {
            let handler = AddBookHandler::new(repo, formatter);
            let book = handler
                .handle(AddBook {
                    title,
                    author,
                    genre,
                    series_name: series,
                    series_number: number,
                })
                .await?;
            println!("Added: {}", describe(&book));
        }

        Command::List => {
            let handler = ListTbrHandler::new(repo);
            print_tbr(&handler.handle().await?);
        }

        Command::History => {
            let handler = ListHistoryHandler::new(repo);
            let books = handler.handle().await?;
            if books.is_empty() {
                println!("No books read yet.");
            } else {
                println!("Read ({}):", books.len());
                for book in &books {
                    println!("  {}", describe(book));
                }
            }
        }

        Command::Suggest => {
            let handler = SuggestHandler::new(repo, chooser);
            match handler.handle().await? {
                SuggestionOutcome::Suggested {
                    book,
                    eligible_count,
                    total_unread,
                } => {
                    println!("Read next: {}", describe(&book));
                    println!("  (picked from {} of {} unread)", eligible_count, total_unread);
                }
                SuggestionOutcome::NothingEligible { total_unread } => {
                    if total_unread == 0 {
                        println!("Your TBR list is empty - add some books first.");
                    } else {
                        println!("Nothing to suggest right now.");
                    }
                }
            }
        }

        Command::Read { title, author } => {
            let handler = MarkReadHandler::new(repo);
            let key = BookKey::new(title, author.as_deref());
            let book = handler.handle(MarkRead { key }).await?;
            println!("Marked as read: {}", describe(&book));
        }

        Command::Unread { title, author } => {
            let handler = MarkUnreadHandler::new(repo);
            let key = BookKey::new(title, author.as_deref());
            let book = handler.handle(MarkUnread { key }).await?;
            println!("Moved back to TBR: {}", describe(&book));
        }

        Command::Remove { title, author } => {
            let handler = RemoveBookHandler::new(repo);
            let key = BookKey::new(title, author.as_deref());
            let book = handler.handle(RemoveBook { key }).await?;
            println!("Removed: {}", describe(&book));
        }

        Command::Edit {
            title,
            author,
            set_title,
            set_author,
            set_genre,
            set_series,
            set_number,
        } => {
            let handler = EditBookHandler::new(repo, formatter);
            let key = BookKey::new(title, author.as_deref());
            let book = handler
                .handle(EditBook {
                    key,
                    title: set_title,
                    author: set_author,
                    genre: set_genre,
                    series_name: set_series,
                    series_number: set_number,
                })
                .await?;
            println!("Updated: {}", describe(&book));
        }

        Command::Stats { words: word_limit } => {
            let handler = StatisticsHandler::new(repo, counter, words);
            let view = handler.handle(Statistics { word_limit }).await?;
            print_stats(&view);
        }
    }

    Ok(())
}

/// 单行书目描述
fn describe(book: &Book) -> String {
    let mut line = format!("{} by {}", book.title, book.author);
    if let Some(series) = &book.series_name {
        match book.series_number {
            Some(n) => line.push_str(&format!(" ({} #{})", series, n)),
            None => line.push_str(&format!(" ({})", series)),
        }
    }
    if let Some(genre) = &book.genre {
        line.push_str(&format!(" [{}]", genre));
    }
    line
}

fn print_tbr(view: &TbrView) {
    if view.total == 0 {
        println!("Your TBR list is empty.");
        return;
    }

    println!("To read ({}):", view.total);
    for group in &view.series {
        println!("  {}:", group.name);
        for book in &group.books {
            match book.series_number {
                Some(n) => println!("    #{} {} by {}", n, book.title, book.author),
                None => println!("    -  {} by {}", book.title, book.author),
            }
        }
    }
    if !view.standalone.is_empty() {
        println!("  Standalone:");
        for book in &view.standalone {
            println!("    {} by {}", book.title, book.author);
        }
    }
}

fn print_stats(view: &StatisticsView) {
    if view.genres.is_none()
        && view.authors.is_none()
        && view.title_stats.is_none()
        && view.common_words.is_none()
    {
        println!("No statistics available.");
        return;
    }

    match &view.genres {
        Some(breakdown) if breakdown.total == 0 => println!("Genres: none recorded"),
        Some(breakdown) => {
            println!("Genres ({} across {} books):", breakdown.unique, breakdown.total);
            for (genre, count) in &breakdown.counts {
                println!("  {}: {}", genre, count);
            }
        }
        None => println!("Genres: unavailable"),
    }

    match &view.authors {
        Some(breakdown) => {
            println!("Authors ({} across {} books):", breakdown.unique, breakdown.total);
            for (author, count) in &breakdown.counts {
                println!("  {}: {}", author, count);
            }
        }
        None => println!("Authors: unavailable"),
    }

    match &view.title_stats {
        Some(stats) => println!(
            "Titles: {} characters, {} words",
            stats.characters, stats.words
        ),
        None => println!("Titles: unavailable"),
    }

    match &view.common_words {
        Some(words) if words.is_empty() => println!("Common title words: none"),
        Some(words) => {
            println!("Common title words:");
            for word in words {
                println!("  {}: {}", word.word, word.count);
            }
        }
        None => println!("Common title words: unavailable"),
    }
}
