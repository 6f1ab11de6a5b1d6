//! data_counter worker - 条目计数与文本统计 helper 进程

use bookbase::config::load_config;
use bookbase::infrastructure::ipc::{SlotChannel, SlotWorker};
use bookbase::infrastructure::workers::{self, DataCounterService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    let log_filter = format!("{},bookbase={}", config.log.level, config.log.level);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tokio::fs::create_dir_all(&config.ipc.dir).await?;

    let channel = SlotChannel::for_helper(&config.ipc.dir, workers::DATA_COUNTER);
    let worker = SlotWorker::new(channel, config.ipc.poll_interval());

    tokio::select! {
        _ = worker.run(DataCounterService) => {}
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received shutdown signal");
        }
    }

    Ok(())
}
