use anyhow::Context;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use hash_dedup::{Deduplicator, HASH_OUT, MOVE_OUT, SCORE_OUT};

fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    // 输入输出文件名固定，都在当前目录
    let summary = Deduplicator::new(".")
        .run()
        .context("deduplication failed")?;

    info!(
        rows = summary.rows,
        unique = summary.unique,
        "wrote '{}', '{}', '{}'",
        HASH_OUT,
        MOVE_OUT,
        SCORE_OUT
    );
    Ok(())
}
