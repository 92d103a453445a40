//! 批量去重工具：按 hash 首次出现过滤三列并行文本文件

pub mod dedup;
pub mod error;

pub use dedup::{
    Deduplicator, Summary, HASH_IN, HASH_OUT, MOVE_IN, MOVE_OUT, SCORE_IN, SCORE_OUT, SEPARATOR,
};
pub use error::DedupError;
