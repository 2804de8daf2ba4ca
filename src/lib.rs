//! ワードリストからレインボーテーブルを生成する並列パイプライン
//!
//! 配信 → ハッシュワーカー群 → 単一のアグリゲーター の3段構成で、
//! フラットファイルまたはSQLiteに `(digest, word)` を書き出す。

pub mod cli;
pub mod core;
pub mod digest;
pub mod engine;
pub mod services;
pub mod wordlist;

pub use crate::core::{RainbowError, RainbowResult, RunSummary, Word};
pub use crate::digest::{digest_hex, DigestAlgorithm};
pub use crate::engine::{generate_rainbow_table, RunRequest, Supervisor, SupervisorState};
pub use crate::services::{
    lookup_digest, ConsoleProgressReporter, DefaultPipelineConfig, MemoryDigestPersistence,
    NoOpProgressReporter, OutputKind, OutputTarget,
};
