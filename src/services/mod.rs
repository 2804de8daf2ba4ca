// サービス層 - 機能別のビジネスロジック
// 各サービスは特定の責任を持ち、疎結合で設計されている

pub mod config;
pub mod monitoring;
pub mod persistence;
pub mod processing;

// 公開API - 各サービスの主要機能を明示的にエクスポート
pub use config::{default_worker_count, validate_config, DefaultPipelineConfig, DEFAULT_CHUNK_SIZE};
pub use monitoring::{ConsoleProgressReporter, NoOpProgressReporter};
pub use persistence::{
    lookup_digest, spawn_output_aggregator, FlatFileDigestPersistence, MemoryDigestPersistence,
    OutputKind, OutputTarget, SqliteDigestPersistence,
};
pub use processing::hash_work_unit;
