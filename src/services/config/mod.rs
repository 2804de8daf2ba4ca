// 設定管理機能

pub mod implementations;

pub use implementations::{
    default_worker_count, validate_config, DefaultPipelineConfig, DEFAULT_CHUNK_SIZE,
};
