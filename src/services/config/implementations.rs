// 設定管理の具象実装

use crate::core::{PipelineConfig, RainbowError, RainbowResult};

/// 1チャンクあたりの既定単語数
pub const DEFAULT_CHUNK_SIZE: usize = 25_000;

const DEFAULT_QUEUE_MULTIPLIER: usize = 2;

/// CPU数から1つ（アグリゲーター用）を引いたワーカー数、最低1
pub fn default_worker_count(cpu_count: usize) -> usize {
    cpu_count.saturating_sub(1).max(1)
}

/// 起動前の設定検証
pub fn validate_config<C: PipelineConfig + ?Sized>(config: &C) -> RainbowResult<()> {
    if config.worker_count() == 0 {
        return Err(RainbowError::configuration(
            "ワーカー数は1以上である必要があります",
        ));
    }
    if config.chunk_size() == 0 {
        return Err(RainbowError::configuration(
            "チャンクサイズは1以上である必要があります",
        ));
    }
    if config.work_queue_capacity() == 0 || config.result_queue_capacity() == 0 {
        return Err(RainbowError::configuration(
            "キュー容量は1以上である必要があります",
        ));
    }
    Ok(())
}

/// デフォルト設定実装
#[derive(Debug, Clone)]
pub struct DefaultPipelineConfig {
    workers: usize,
    queue_multiplier: usize,
    chunk_size: usize,
    iterations: u32,
    enable_progress: bool,
}

impl DefaultPipelineConfig {
    pub fn new(cpu_count: usize) -> Self {
        Self {
            workers: default_worker_count(cpu_count),
            queue_multiplier: DEFAULT_QUEUE_MULTIPLIER,
            chunk_size: DEFAULT_CHUNK_SIZE,
            iterations: 1,
            enable_progress: true,
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_queue_multiplier(mut self, multiplier: usize) -> Self {
        self.queue_multiplier = multiplier;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_progress_reporting(mut self, enable: bool) -> Self {
        self.enable_progress = enable;
        self
    }
}

impl Default for DefaultPipelineConfig {
    fn default() -> Self {
        Self::new(num_cpus::get())
    }
}

impl PipelineConfig for DefaultPipelineConfig {
    fn worker_count(&self) -> usize {
        self.workers
    }

    fn work_queue_capacity(&self) -> usize {
        self.workers * self.queue_multiplier
    }

    fn result_queue_capacity(&self) -> usize {
        self.workers * self.queue_multiplier
    }

    fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    fn iterations(&self) -> u32 {
        self.iterations
    }

    fn enable_progress_reporting(&self) -> bool {
        self.enable_progress
    }
}
