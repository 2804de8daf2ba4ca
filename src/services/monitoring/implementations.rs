// 進捗監視の具象実装

use crate::core::{ProgressReporter, RunSummary};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// 進捗を出力する書き込み行数の間隔
const PROGRESS_INTERVAL: u64 = 100_000;

/// コンソール出力による進捗報告実装
#[derive(Debug, Default, Clone)]
pub struct ConsoleProgressReporter {
    quiet: bool,
    last_bucket: Arc<AtomicU64>,
}

impl ConsoleProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quiet() -> Self {
        Self {
            quiet: true,
            ..Self::default()
        }
    }

    /// 前回の報告から間隔を跨いだ場合、または完了時のみ表示する
    fn should_report(&self, written: u64, total_words: Option<u64>) -> bool {
        let bucket = written / PROGRESS_INTERVAL;
        let previous = self.last_bucket.fetch_max(bucket, Ordering::Relaxed);
        bucket > previous || total_words == Some(written)
    }
}

#[async_trait]
impl ProgressReporter for ConsoleProgressReporter {
    async fn report_started(&self, total_words: Option<u64>, workers: usize) {
        if self.quiet {
            return;
        }
        match total_words {
            Some(total) => println!("🌈 Hashing {total} words with {workers} workers..."),
            None => println!("🌈 Hashing wordlists with {workers} workers..."),
        }
    }

    async fn report_progress(&self, written: u64, total_words: Option<u64>) {
        if self.quiet || !self.should_report(written, total_words) {
            return;
        }
        match total_words {
            Some(total) if total > 0 => {
                let percentage = (written as f64 / total as f64) * 100.0;
                println!("📊 Progress: {written}/{total} ({percentage:.1}%)");
            }
            _ => println!("📊 Progress: {written} rows written"),
        }
    }

    /// エラー本文は呼び出し側が表示するため、中断の事実だけを伝える
    async fn report_error(&self, _error: &str) {
        if !self.quiet {
            eprintln!("🛑 Run aborted");
        }
    }

    async fn report_completed(&self, summary: &RunSummary) {
        if !self.quiet {
            println!(
                "✅ Completed! Rows: {}, Chunks: {}, Output: {} ({}ms)",
                summary.rows_written, summary.work_units, summary.output_location, summary.elapsed_ms
            );
        }
    }
}

/// 何もしない進捗報告実装（テスト・ベンチマーク用）
#[derive(Debug, Default, Clone)]
pub struct NoOpProgressReporter;

impl NoOpProgressReporter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProgressReporter for NoOpProgressReporter {
    async fn report_started(&self, _total_words: Option<u64>, _workers: usize) {}

    async fn report_progress(&self, _written: u64, _total_words: Option<u64>) {}

    async fn report_error(&self, _error: &str) {}

    async fn report_completed(&self, _summary: &RunSummary) {}
}
