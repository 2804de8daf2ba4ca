// パイプラインのトレイト定義
// 設定・進捗報告・出力先の抽象化インターフェース

use super::types::{ResultBatch, RunSummary};
use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

/// パイプラインの設定を抽象化するトレイト
#[automock]
pub trait PipelineConfig: Send + Sync {
    /// ハッシュワーカー数
    fn worker_count(&self) -> usize;

    /// 作業キューの容量
    fn work_queue_capacity(&self) -> usize;

    /// 結果キューの容量
    fn result_queue_capacity(&self) -> usize;

    /// 1チャンクあたりの単語数
    fn chunk_size(&self) -> usize;

    /// 受け付けるが未使用のハッシュ反復回数
    fn iterations(&self) -> u32;

    /// 進捗報告を有効にするかどうか
    fn enable_progress_reporting(&self) -> bool;
}

impl PipelineConfig for Box<dyn PipelineConfig> {
    fn worker_count(&self) -> usize {
        self.as_ref().worker_count()
    }

    fn work_queue_capacity(&self) -> usize {
        self.as_ref().work_queue_capacity()
    }

    fn result_queue_capacity(&self) -> usize {
        self.as_ref().result_queue_capacity()
    }

    fn chunk_size(&self) -> usize {
        self.as_ref().chunk_size()
    }

    fn iterations(&self) -> u32 {
        self.as_ref().iterations()
    }

    fn enable_progress_reporting(&self) -> bool {
        self.as_ref().enable_progress_reporting()
    }
}

/// 進捗報告の抽象化トレイト
#[automock]
#[async_trait]
pub trait ProgressReporter: Send + Sync {
    /// 処理開始時の報告（総単語数は数えた場合のみ）
    async fn report_started(&self, total_words: Option<u64>, workers: usize);

    /// 書き込み済み行数の報告
    async fn report_progress(&self, written: u64, total_words: Option<u64>);

    /// 致命的エラーの報告
    async fn report_error(&self, error: &str);

    /// 処理完了時の報告
    async fn report_completed(&self, summary: &RunSummary);
}

#[async_trait]
impl ProgressReporter for Box<dyn ProgressReporter> {
    async fn report_started(&self, total_words: Option<u64>, workers: usize) {
        self.as_ref().report_started(total_words, workers).await
    }

    async fn report_progress(&self, written: u64, total_words: Option<u64>) {
        self.as_ref().report_progress(written, total_words).await
    }

    async fn report_error(&self, error: &str) {
        self.as_ref().report_error(error).await
    }

    async fn report_completed(&self, summary: &RunSummary) {
        self.as_ref().report_completed(summary).await
    }
}

/// 出力先（フラットファイル / データベース）の抽象化トレイト
///
/// 実装はアグリゲーターだけが所有し、`open` → `store_batch`* → `finalize`
/// の順で一度ずつ呼ばれる。
#[automock]
#[async_trait]
pub trait DigestPersistence: Send {
    /// 出力先を開く（ファイルは追記モード、DBは接続とスキーマ作成）
    async fn open(&mut self) -> Result<()>;

    /// バッチ内の順序を保って書き込む
    async fn store_batch(&mut self, batch: &ResultBatch) -> Result<()>;

    /// フラッシュしてクローズ
    async fn finalize(&mut self) -> Result<()>;

    /// ログ・エラー表示用の出力先名
    fn location(&self) -> String;
}

#[async_trait]
impl DigestPersistence for Box<dyn DigestPersistence> {
    async fn open(&mut self) -> Result<()> {
        self.as_mut().open().await
    }

    async fn store_batch(&mut self, batch: &ResultBatch) -> Result<()> {
        self.as_mut().store_batch(batch).await
    }

    async fn finalize(&mut self) -> Result<()> {
        self.as_mut().finalize().await
    }

    fn location(&self) -> String {
        self.as_ref().location()
    }
}
