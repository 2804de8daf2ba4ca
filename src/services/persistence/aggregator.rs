// Output Aggregator - 結果キューの唯一の消費者として出力先へ書き込む

use crate::core::{
    DigestPersistence, ProgressReporter, RainbowError, RainbowResult, ResultMessage,
};
use std::sync::Arc;
use tokio::sync::mpsc;

/// アグリゲーターを起動する。戻り値は書き込んだ行数
///
/// 出力先のオープン・書き込み・クローズはすべてこのタスク内で行う。
/// `ResultMessage::Shutdown` を受けると残りを確定して終了する。
pub fn spawn_output_aggregator<P, R>(
    mut result_rx: mpsc::Receiver<ResultMessage>,
    mut persistence: P,
    reporter: Arc<R>,
    total_words: Option<u64>,
) -> tokio::task::JoinHandle<RainbowResult<u64>>
where
    P: DigestPersistence + 'static,
    R: ProgressReporter + 'static,
{
    tokio::spawn(async move {
        let location = persistence.location();

        persistence
            .open()
            .await
            .map_err(|e| RainbowError::output_open(&location, e))?;
        tracing::info!(output = %location, "output opened");

        let mut written: u64 = 0;
        let mut batches: u64 = 0;

        loop {
            match result_rx.recv().await {
                Some(ResultMessage::Batch(batch)) => {
                    if let Err(e) = persistence.store_batch(&batch).await {
                        finalize_best_effort(&mut persistence, &location).await;
                        return Err(RainbowError::output_write(&location, e));
                    }
                    written += batch.len() as u64;
                    batches += 1;
                    tracing::trace!(sequence = batch.sequence, rows = batch.len(), "batch stored");
                    reporter.report_progress(written, total_words).await;
                }
                Some(ResultMessage::Shutdown) => break,
                None => {
                    // 終了シグナル前に送信側が全て閉じた
                    finalize_best_effort(&mut persistence, &location).await;
                    return Err(RainbowError::channel(
                        "終了シグナルを受信する前に結果キューが閉じられました",
                    ));
                }
            }
        }

        persistence
            .finalize()
            .await
            .map_err(|e| RainbowError::output_finalize(&location, e))?;

        tracing::info!(output = %location, rows = written, batches, "output finalized");
        Ok(written)
    })
}

async fn finalize_best_effort<P: DigestPersistence>(persistence: &mut P, location: &str) {
    if let Err(e) = persistence.finalize().await {
        tracing::warn!(output = %location, error = %e, "failed to finalize partial output");
    }
}
