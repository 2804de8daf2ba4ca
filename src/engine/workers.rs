// Hash Workers - 並列ワーカープール

use crate::core::{RainbowError, RainbowResult, ResultMessage, WorkMessage};
use crate::digest::DigestAlgorithm;
use crate::services::processing::hash_work_unit;
use std::sync::Arc;
use tokio::sync::mpsc;

pub type SharedWorkReceiver = Arc<tokio::sync::Mutex<mpsc::Receiver<WorkMessage>>>;

/// 単一ワーカー。戻り値は処理した作業単位の数
pub fn spawn_single_worker(
    worker_id: usize,
    algorithm: DigestAlgorithm,
    work_rx: SharedWorkReceiver,
    result_tx: mpsc::Sender<ResultMessage>,
) -> tokio::task::JoinHandle<RainbowResult<u64>> {
    tokio::spawn(async move {
        let mut processed = 0u64;

        loop {
            // 次の作業を取得
            let message = {
                let mut rx = work_rx.lock().await;
                rx.recv().await
            };

            let unit = match message {
                Some(WorkMessage::Work(unit)) => unit,
                Some(WorkMessage::Shutdown) => break,
                None => {
                    return Err(RainbowError::channel(
                        "終了シグナルを受信する前に作業キューが閉じられました",
                    ));
                }
            };

            // ハッシュ計算はブロッキングプールで実行
            let batch = tokio::task::spawn_blocking(move || hash_work_unit(algorithm, unit))
                .await
                .map_err(RainbowError::task)?;

            result_tx
                .send(ResultMessage::Batch(batch))
                .await
                .map_err(|_| RainbowError::channel("結果キューが閉じられています"))?;
            processed += 1;
        }

        tracing::debug!(worker_id, work_units = processed, "worker stopped");
        Ok(processed)
    })
}

/// ワーカープール: 作業キューの受信側を全ワーカーで共有する
pub fn spawn_hash_workers(
    algorithm: DigestAlgorithm,
    work_rx: mpsc::Receiver<WorkMessage>,
    result_tx: mpsc::Sender<ResultMessage>,
    worker_count: usize,
) -> Vec<tokio::task::JoinHandle<RainbowResult<u64>>> {
    let work_rx = Arc::new(tokio::sync::Mutex::new(work_rx));

    (0..worker_count)
        .map(|worker_id| {
            spawn_single_worker(worker_id, algorithm, Arc::clone(&work_rx), result_tx.clone())
        })
        .collect()
}
