// Work Distributor - ワードリストをチャンクに分けて作業キューへ配信

use crate::core::{RainbowError, RainbowResult, Word, WorkMessage, WorkUnit};
use crate::wordlist::WordlistReader;
use std::path::PathBuf;
use tokio::sync::mpsc;

/// 配信結果の集計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DistributionStats {
    pub work_units: u64,
    pub words: u64,
    pub shutdown_signals: usize,
}

/// 全ワードリストを順に読み、`chunk_size` 行ごとに作業単位として送信する
///
/// 全ファイルの単語は1本の流れとして連結され、ファイル境界ではチャンクを区切らない。
/// 最後に端数のチャンクを送り、ワーカー数ぶんの終了シグナルを送る。
/// 作業キューが満杯の間は送信で待機する。
pub async fn distribute_wordlists(
    paths: &[PathBuf],
    chunk_size: usize,
    worker_count: usize,
    work_tx: &mpsc::Sender<WorkMessage>,
) -> RainbowResult<DistributionStats> {
    if chunk_size == 0 {
        return Err(RainbowError::configuration(
            "chunk_size は1以上である必要があります",
        ));
    }

    let mut stats = DistributionStats::default();
    let mut buffer: Vec<Word> = Vec::with_capacity(chunk_size);

    for path in paths {
        let mut reader = WordlistReader::open(path).await?;
        tracing::debug!(path = %path.display(), "reading wordlist");

        while let Some(word) = reader.next_word().await? {
            buffer.push(word);
            if buffer.len() == chunk_size {
                let words = std::mem::replace(&mut buffer, Vec::with_capacity(chunk_size));
                send_unit(work_tx, &mut stats, words).await?;
            }
        }
    }

    if !buffer.is_empty() {
        send_unit(work_tx, &mut stats, buffer).await?;
    }

    for _ in 0..worker_count {
        work_tx
            .send(WorkMessage::Shutdown)
            .await
            .map_err(|_| RainbowError::channel("作業キューが閉じられています"))?;
        stats.shutdown_signals += 1;
    }

    tracing::debug!(
        work_units = stats.work_units,
        words = stats.words,
        "distribution finished"
    );
    Ok(stats)
}

async fn send_unit(
    work_tx: &mpsc::Sender<WorkMessage>,
    stats: &mut DistributionStats,
    words: Vec<Word>,
) -> RainbowResult<()> {
    let unit = WorkUnit::new(stats.work_units, words);
    let len = unit.len() as u64;

    work_tx
        .send(WorkMessage::Work(unit))
        .await
        .map_err(|_| RainbowError::channel("作業キューが閉じられています"))?;

    stats.work_units += 1;
    stats.words += len;
    Ok(())
}
