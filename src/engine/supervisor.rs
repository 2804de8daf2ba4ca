// Supervisor - パイプライン全体のライフサイクル管理
// Idle → Running → Draining → Stopped の一方向の状態遷移で1回だけ実行する

use super::api::RunRequest;
use super::distributor::{distribute_wordlists, DistributionStats};
use super::workers::spawn_hash_workers;
use crate::core::{
    DigestPersistence, PipelineConfig, ProgressReporter, RainbowError, RainbowResult,
    ResultMessage, RunSummary, WorkMessage,
};
use crate::services::config::validate_config;
use crate::services::persistence::spawn_output_aggregator;
use crate::wordlist::count_words;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Supervisorの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorState {
    Idle,
    Running,
    Draining,
    Stopped,
}

/// ワーカーとアグリゲーターのハンドルを唯一所有する実行管理者
pub struct Supervisor<C, R> {
    config: C,
    reporter: Arc<R>,
    state: SupervisorState,
    workers: Vec<JoinHandle<RainbowResult<u64>>>,
    aggregator: Option<JoinHandle<RainbowResult<u64>>>,
}

impl<C, R> Supervisor<C, R>
where
    C: PipelineConfig,
    R: ProgressReporter + 'static,
{
    pub fn new(config: C, reporter: R) -> Self {
        Self {
            config,
            reporter: Arc::new(reporter),
            state: SupervisorState::Idle,
            workers: Vec::new(),
            aggregator: None,
        }
    }

    pub fn state(&self) -> SupervisorState {
        self.state
    }

    fn transition(&mut self, next: SupervisorState) {
        tracing::debug!(from = ?self.state, to = ?next, "supervisor state");
        self.state = next;
    }

    /// 1回分の生成を実行する
    ///
    /// 致命的エラーの場合もワーカーとアグリゲーターを必ず join してから返す。
    /// それまでに書き込まれた出力は残る（ロールバックしない）。
    pub async fn run<P>(&mut self, request: &RunRequest, persistence: P) -> RainbowResult<RunSummary>
    where
        P: DigestPersistence + 'static,
    {
        if self.state != SupervisorState::Idle {
            return Err(RainbowError::configuration(
                "Supervisorは1回しか実行できません",
            ));
        }

        validate_config(&self.config)?;
        if request.wordlists.is_empty() {
            return Err(RainbowError::configuration(
                "ワードリストが指定されていません",
            ));
        }

        let start_time = Instant::now();
        let worker_count = self.config.worker_count();
        let output_location = persistence.location();

        let iterations = self.config.iterations();
        if iterations != 1 {
            tracing::warn!(iterations, "iterations is accepted but not applied to hashing");
        }

        let total_words = if self.config.enable_progress_reporting() {
            Some(count_words(&request.wordlists).await?)
        } else {
            None
        };

        tracing::info!(
            algorithm = %request.algorithm,
            workers = worker_count,
            chunk_size = self.config.chunk_size(),
            wordlists = request.wordlists.len(),
            output = %output_location,
            "starting rainbow table generation"
        );

        // Idle → Running
        let (work_tx, work_rx) = mpsc::channel::<WorkMessage>(self.config.work_queue_capacity());
        let (result_tx, result_rx) =
            mpsc::channel::<ResultMessage>(self.config.result_queue_capacity());

        self.transition(SupervisorState::Running);
        self.reporter.report_started(total_words, worker_count).await;

        self.aggregator = Some(spawn_output_aggregator(
            result_rx,
            persistence,
            Arc::clone(&self.reporter),
            total_words,
        ));
        self.workers = spawn_hash_workers(request.algorithm, work_rx, result_tx.clone(), worker_count);

        let distribution = distribute_wordlists(
            &request.wordlists,
            self.config.chunk_size(),
            worker_count,
            &work_tx,
        )
        .await;

        if distribution.is_err() {
            // 配信途中で失敗した場合もワーカーを正常終了させる
            for _ in 0..worker_count {
                if work_tx.send(WorkMessage::Shutdown).await.is_err() {
                    break;
                }
            }
        }
        drop(work_tx);

        // Running → Draining
        self.transition(SupervisorState::Draining);
        let worker_results = self.join_workers().await;

        // 全ワーカー終了後にアグリゲーターへ終了シグナルを1つだけ送る
        let shutdown = result_tx
            .send(ResultMessage::Shutdown)
            .await
            .map_err(|_| RainbowError::channel("結果キューが閉じられています"));
        drop(result_tx);
        let aggregator_result = self.join_aggregator().await;

        // Draining → Stopped
        self.transition(SupervisorState::Stopped);

        let (stats, rows_written) =
            match Self::resolve(distribution, worker_results, shutdown, aggregator_result) {
                Ok(outcome) => outcome,
                Err(error) => {
                    tracing::error!(error = %error, output = %output_location, "run failed");
                    self.reporter.report_error(&error.to_string()).await;
                    return Err(error);
                }
            };

        if rows_written != stats.words {
            let error = RainbowError::internal(anyhow::anyhow!(
                "書き込み行数が入力単語数と一致しません: {rows_written} / {}",
                stats.words
            ));
            self.reporter.report_error(&error.to_string()).await;
            return Err(error);
        }

        let summary = RunSummary {
            workers: worker_count,
            work_units: stats.work_units,
            words_read: stats.words,
            rows_written,
            elapsed_ms: start_time.elapsed().as_millis() as u64,
            output_location,
        };

        tracing::info!(
            words = summary.words_read,
            work_units = summary.work_units,
            elapsed_ms = summary.elapsed_ms,
            "rainbow table generation finished"
        );
        self.reporter.report_completed(&summary).await;
        Ok(summary)
    }

    async fn join_workers(&mut self) -> Vec<RainbowResult<u64>> {
        let mut results = Vec::with_capacity(self.workers.len());
        for handle in self.workers.drain(..) {
            results.push(handle.await.map_err(RainbowError::task).and_then(|r| r));
        }
        results
    }

    async fn join_aggregator(&mut self) -> RainbowResult<u64> {
        match self.aggregator.take() {
            Some(handle) => handle.await.map_err(RainbowError::task)?,
            None => Err(RainbowError::internal(anyhow::anyhow!(
                "アグリゲーターが起動していません"
            ))),
        }
    }

    /// 各コンポーネントの結果から根本原因のエラーを選ぶ
    ///
    /// チャンネル切断は他のコンポーネントの停止から派生するため、
    /// それ以外のエラーがあればそちらを優先する。
    fn resolve(
        distribution: RainbowResult<DistributionStats>,
        worker_results: Vec<RainbowResult<u64>>,
        shutdown: RainbowResult<()>,
        aggregator_result: RainbowResult<u64>,
    ) -> RainbowResult<(DistributionStats, u64)> {
        let mut errors = Vec::new();

        let stats = distribution.map_err(|e| errors.push(e)).ok();
        for result in worker_results {
            if let Err(e) = result {
                errors.push(e);
            }
        }
        if let Err(e) = shutdown {
            errors.push(e);
        }
        let rows_written = aggregator_result.map_err(|e| errors.push(e)).ok();

        if !errors.is_empty() {
            let index = errors.iter().position(|e| !e.is_derived()).unwrap_or(0);
            for (i, error) in errors.iter().enumerate() {
                if i != index {
                    tracing::debug!(error = %error, "secondary failure");
                }
            }
            return Err(errors.swap_remove(index));
        }

        match (stats, rows_written) {
            (Some(stats), Some(rows)) => Ok((stats, rows)),
            _ => Err(RainbowError::internal(anyhow::anyhow!(
                "実行結果が揃っていません"
            ))),
        }
    }
}
