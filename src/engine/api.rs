// 高レベル公開API
// Supervisorを簡単に使用できるようにするための便利な関数

use super::supervisor::Supervisor;
use crate::core::{PipelineConfig, ProgressReporter, RainbowError, RainbowResult, RunSummary};
use crate::digest::DigestAlgorithm;
use crate::services::persistence::OutputTarget;
use crate::wordlist::WordlistScanner;
use std::path::{Path, PathBuf};

/// 1回の実行への入力
#[derive(Debug, Clone, PartialEq)]
pub struct RunRequest {
    /// 処理順に並んだワードリスト
    pub wordlists: Vec<PathBuf>,
    pub algorithm: DigestAlgorithm,
    pub output: OutputTarget,
}

impl RunRequest {
    pub fn new(
        wordlists: Vec<PathBuf>,
        algorithm: DigestAlgorithm,
        output: OutputTarget,
    ) -> RainbowResult<Self> {
        if wordlists.is_empty() {
            return Err(RainbowError::configuration(
                "ワードリストが指定されていません",
            ));
        }

        Ok(Self {
            wordlists,
            algorithm,
            output,
        })
    }

    /// フォルダ内の `*.txt` をパス順に全て使う（出力先のテーブル自身は除く）
    pub fn from_folder(
        folder: &Path,
        algorithm: DigestAlgorithm,
        output: OutputTarget,
    ) -> RainbowResult<Self> {
        let wordlists = WordlistScanner::scan_folder(folder, &[output.path()])?;
        Self::new(wordlists, algorithm, output)
    }
}

/// 出力先を `request.output` から生成して1回実行する
pub async fn generate_rainbow_table<C, R>(
    request: &RunRequest,
    config: C,
    reporter: R,
) -> RainbowResult<RunSummary>
where
    C: PipelineConfig,
    R: ProgressReporter + 'static,
{
    let persistence = request.output.create_persistence();
    let mut supervisor = Supervisor::new(config, reporter);
    supervisor.run(request, persistence).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{DefaultPipelineConfig, NoOpProgressReporter};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_run_request_requires_wordlists() {
        let error = RunRequest::new(vec![], DigestAlgorithm::Md5, OutputTarget::flat_file("x"))
            .unwrap_err();
        assert!(matches!(error, RainbowError::ConfigurationError { .. }));
    }

    #[test]
    fn test_run_request_from_folder_is_sorted() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("b.txt"), "b\n").unwrap();
        fs::write(temp_dir.path().join("a.txt"), "a\n").unwrap();
        fs::write(temp_dir.path().join("notes.md"), "x\n").unwrap();

        let request = RunRequest::from_folder(
            temp_dir.path(),
            DigestAlgorithm::Sha256,
            OutputTarget::flat_file("x"),
        )
        .unwrap();

        assert_eq!(
            request.wordlists,
            vec![temp_dir.path().join("a.txt"), temp_dir.path().join("b.txt")]
        );
    }

    #[tokio::test]
    async fn test_generate_rainbow_table_flat_file() {
        let temp_dir = TempDir::new().unwrap();
        let wordlist = temp_dir.path().join("words.txt");
        fs::write(&wordlist, "abc\n").unwrap();

        let request = RunRequest::new(
            vec![wordlist],
            DigestAlgorithm::Md5,
            OutputTarget::flat_file(temp_dir.path().join("rainbow")),
        )
        .unwrap();
        let config = DefaultPipelineConfig::new(2).with_progress_reporting(false);

        let summary = generate_rainbow_table(&request, config, NoOpProgressReporter::new())
            .await
            .unwrap();

        assert_eq!(summary.rows_written, 1);
        let content = fs::read_to_string(temp_dir.path().join("rainbow.txt")).unwrap();
        assert_eq!(content, "900150983cd24fb0d6963f7d28e17f72:abc\n");
    }
}
