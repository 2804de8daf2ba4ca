// エラーハンドリング統合テスト
mod fixtures;

use fixtures::*;
use rainbow_table::core::{MockDigestPersistence, MockProgressReporter};
use rainbow_table::{
    generate_rainbow_table, DigestAlgorithm, MemoryDigestPersistence, NoOpProgressReporter,
    OutputTarget, RainbowError, RunRequest, Supervisor, SupervisorState,
};
use std::fs;
use tempfile::TempDir;
use tokio::time::{timeout, Duration};

#[tokio::test]
async fn test_missing_wordlist_fails_run() {
    let temp_dir = TempDir::new().unwrap();
    let request = RunRequest::new(
        vec![temp_dir.path().join("missing.txt")],
        DigestAlgorithm::Md5,
        OutputTarget::flat_file(temp_dir.path().join("rainbow")),
    )
    .unwrap();

    let error = generate_rainbow_table(&request, quiet_config(2, 10), NoOpProgressReporter::new())
        .await
        .unwrap_err();

    assert!(matches!(error, RainbowError::WordlistError { .. }));
    assert!(error.to_string().contains("missing.txt"));
    // 出力先は作成済み（部分的な結果として残る）
    assert!(temp_dir.path().join("rainbow.txt").exists());
}

#[tokio::test]
async fn test_missing_folder_is_error() {
    let temp_dir = TempDir::new().unwrap();

    let result = RunRequest::from_folder(
        &temp_dir.path().join("nope"),
        DigestAlgorithm::Md5,
        OutputTarget::flat_file("rainbow"),
    );

    assert!(matches!(result, Err(RainbowError::WordlistError { .. })));
}

#[tokio::test]
async fn test_folder_without_wordlists_is_configuration_error() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("readme.md"), "x").unwrap();

    let result = RunRequest::from_folder(
        temp_dir.path(),
        DigestAlgorithm::Md5,
        OutputTarget::flat_file("rainbow"),
    );

    assert!(matches!(result, Err(RainbowError::ConfigurationError { .. })));
}

#[tokio::test]
async fn test_unopenable_output_fails_run() {
    let temp_dir = TempDir::new().unwrap();
    let wordlist = write_wordlist(temp_dir.path(), "words.txt", &["abc"]);
    // 出力先の親がファイルなのでディレクトリを作れない
    let blocker = temp_dir.path().join("blocker");
    fs::write(&blocker, "file").unwrap();

    let request = RunRequest::new(
        vec![wordlist],
        DigestAlgorithm::Md5,
        OutputTarget::flat_file(blocker.join("rainbow")),
    )
    .unwrap();

    let error = generate_rainbow_table(&request, quiet_config(2, 1), NoOpProgressReporter::new())
        .await
        .unwrap_err();

    assert!(matches!(error, RainbowError::OutputOpenError { .. }));
}

#[tokio::test]
async fn test_write_failure_does_not_stall() {
    let temp_dir = TempDir::new().unwrap();
    let words = numbered_words("w", 500);
    let refs: Vec<&str> = words.iter().map(String::as_str).collect();
    let wordlist = write_wordlist(temp_dir.path(), "words.txt", &refs);

    let mut persistence = MockDigestPersistence::new();
    persistence.expect_location().return_const("failing".to_string());
    persistence.expect_open().returning(|| Ok(()));
    persistence
        .expect_store_batch()
        .returning(|_| Err(anyhow::anyhow!("storage unavailable")));
    persistence.expect_finalize().returning(|| Ok(()));

    let request = RunRequest::new(
        vec![wordlist],
        DigestAlgorithm::Md5,
        OutputTarget::flat_file("unused"),
    )
    .unwrap();
    let mut supervisor = Supervisor::new(quiet_config(4, 3), NoOpProgressReporter::new());

    let result = timeout(Duration::from_secs(10), supervisor.run(&request, persistence))
        .await
        .expect("aggregator failure must not stall the run");

    assert!(matches!(result, Err(RainbowError::OutputWriteError { .. })));
    assert_eq!(supervisor.state(), SupervisorState::Stopped);
}

#[tokio::test]
async fn test_error_is_reported_once() {
    let temp_dir = TempDir::new().unwrap();

    let mut reporter = MockProgressReporter::new();
    reporter.expect_report_started().times(1).returning(|_, _| ());
    reporter.expect_report_error().times(1).returning(|_| ());
    reporter.expect_report_completed().never();

    let request = RunRequest::new(
        vec![temp_dir.path().join("missing.txt")],
        DigestAlgorithm::Md5,
        OutputTarget::flat_file("unused"),
    )
    .unwrap();
    let mut supervisor = Supervisor::new(quiet_config(2, 10), reporter);

    let result = supervisor.run(&request, MemoryDigestPersistence::new()).await;
    assert!(result.is_err());
}

#[test]
fn test_error_context_for_cli() {
    let error = RainbowError::wordlist(
        "/lists/rockyou.txt",
        std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
    );
    let context = error.context();

    assert_eq!(context.operation, "read_wordlist");
    assert_eq!(context.resource.as_deref(), Some("/lists/rockyou.txt"));
    assert!(context.suggestion.is_some());
}
