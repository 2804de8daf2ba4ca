// 出力先の具象実装（メモリ / フラットファイル）

use crate::core::{DigestPersistence, ResultBatch, Word};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncWriteExt, BufWriter};

const WRITE_BUFFER_SIZE: usize = 256 * 1024;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Debug, Default)]
struct MemoryState {
    opened: bool,
    finalized: bool,
    rows: Vec<(String, Word)>,
    batch_sequences: Vec<u64>,
}

/// メモリ内保存の出力先（テスト用および開発用）
///
/// クローン同士は同じ保存領域を共有するため、アグリゲーターへ渡した後も
/// 手元のクローンから結果を確認できる。
#[derive(Debug, Clone, Default)]
pub struct MemoryDigestPersistence {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryDigestPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// テスト用：保存された (digest, word) の一覧（書き込み順）
    pub fn rows(&self) -> Vec<(String, Word)> {
        lock(&self.state).rows.clone()
    }

    /// テスト用：バッチの到着順
    pub fn batch_sequences(&self) -> Vec<u64> {
        lock(&self.state).batch_sequences.clone()
    }

    pub fn stored_count(&self) -> usize {
        lock(&self.state).rows.len()
    }

    pub fn is_opened(&self) -> bool {
        lock(&self.state).opened
    }

    pub fn is_finalized(&self) -> bool {
        lock(&self.state).finalized
    }
}

#[async_trait]
impl DigestPersistence for MemoryDigestPersistence {
    async fn open(&mut self) -> Result<()> {
        lock(&self.state).opened = true;
        Ok(())
    }

    async fn store_batch(&mut self, batch: &ResultBatch) -> Result<()> {
        let mut state = lock(&self.state);
        if !state.opened || state.finalized {
            anyhow::bail!("出力先が開かれていません");
        }
        state.batch_sequences.push(batch.sequence);
        state.rows.extend(
            batch
                .results
                .iter()
                .map(|r| (r.digest.clone(), r.word.clone())),
        );
        Ok(())
    }

    async fn finalize(&mut self) -> Result<()> {
        lock(&self.state).finalized = true;
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

/// `<digest>:<word>` を1行ずつ追記するフラットファイル出力
pub struct FlatFileDigestPersistence {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
}

impl FlatFileDigestPersistence {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            writer: None,
        }
    }
}

#[async_trait]
impl DigestPersistence for FlatFileDigestPersistence {
    async fn open(&mut self) -> Result<()> {
        if self.writer.is_some() {
            return Ok(());
        }

        // 親ディレクトリが存在しない場合は作成
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("ディレクトリ作成エラー: {}", parent.display()))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .context("ファイルオープンエラー")?;

        self.writer = Some(BufWriter::with_capacity(WRITE_BUFFER_SIZE, file));
        tracing::debug!(path = %self.path.display(), "flat file opened");
        Ok(())
    }

    async fn store_batch(&mut self, batch: &ResultBatch) -> Result<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| anyhow::anyhow!("ファイルが初期化されていません"))?;

        for result in &batch.results {
            writer.write_all(&result.to_line_bytes()).await?;
            writer.write_all(b"\n").await?;
        }
        Ok(())
    }

    async fn finalize(&mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush().await.context("フラッシュエラー")?;
            writer
                .into_inner()
                .sync_all()
                .await
                .context("同期エラー")?;
        }
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DigestResult;
    use tempfile::TempDir;

    fn batch(sequence: u64, pairs: &[(&str, &str)]) -> ResultBatch {
        ResultBatch {
            sequence,
            results: pairs
                .iter()
                .map(|(digest, word)| DigestResult {
                    digest: digest.to_string(),
                    word: Word::from(*word),
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_memory_persistence_lifecycle() {
        let persistence = MemoryDigestPersistence::new();
        let mut owned = persistence.clone();

        owned.open().await.unwrap();
        owned.store_batch(&batch(1, &[("d1", "a"), ("d2", "b")])).await.unwrap();
        owned.store_batch(&batch(0, &[("d3", "c")])).await.unwrap();
        assert!(!persistence.is_finalized());
        owned.finalize().await.unwrap();

        assert!(persistence.is_opened());
        assert!(persistence.is_finalized());
        assert_eq!(persistence.stored_count(), 3);
        assert_eq!(persistence.batch_sequences(), vec![1, 0]);
        assert_eq!(persistence.rows()[0], ("d1".to_string(), Word::from("a")));
    }

    #[tokio::test]
    async fn test_memory_persistence_rejects_write_before_open() {
        let mut persistence = MemoryDigestPersistence::new();
        assert!(persistence.store_batch(&batch(0, &[("d", "w")])).await.is_err());
    }

    #[tokio::test]
    async fn test_flat_file_writes_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("rainbow.txt");

        let mut persistence = FlatFileDigestPersistence::new(&path);
        persistence.open().await.unwrap();
        persistence
            .store_batch(&batch(0, &[("aa", "abc"), ("bb", "a:b")]))
            .await
            .unwrap();
        persistence.finalize().await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "aa:abc\nbb:a:b\n");
        assert_eq!(persistence.location(), path.display().to_string());
    }

    #[tokio::test]
    async fn test_flat_file_appends_to_existing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rainbow.txt");
        std::fs::write(&path, "old:line\n").unwrap();

        let mut persistence = FlatFileDigestPersistence::new(&path);
        persistence.open().await.unwrap();
        persistence.store_batch(&batch(0, &[("new", "line")])).await.unwrap();
        persistence.finalize().await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "old:line\nnew:line\n");
    }

    #[tokio::test]
    async fn test_flat_file_writes_raw_bytes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rainbow.txt");

        let mut persistence = FlatFileDigestPersistence::new(&path);
        persistence.open().await.unwrap();
        persistence
            .store_batch(&ResultBatch {
                sequence: 0,
                results: vec![DigestResult {
                    digest: "ff".to_string(),
                    word: Word::new(vec![0xE9]),
                }],
            })
            .await
            .unwrap();
        persistence.finalize().await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), vec![b'f', b'f', b':', 0xE9, b'\n']);
    }

    #[tokio::test]
    async fn test_flat_file_empty_run_creates_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.txt");

        let mut persistence = FlatFileDigestPersistence::new(&path);
        persistence.open().await.unwrap();
        persistence.finalize().await.unwrap();

        assert!(path.exists());
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_flat_file_write_before_open_fails() {
        let temp_dir = TempDir::new().unwrap();
        let mut persistence = FlatFileDigestPersistence::new(temp_dir.path().join("x.txt"));

        assert!(persistence.store_batch(&batch(0, &[("d", "w")])).await.is_err());
    }
}
