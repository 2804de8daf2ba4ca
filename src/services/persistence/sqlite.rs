// SQLiteデータベースへの出力
// テーブル `rainbow (id INTEGER PRIMARY KEY, digest TEXT, word TEXT)` に1結果1行で挿入

use crate::core::{DigestPersistence, ResultBatch};
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::Connection;
use std::path::{Path, PathBuf};

const CREATE_TABLE_SQL: &str =
    "CREATE TABLE IF NOT EXISTS rainbow (id INTEGER PRIMARY KEY, digest TEXT, word TEXT)";

const INSERT_SQL: &str = "INSERT INTO rainbow (digest, word) VALUES (?, ?)";

/// ファイルパスからSQLite接続を開く
pub(crate) async fn connect(path: &Path, create_if_missing: bool) -> Result<SqliteConnection> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(create_if_missing);
    let connection = SqliteConnection::connect_with(&options)
        .await
        .with_context(|| format!("データベース接続エラー: {}", path.display()))?;
    Ok(connection)
}

/// SQLite出力。接続はアグリゲーターが単独で所有する
pub struct SqliteDigestPersistence {
    path: PathBuf,
    connection: Option<SqliteConnection>,
}

impl SqliteDigestPersistence {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            connection: None,
        }
    }
}

#[async_trait]
impl DigestPersistence for SqliteDigestPersistence {
    async fn open(&mut self) -> Result<()> {
        if self.connection.is_some() {
            return Ok(());
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("ディレクトリ作成エラー: {}", parent.display()))?;
        }

        let mut connection = connect(&self.path, true).await?;
        sqlx::query(CREATE_TABLE_SQL)
            .execute(&mut connection)
            .await
            .context("テーブル作成エラー")?;

        self.connection = Some(connection);
        tracing::debug!(path = %self.path.display(), "database created");
        Ok(())
    }

    async fn store_batch(&mut self, batch: &ResultBatch) -> Result<()> {
        let connection = self
            .connection
            .as_mut()
            .ok_or_else(|| anyhow::anyhow!("データベースが初期化されていません"))?;

        // 1バッチ = 1トランザクション
        let mut tx = connection.begin().await?;
        for result in &batch.results {
            sqlx::query(INSERT_SQL)
                .bind(result.digest.as_str())
                .bind(result.word.to_latin1_string())
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn finalize(&mut self) -> Result<()> {
        if let Some(connection) = self.connection.take() {
            connection.close().await.context("データベースクローズエラー")?;
        }
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
