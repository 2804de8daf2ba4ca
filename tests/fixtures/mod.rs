// 統合テスト用のヘルパー
#![allow(dead_code)]

use rainbow_table::{digest_hex, DefaultPipelineConfig, DigestAlgorithm};
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{Connection, SqliteConnection};
use std::fs;
use std::path::{Path, PathBuf};

/// 1行1単語のワードリストを作成
pub fn write_wordlist(dir: &Path, name: &str, words: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let content: String = words.iter().map(|w| format!("{w}\n")).collect();
    fs::write(&path, content).unwrap();
    path
}

/// 連番の単語を生成
pub fn numbered_words(prefix: &str, count: usize) -> Vec<String> {
    (0..count).map(|i| format!("{prefix}{i}")).collect()
}

/// 進捗表示なしの設定
pub fn quiet_config(workers: usize, chunk_size: usize) -> DefaultPipelineConfig {
    DefaultPipelineConfig::new(4)
        .with_workers(workers)
        .with_chunk_size(chunk_size)
        .with_progress_reporting(false)
}

/// 期待される (digest, word) の多重集合（ソート済み）
pub fn expected_pairs<S: AsRef<str>>(algorithm: DigestAlgorithm, words: &[S]) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = words
        .iter()
        .map(|w| {
            let w = w.as_ref();
            (digest_hex(algorithm, w.as_bytes()), w.to_string())
        })
        .collect();
    pairs.sort();
    pairs
}

/// フラットファイル出力を (digest, word) の多重集合として読む（ソート済み）
pub fn read_flat_file_pairs(path: &Path) -> Vec<(String, String)> {
    let content = fs::read_to_string(path).unwrap();
    let mut pairs: Vec<(String, String)> = content
        .lines()
        .map(|line| {
            let (digest, word) = line.split_once(':').unwrap();
            (digest.to_string(), word.to_string())
        })
        .collect();
    pairs.sort();
    pairs
}

/// SQLite出力を (digest, word) の多重集合として読む（ソート済み）
pub async fn read_database_pairs(path: &Path) -> Vec<(String, String)> {
    let options = SqliteConnectOptions::new().filename(path);
    let mut connection = SqliteConnection::connect_with(&options).await.unwrap();
    let mut pairs = sqlx::query_as::<_, (String, String)>("SELECT digest, word FROM rainbow")
        .fetch_all(&mut connection)
        .await
        .unwrap();
    pairs.sort();
    pairs
}
